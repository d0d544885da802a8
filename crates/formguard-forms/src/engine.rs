//! Per-field validation: value resolution, dispatch and error aggregation

use crate::errors::{ErrorSink, Outcome};
use crate::field::{Field, SemanticType};
use crate::registry::{ConstraintAttribute, ValidatorRegistry};
use crate::validators::{UploadLimits, ValidationContext};
use crate::value_source::{SubmittedValue, ValueSource};
use formguard_conf::{FormSettings, Method};

/// What one validation run of one field produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
	pub errors: ErrorSink,
	/// Validators that reached a verdict, in first-run order, without repeats
	pub validated_on: Vec<&'static str>,
}

impl ValidationReport {
	fn record(&mut self, field: &Field, index: usize, validator: &'static str, outcome: Outcome) {
		tracing::trace!(
			field = field.report_name(),
			index,
			validator,
			valid = outcome.is_valid(),
			"validator invoked"
		);
		match &outcome {
			Outcome::Inapplicable(message) => {
				tracing::warn!(
					field = field.report_name(),
					index,
					attribute = validator,
					"{message}"
				);
			}
			Outcome::Valid | Outcome::Invalid(_) => {
				if !self.validated_on.contains(&validator) {
					self.validated_on.push(validator);
				}
			}
		}
		self.errors.record(index, outcome);
	}
}

/// Drives validation of single fields.
///
/// The engine is stateless between calls: every [`ValidationEngine::evaluate`]
/// builds a fresh report, and the value source is only read.
///
/// # Examples
///
/// ```
/// use formguard_forms::{ElementDescriptor, Field, MemoryValueSource, ValidationEngine};
///
/// let field = Field::from_element(
///     &ElementDescriptor::new("input").attr("name", "age").attr("type", "number").attr("min", "18"),
/// )
/// .unwrap();
/// let source = MemoryValueSource::new().with_query("age", "16");
///
/// let report = ValidationEngine::default().evaluate(&field, &source);
/// assert_eq!(report.errors.user_errors(), vec!["Value `16` lower than required minimum: 18"]);
/// assert_eq!(report.validated_on, vec!["min", "type"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValidationEngine<'r> {
	registry: &'r ValidatorRegistry,
	limits: UploadLimits,
	default_method: Method,
}

impl<'r> ValidationEngine<'r> {
	pub fn new(registry: &'r ValidatorRegistry) -> Self {
		let settings = FormSettings::default();
		Self {
			registry,
			limits: UploadLimits {
				server: settings.server_upload_limit(),
				form: None,
			},
			default_method: settings.default_method,
		}
	}

	/// Take host limits and the default method from `settings`
	pub fn with_settings(mut self, settings: &FormSettings) -> Self {
		self.limits.server = settings.server_upload_limit();
		self.default_method = settings.default_method;
		self
	}

	/// Form-level `MAX_FILE_SIZE`
	pub fn with_form_limit(mut self, limit: Option<u64>) -> Self {
		self.limits.form = limit;
		self
	}

	/// Method for fields without their own override
	pub fn with_default_method(mut self, method: Method) -> Self {
		self.default_method = method;
		self
	}

	pub fn limits(&self) -> UploadLimits {
		self.limits
	}

	pub fn default_method(&self) -> Method {
		self.default_method
	}

	/// Resolve the submitted values of `field`, in the order received.
	///
	/// File fields read the upload channel; other fields read the partition of
	/// their own method, else the engine's default. A scalar field keeps only
	/// the last value. An empty result means nothing was submitted.
	pub fn resolve(&self, field: &Field, source: &dyn ValueSource) -> Vec<SubmittedValue> {
		let Some(key) = field.lookup_key() else {
			return Vec::new();
		};

		let mut values: Vec<SubmittedValue> = if field.semantic_type() == SemanticType::File {
			source
				.uploads(key)
				.unwrap_or_default()
				.into_iter()
				.map(SubmittedValue::Upload)
				.collect()
		} else {
			let method = field.method().unwrap_or(self.default_method);
			source
				.values(method, key)
				.unwrap_or_default()
				.into_iter()
				.map(SubmittedValue::Text)
				.collect()
		};

		if !field.is_array() && values.len() > 1 {
			values = values.split_off(values.len() - 1);
		}
		values
	}

	/// Validate every resolved value of `field` against every constraint it
	/// carries.
	///
	/// A field with nothing submitted is checked once against an empty probe at
	/// index 0, so `required` still fires. The probe only runs the attribute
	/// validators; the type check needs a submitted value. Attributes run in
	/// document order, followed by the type check. No validator short-circuits
	/// another.
	pub fn evaluate(&self, field: &Field, source: &dyn ValueSource) -> ValidationReport {
		let mut values = self.resolve(field, source);
		let synthesized = values.is_empty();
		if synthesized {
			values.push(SubmittedValue::Text(String::new()));
		}

		let constraints: Vec<(ConstraintAttribute, &str)> = field
			.attributes()
			.iter()
			.filter_map(|(name, value)| {
				ConstraintAttribute::from_name(name).map(|attribute| (attribute, value.as_str()))
			})
			.collect();
		let type_check = if synthesized {
			None
		} else {
			self.registry.type_check(field.semantic_type())
		};

		let mut report = ValidationReport::default();
		for (index, value) in values.iter().enumerate() {
			let ctx = ValidationContext {
				field,
				value,
				limits: self.limits,
			};
			for &(attribute, attribute_value) in &constraints {
				if let Some(outcome) = self.registry.dispatch(attribute, &ctx, attribute_value) {
					report.record(field, index, attribute.as_str(), outcome);
				}
			}
			if let Some(check) = type_check {
				report.record(field, index, check.name, (check.validate)(&ctx));
			}
		}
		report
	}
}

impl Default for ValidationEngine<'static> {
	fn default() -> Self {
		Self::new(ValidatorRegistry::global())
	}
}
