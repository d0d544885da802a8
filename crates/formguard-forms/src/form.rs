//! Ordered collection of fields validated as one unit

use crate::element::ElementDescriptor;
use crate::engine::ValidationEngine;
use crate::errors::ConstructionError;
use crate::field::{Field, SemanticType, is_control_tag};
use crate::registry::ValidatorRegistry;
use crate::value_source::ValueSource;
use formguard_conf::{FormSettings, Method};
use std::fmt;

/// Name of the hidden input that declares a form-level upload limit
pub const MAX_FILE_SIZE_FIELD: &str = "MAX_FILE_SIZE";

/// Messages collected for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
	/// Raw `name` attribute of the field
	pub name: String,
	pub messages: Vec<String>,
}

impl fmt::Display for FieldErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.name, self.messages.join(","))
	}
}

/// A form: fields in document order plus one default submission method.
///
/// # Examples
///
/// ```
/// use formguard_forms::{ElementDescriptor, Form, MemoryValueSource};
///
/// let elements = vec![
///     ElementDescriptor::new("form").attr("method", "POST"),
///     ElementDescriptor::new("label").attr("for", "email"),
///     ElementDescriptor::new("input").attr("type", "email").attr("name", "email").flag("required"),
/// ];
/// let mut form = Form::from_elements("signup", elements);
///
/// let source = MemoryValueSource::new().with_body("email", "not-an-email");
/// assert!(!form.validate(&source));
/// assert_eq!(
///     form.errors()[0].to_string(),
///     "email:Value `not-an-email` is not a valid email address"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Form {
	name: String,
	method: Method,
	settings: FormSettings,
	max_file_size: Option<u64>,
	fields: Vec<Field>,
	construction_errors: Vec<ConstructionError>,
	valid: bool,
}

impl Form {
	pub fn new(name: impl Into<String>, method: Method) -> Self {
		Self {
			name: name.into(),
			method,
			settings: FormSettings::default(),
			max_file_size: None,
			fields: Vec::new(),
			construction_errors: Vec::new(),
			valid: false,
		}
	}

	/// Form using the host limits and default method from `settings`
	pub fn with_settings(name: impl Into<String>, settings: FormSettings) -> Self {
		let mut form = Self::new(name, settings.default_method);
		form.settings = settings;
		form
	}

	/// Build a form from parser output, in document order.
	///
	/// A `form` element sets the method. Form controls become fields and other
	/// elements are skipped. An element that cannot be built is recorded in
	/// [`Form::construction_errors`] without stopping the rest.
	pub fn from_elements(
		name: impl Into<String>,
		elements: impl IntoIterator<Item = ElementDescriptor>,
	) -> Self {
		let mut form = Self::new(name, Method::default());
		form.extend_from_elements(elements);
		form
	}

	pub fn extend_from_elements(&mut self, elements: impl IntoIterator<Item = ElementDescriptor>) {
		for element in elements {
			let tag = element.tag.trim().to_lowercase();
			if tag == "form" {
				self.apply_form_element(&element);
				continue;
			}
			if !tag.is_empty() && !is_control_tag(&tag) {
				tracing::debug!(form = %self.name, tag = %tag, "skipping non-control element");
				continue;
			}
			match Field::from_element(&element) {
				Ok(field) => self.add_field(field),
				Err(error) => {
					tracing::error!(form = %self.name, tag = %tag, %error, "failed to build field");
					self.construction_errors.push(error);
				}
			}
		}
	}

	fn apply_form_element(&mut self, element: &ElementDescriptor) {
		let Some(raw) = element.attribute("method").filter(|raw| !raw.trim().is_empty()) else {
			return;
		};
		match raw.parse::<Method>() {
			Ok(method) => self.method = method,
			Err(error) => {
				tracing::debug!(form = %self.name, %error, "keeping method {}", self.method)
			}
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Default method for fields without their own override
	pub fn method(&self) -> Method {
		self.method
	}

	pub fn set_method(&mut self, method: Method) {
		self.method = method;
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	/// Form-level upload limit in bytes
	pub fn max_file_size(&self) -> Option<u64> {
		self.max_file_size
	}

	pub fn set_max_file_size(&mut self, bytes: u64) {
		self.max_file_size = Some(bytes);
	}

	/// Append a field.
	///
	/// A hidden `MAX_FILE_SIZE` input with a numeric value also sets the
	/// form-level upload limit.
	pub fn add_field(&mut self, field: Field) {
		if field.semantic_type() == SemanticType::Hidden
			&& field.lookup_key() == Some(MAX_FILE_SIZE_FIELD)
		{
			match field.attribute("value").map(|value| value.trim().parse::<u64>()) {
				Some(Ok(bytes)) => self.max_file_size = Some(bytes),
				_ => tracing::debug!(form = %self.name, "ignoring non-numeric MAX_FILE_SIZE"),
			}
		}
		self.fields.push(field);
	}

	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	/// First field whose raw `name` is `key`
	pub fn field(&self, key: &str) -> Option<&Field> {
		self.fields
			.iter()
			.find(|field| field.lookup_key() == Some(key))
	}

	pub fn field_mut(&mut self, key: &str) -> Option<&mut Field> {
		self.fields
			.iter_mut()
			.find(|field| field.lookup_key() == Some(key))
	}

	pub fn remove_field(&mut self, key: &str) -> Option<Field> {
		let position = self
			.fields
			.iter()
			.position(|field| field.lookup_key() == Some(key))?;
		Some(self.fields.remove(position))
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	/// Elements that could not be turned into fields
	pub fn construction_errors(&self) -> &[ConstructionError] {
		&self.construction_errors
	}

	/// Validate every field against `source`, in insertion order.
	///
	/// Each call starts from scratch, so repeated calls against an unchanged
	/// source give identical results.
	pub fn validate(&mut self, source: &dyn ValueSource) -> bool {
		let engine = ValidationEngine::new(ValidatorRegistry::global())
			.with_settings(&self.settings)
			.with_default_method(self.method)
			.with_form_limit(self.max_file_size);

		for field in &mut self.fields {
			field.validate(source, &engine);
		}
		self.valid = self.fields.iter().all(Field::is_valid);
		self.valid
	}

	/// Verdict of the last [`Form::validate`] call; false before the first one
	pub fn is_valid(&self) -> bool {
		self.valid
	}

	/// User errors per field, in field order. Clean fields are left out.
	pub fn errors(&self) -> Vec<FieldErrors> {
		self.collect_messages(Field::errors)
	}

	/// Config alerts per field. Kept apart from [`Form::errors`].
	pub fn config_alerts(&self) -> Vec<FieldErrors> {
		self.collect_messages(Field::config_alerts)
	}

	fn collect_messages(&self, extract: impl Fn(&Field) -> Vec<&str>) -> Vec<FieldErrors> {
		self.fields
			.iter()
			.filter_map(|field| {
				let messages = extract(field);
				if messages.is_empty() {
					return None;
				}
				Some(FieldErrors {
					name: field.report_name().to_string(),
					messages: messages.into_iter().map(str::to_string).collect(),
				})
			})
			.collect()
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new("", Method::default())
	}
}
