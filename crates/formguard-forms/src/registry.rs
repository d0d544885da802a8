//! Validator dispatch table
//!
//! Constraint attributes are a closed enum. Each one maps to a validator
//! function and to the list of semantic types it applies to, so the
//! applicability matrix is plain data that can be inspected and tested.

use crate::errors::Outcome;
use crate::field::SemanticType;
use crate::validators::{
	self, AttributeValidatorFn, TypeValidatorFn, ValidationContext,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

const TEXT_LIKE: &[SemanticType] = &[
	SemanticType::Text,
	SemanticType::Search,
	SemanticType::Url,
	SemanticType::Tel,
	SemanticType::Email,
	SemanticType::Password,
];

const REQUIRED_TYPES: &[SemanticType] = &[
	SemanticType::Text,
	SemanticType::Search,
	SemanticType::Url,
	SemanticType::Tel,
	SemanticType::Email,
	SemanticType::Password,
	SemanticType::Checkbox,
	SemanticType::Textarea,
	SemanticType::Select,
];

const LENGTH_TYPES: &[SemanticType] = &[
	SemanticType::Text,
	SemanticType::Search,
	SemanticType::Url,
	SemanticType::Tel,
	SemanticType::Email,
	SemanticType::Password,
	SemanticType::Textarea,
];

const RANGE_TYPES: &[SemanticType] = &[
	SemanticType::Date,
	SemanticType::Number,
	SemanticType::Month,
	SemanticType::Week,
	SemanticType::DateTimeLocal,
	SemanticType::Range,
	SemanticType::Time,
];

const FILE_TYPES: &[SemanticType] = &[SemanticType::File];

/// Attributes that carry a constraint. Anything else on an element is
/// presentational and never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintAttribute {
	Required,
	Pattern,
	MinLength,
	MaxLength,
	Min,
	Max,
	Step,
	Accept,
}

impl ConstraintAttribute {
	pub const ALL: [ConstraintAttribute; 8] = [
		ConstraintAttribute::Required,
		ConstraintAttribute::Pattern,
		ConstraintAttribute::MinLength,
		ConstraintAttribute::MaxLength,
		ConstraintAttribute::Min,
		ConstraintAttribute::Max,
		ConstraintAttribute::Step,
		ConstraintAttribute::Accept,
	];

	/// Case-insensitive lookup by attribute name
	///
	/// # Examples
	///
	/// ```
	/// use formguard_forms::ConstraintAttribute;
	///
	/// assert_eq!(ConstraintAttribute::from_name("MaxLength"), Some(ConstraintAttribute::MaxLength));
	/// assert_eq!(ConstraintAttribute::from_name("placeholder"), None);
	/// ```
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|attribute| attribute.as_str().eq_ignore_ascii_case(name))
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			ConstraintAttribute::Required => "required",
			ConstraintAttribute::Pattern => "pattern",
			ConstraintAttribute::MinLength => "minlength",
			ConstraintAttribute::MaxLength => "maxlength",
			ConstraintAttribute::Min => "min",
			ConstraintAttribute::Max => "max",
			ConstraintAttribute::Step => "step",
			ConstraintAttribute::Accept => "accept",
		}
	}

	/// Semantic types this attribute is meaningful on
	pub fn applies_to(&self) -> &'static [SemanticType] {
		match self {
			ConstraintAttribute::Required => REQUIRED_TYPES,
			ConstraintAttribute::Pattern => TEXT_LIKE,
			ConstraintAttribute::MinLength | ConstraintAttribute::MaxLength => LENGTH_TYPES,
			ConstraintAttribute::Min | ConstraintAttribute::Max | ConstraintAttribute::Step => {
				RANGE_TYPES
			}
			ConstraintAttribute::Accept => FILE_TYPES,
		}
	}

	pub fn is_applicable_to(&self, kind: SemanticType) -> bool {
		self.applies_to().contains(&kind)
	}
}

impl fmt::Display for ConstraintAttribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A type check and the name it is reported under
#[derive(Debug, Clone, Copy)]
pub struct TypeCheck {
	pub name: &'static str,
	pub validate: TypeValidatorFn,
}

/// Maps constraint attributes and semantic types to validator functions.
///
/// [`ValidatorRegistry::global`] holds the built-in table. A custom registry
/// can replace individual entries.
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
	attributes: HashMap<ConstraintAttribute, AttributeValidatorFn>,
	type_checks: HashMap<SemanticType, TypeCheck>,
}

static GLOBAL_REGISTRY: LazyLock<ValidatorRegistry> = LazyLock::new(ValidatorRegistry::new);

impl ValidatorRegistry {
	/// Registry with every built-in validator
	pub fn new() -> Self {
		let mut registry = Self::empty();

		registry.register_attribute(ConstraintAttribute::Required, validators::required::validate);
		registry.register_attribute(ConstraintAttribute::Pattern, validators::pattern::validate);
		registry.register_attribute(ConstraintAttribute::MinLength, validators::length::validate_min);
		registry.register_attribute(ConstraintAttribute::MaxLength, validators::length::validate_max);
		registry.register_attribute(ConstraintAttribute::Min, validators::range::validate_min);
		registry.register_attribute(ConstraintAttribute::Max, validators::range::validate_max);
		registry.register_attribute(ConstraintAttribute::Step, validators::step::validate);
		registry.register_attribute(ConstraintAttribute::Accept, validators::accept::validate);

		for kind in [SemanticType::Email, SemanticType::Url, SemanticType::Number] {
			registry.register_type_check(kind, "type", validators::format::validate);
		}
		for kind in [
			SemanticType::Date,
			SemanticType::Month,
			SemanticType::Week,
			SemanticType::Time,
			SemanticType::DateTimeLocal,
		] {
			registry.register_type_check(kind, "type", validators::temporal::validate);
		}
		registry.register_type_check(SemanticType::File, "type", validators::upload::validate);
		registry.register_type_check(SemanticType::Select, "options", validators::membership::validate);

		registry
	}

	/// Registry with no validators
	pub fn empty() -> Self {
		Self {
			attributes: HashMap::new(),
			type_checks: HashMap::new(),
		}
	}

	/// Shared built-in registry
	pub fn global() -> &'static ValidatorRegistry {
		&GLOBAL_REGISTRY
	}

	pub fn register_attribute(&mut self, attribute: ConstraintAttribute, validator: AttributeValidatorFn) {
		self.attributes.insert(attribute, validator);
	}

	pub fn register_type_check(
		&mut self,
		kind: SemanticType,
		name: &'static str,
		validator: TypeValidatorFn,
	) {
		self.type_checks.insert(
			kind,
			TypeCheck {
				name,
				validate: validator,
			},
		);
	}

	pub fn attribute(&self, attribute: ConstraintAttribute) -> Option<AttributeValidatorFn> {
		self.attributes.get(&attribute).copied()
	}

	pub fn type_check(&self, kind: SemanticType) -> Option<TypeCheck> {
		self.type_checks.get(&kind).copied()
	}

	/// Run the validator for `attribute`, checking applicability first.
	///
	/// Returns `None` when no validator is registered for the attribute.
	pub fn dispatch(
		&self,
		attribute: ConstraintAttribute,
		ctx: &ValidationContext<'_>,
		attribute_value: &str,
	) -> Option<Outcome> {
		let validator = self.attribute(attribute)?;
		let kind = ctx.field.semantic_type();
		if !attribute.is_applicable_to(kind) {
			return Some(Outcome::inapplicable(inapplicable_message(kind, attribute)));
		}
		Some(validator(ctx, attribute_value))
	}
}

impl Default for ValidatorRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Config alert text for an attribute used on a type that does not support it
pub fn inapplicable_message(kind: SemanticType, attribute: ConstraintAttribute) -> String {
	format!("Input `{kind}` doesn't support this attribute: {attribute}")
}
