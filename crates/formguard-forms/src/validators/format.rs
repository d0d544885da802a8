//! Format checks for `email`, `url` and `number` inputs

use super::ValidationContext;
use crate::errors::Outcome;
use crate::field::SemanticType;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
		.expect("EMAIL_REGEX: invalid regex pattern")
});

static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^-?(\d+|\d*\.\d+)([eE][-+]?\d+)?$").expect("NUMBER_REGEX: invalid regex pattern")
});

/// Parse a valid floating-point number as HTML defines it.
///
/// Rejects forms Rust would otherwise accept, such as `+1`, `inf` or `1.`.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
	if !NUMBER_REGEX.is_match(value) {
		return None;
	}
	value.parse::<f64>().ok().filter(|number| number.is_finite())
}

pub fn is_email(value: &str) -> bool {
	EMAIL_REGEX.is_match(value)
}

/// Absolute URLs only
pub fn is_url(value: &str) -> bool {
	url::Url::parse(value).is_ok()
}

pub fn is_number(value: &str) -> bool {
	parse_number(value).is_some()
}

/// Type check shared by `email`, `url` and `number` fields
pub fn validate(ctx: &ValidationContext<'_>) -> Outcome {
	let value = ctx.text();
	if value.is_empty() {
		return Outcome::Valid;
	}
	let (valid, label) = match ctx.field.semantic_type() {
		SemanticType::Email => (is_email(value), "email address"),
		SemanticType::Url => (is_url(value), "URL"),
		SemanticType::Number => (is_number(value), "number"),
		_ => return Outcome::Valid,
	};
	if valid {
		Outcome::Valid
	} else {
		Outcome::invalid(format!("Value `{value}` is not a valid {label}"))
	}
}
