use super::ValidationContext;
use crate::errors::Outcome;
use regex::Regex;

/// `pattern`: the whole value must match the expression.
///
/// The expression is anchored on both ends, as HTML does. An empty or
/// uncompilable expression is an authoring defect, not a user error.
pub fn validate(ctx: &ValidationContext<'_>, pattern: &str) -> Outcome {
	if pattern.is_empty() {
		return Outcome::inapplicable("Empty pattern attribute");
	}
	let regex = match Regex::new(&format!("^(?:{pattern})$")) {
		Ok(regex) => regex,
		Err(_) => return Outcome::inapplicable(format!("Invalid pattern attribute: `{pattern}`")),
	};

	let value = ctx.text();
	if value.is_empty() || regex.is_match(value) {
		Outcome::Valid
	} else {
		Outcome::invalid(format!("Value `{value}` doesn't match the required pattern"))
	}
}
