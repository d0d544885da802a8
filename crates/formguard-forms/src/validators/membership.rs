use super::ValidationContext;
use crate::errors::Outcome;

/// Option membership for `select` fields.
///
/// Skipped for dynamic selects, whose options are filled in elsewhere.
pub fn validate(ctx: &ValidationContext<'_>) -> Outcome {
	if ctx.field.is_dynamic() || ctx.is_empty() {
		return Outcome::Valid;
	}
	let Some(options) = ctx.field.selection() else {
		return Outcome::Valid;
	};
	let value = ctx.text();
	if options.contains(value) {
		Outcome::Valid
	} else {
		Outcome::invalid(format!("Value `{value}` is not one of the available options"))
	}
}
