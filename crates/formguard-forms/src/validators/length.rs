use super::ValidationContext;
use crate::errors::Outcome;

/// `minlength`
pub fn validate_min(ctx: &ValidationContext<'_>, attribute: &str) -> Outcome {
	let min = match parse_limit("minlength", attribute) {
		Ok(min) => min,
		Err(alert) => return alert,
	};
	let length = ctx.text().chars().count();
	if length == 0 || length >= min {
		Outcome::Valid
	} else {
		Outcome::invalid(format!(
			"Value is shorter than the minimum length of {min} characters"
		))
	}
}

/// `maxlength`
pub fn validate_max(ctx: &ValidationContext<'_>, attribute: &str) -> Outcome {
	let max = match parse_limit("maxlength", attribute) {
		Ok(max) => max,
		Err(alert) => return alert,
	};
	if ctx.text().chars().count() <= max {
		Outcome::Valid
	} else {
		Outcome::invalid(format!(
			"Value is longer than the maximum length of {max} characters"
		))
	}
}

fn parse_limit(name: &str, attribute: &str) -> Result<usize, Outcome> {
	attribute.trim().parse::<usize>().map_err(|_| {
		Outcome::inapplicable(format!("Invalid attribute value for {name}: `{attribute}`"))
	})
}
