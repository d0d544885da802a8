use super::ValidationContext;
use crate::errors::Outcome;

pub const MESSAGE: &str = "Input is required";

/// `required`: the value must not be empty
pub fn validate(ctx: &ValidationContext<'_>, _attribute: &str) -> Outcome {
	if ctx.is_empty() {
		Outcome::invalid(MESSAGE)
	} else {
		Outcome::Valid
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::validators::test_support::{check, input};
	use rstest::rstest;

	#[rstest]
	#[case("", false)]
	#[case(" ", true)]
	#[case("value", true)]
	fn test_required(#[case] value: &str, #[case] valid: bool) {
		// Arrange
		let field = input("text");

		// Act
		let outcome = check(&field, value, |ctx| validate(ctx, ""));

		// Assert
		assert_eq!(outcome.is_valid(), valid);
	}
}
