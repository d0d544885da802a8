use super::ValidationContext;
use crate::errors::Outcome;

/// `step`: only applicability is enforced; increments are not checked.
pub fn validate(_ctx: &ValidationContext<'_>, _attribute: &str) -> Outcome {
	Outcome::Valid
}
