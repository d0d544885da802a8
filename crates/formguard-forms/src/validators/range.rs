//! `min` and `max`
//!
//! `number` and `range` compare numerically. Date-family types parse both the
//! attribute and the value in the field's own format and compare
//! chronologically. A bound that does not parse is a config alert; a value
//! that does not parse is a user error.

use super::ValidationContext;
use super::format::parse_number;
use super::temporal::TemporalKind;
use crate::errors::Outcome;
use crate::field::SemanticType;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
enum Bound {
	Min,
	Max,
}

impl Bound {
	fn attribute(&self) -> &'static str {
		match self {
			Bound::Min => "min",
			Bound::Max => "max",
		}
	}

	fn violated_by(&self, ordering: Ordering) -> bool {
		match self {
			Bound::Min => ordering == Ordering::Less,
			Bound::Max => ordering == Ordering::Greater,
		}
	}

	fn message(&self, value: &str, bound: &str) -> String {
		match self {
			Bound::Min => format!("Value `{value}` lower than required minimum: {bound}"),
			Bound::Max => format!("Value `{value}` higher than allowed maximum: {bound}"),
		}
	}
}

pub fn validate_min(ctx: &ValidationContext<'_>, attribute: &str) -> Outcome {
	compare(ctx, attribute, Bound::Min)
}

pub fn validate_max(ctx: &ValidationContext<'_>, attribute: &str) -> Outcome {
	compare(ctx, attribute, Bound::Max)
}

fn compare(ctx: &ValidationContext<'_>, attribute: &str, bound: Bound) -> Outcome {
	let value = ctx.text();
	let bad_attribute = || {
		Outcome::inapplicable(format!(
			"Invalid attribute value for {}: `{attribute}`",
			bound.attribute()
		))
	};

	let ordering = match ctx.field.semantic_type() {
		SemanticType::Number | SemanticType::Range => {
			let Some(limit) = parse_number(attribute.trim()) else {
				return bad_attribute();
			};
			if value.is_empty() {
				return Outcome::Valid;
			}
			let Some(number) = parse_number(value) else {
				return Outcome::invalid("Value has an invalid format");
			};
			number.partial_cmp(&limit)
		}
		other => {
			let Some(kind) = TemporalKind::from_semantic_type(other) else {
				return Outcome::Valid;
			};
			let Some(limit) = kind.parse(attribute.trim()) else {
				return bad_attribute();
			};
			if value.is_empty() {
				return Outcome::Valid;
			}
			let Some(moment) = kind.parse(value) else {
				return Outcome::invalid("Value has an invalid format");
			};
			Some(moment.cmp(&limit))
		}
	};

	match ordering {
		Some(ordering) if bound.violated_by(ordering) => {
			Outcome::invalid(bound.message(value, attribute.trim()))
		}
		_ => Outcome::Valid,
	}
}
