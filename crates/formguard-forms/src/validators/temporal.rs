//! Date-family formats: `date`, `month`, `week`, `time` and `datetime-local`
//!
//! A value is accepted only when it matches the type's format and also names
//! a real point in time. `2024-02-30` has the right shape but is rejected.

use super::ValidationContext;
use crate::errors::Outcome;
use crate::field::SemanticType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("DATE_REGEX: invalid regex pattern")
});

static MONTH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(\d{4})-(\d{2})$").expect("MONTH_REGEX: invalid regex pattern")
});

static WEEK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(\d{4})-W(\d{2})$").expect("WEEK_REGEX: invalid regex pattern")
});

static TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(\d{2}):(\d{2})(?::(\d{2}))?$").expect("TIME_REGEX: invalid regex pattern")
});

static DATETIME_LOCAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2})(?::(\d{2}))?$")
		.expect("DATETIME_LOCAL_REGEX: invalid regex pattern")
});

/// The date-family input types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
	Date,
	Month,
	Week,
	Time,
	DateTimeLocal,
}

impl TemporalKind {
	pub fn from_semantic_type(kind: SemanticType) -> Option<Self> {
		match kind {
			SemanticType::Date => Some(TemporalKind::Date),
			SemanticType::Month => Some(TemporalKind::Month),
			SemanticType::Week => Some(TemporalKind::Week),
			SemanticType::Time => Some(TemporalKind::Time),
			SemanticType::DateTimeLocal => Some(TemporalKind::DateTimeLocal),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			TemporalKind::Date => "date",
			TemporalKind::Month => "month",
			TemporalKind::Week => "week",
			TemporalKind::Time => "time",
			TemporalKind::DateTimeLocal => "datetime-local",
		}
	}

	/// Human-readable format hint used in messages
	pub fn format_hint(&self) -> &'static str {
		match self {
			TemporalKind::Date => "YYYY-MM-DD",
			TemporalKind::Month => "YYYY-MM",
			TemporalKind::Week => "YYYY-Www",
			TemporalKind::Time => "HH:MM[:SS]",
			TemporalKind::DateTimeLocal => "YYYY-MM-DDTHH:MM[:SS]",
		}
	}

	fn regex(&self) -> &'static Regex {
		match self {
			TemporalKind::Date => &*DATE_REGEX,
			TemporalKind::Month => &*MONTH_REGEX,
			TemporalKind::Week => &*WEEK_REGEX,
			TemporalKind::Time => &*TIME_REGEX,
			TemporalKind::DateTimeLocal => &*DATETIME_LOCAL_REGEX,
		}
	}

	/// Parse `value` into a comparable point in time.
	///
	/// Months start on their first day, weeks on their ISO Monday and bare
	/// times on 1970-01-01.
	///
	/// # Examples
	///
	/// ```
	/// use formguard_forms::validators::temporal::TemporalKind;
	///
	/// assert!(TemporalKind::Week.parse("2024-W01").is_some());
	/// assert!(TemporalKind::Week.parse("2024-W54").is_none());
	/// assert!(TemporalKind::Date.parse("2024-02-29").is_some());
	/// assert!(TemporalKind::Date.parse("2023-02-29").is_none());
	/// assert!(TemporalKind::Time.parse("24:00").is_none());
	/// ```
	pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
		let caps = self.regex().captures(value)?;
		match self {
			TemporalKind::Date => ymd(&caps, 1)?.and_hms_opt(0, 0, 0),
			TemporalKind::Month => {
				NaiveDate::from_ymd_opt(number(&caps, 1)?, number(&caps, 2)?, 1)?.and_hms_opt(0, 0, 0)
			}
			TemporalKind::Week => {
				NaiveDate::from_isoywd_opt(number(&caps, 1)?, number(&caps, 2)?, Weekday::Mon)?
					.and_hms_opt(0, 0, 0)
			}
			TemporalKind::Time => {
				let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
				Some(epoch.and_time(hms(&caps, 1)?))
			}
			TemporalKind::DateTimeLocal => Some(ymd(&caps, 1)?.and_time(hms(&caps, 4)?)),
		}
	}
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
	caps.get(group)?.as_str().parse().ok()
}

fn ymd(caps: &Captures<'_>, first: usize) -> Option<NaiveDate> {
	NaiveDate::from_ymd_opt(
		number(caps, first)?,
		number(caps, first + 1)?,
		number(caps, first + 2)?,
	)
}

// Seconds are optional.
fn hms(caps: &Captures<'_>, first: usize) -> Option<NaiveTime> {
	let seconds = match caps.get(first + 2) {
		Some(_) => number(caps, first + 2)?,
		None => 0,
	};
	NaiveTime::from_hms_opt(number(caps, first)?, number(caps, first + 1)?, seconds)
}

/// Type check for date-family fields
pub fn validate(ctx: &ValidationContext<'_>) -> Outcome {
	let value = ctx.text();
	let Some(kind) = TemporalKind::from_semantic_type(ctx.field.semantic_type()) else {
		return Outcome::Valid;
	};
	if value.is_empty() || kind.parse(value).is_some() {
		Outcome::Valid
	} else {
		Outcome::invalid(format!(
			"Value `{value}` is not a valid {} (expected {})",
			kind.as_str(),
			kind.format_hint()
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::validators::test_support::{check, input};
	use rstest::rstest;

	#[rstest]
	#[case(TemporalKind::Date, "2024-06-15", true)]
	#[case(TemporalKind::Date, "2024-6-15", false)]
	#[case(TemporalKind::Date, "2024-13-01", false)]
	#[case(TemporalKind::Month, "2024-12", true)]
	#[case(TemporalKind::Month, "2024-00", false)]
	#[case(TemporalKind::Week, "2020-W53", true)]
	#[case(TemporalKind::Week, "2021-W53", false)]
	#[case(TemporalKind::Week, "2024-w01", false)]
	#[case(TemporalKind::Time, "09:30", true)]
	#[case(TemporalKind::Time, "09:30:59", true)]
	#[case(TemporalKind::Time, "09:60", false)]
	#[case(TemporalKind::DateTimeLocal, "2024-06-15T09:30", true)]
	#[case(TemporalKind::DateTimeLocal, "2024-06-15 09:30", false)]
	fn test_parse(#[case] kind: TemporalKind, #[case] value: &str, #[case] valid: bool) {
		assert_eq!(kind.parse(value).is_some(), valid);
	}

	#[rstest]
	fn test_months_order_chronologically() {
		// Act
		let earlier = TemporalKind::Month.parse("2023-12").unwrap();
		let later = TemporalKind::Month.parse("2024-01").unwrap();

		// Assert
		assert!(earlier < later);
	}

	#[rstest]
	fn test_type_check_message_carries_format() {
		// Arrange
		let field = input("week");

		// Act
		let outcome = check(&field, "2024-01", validate);

		// Assert
		assert_eq!(
			outcome,
			Outcome::invalid("Value `2024-01` is not a valid week (expected YYYY-Www)")
		);
	}
}
