//! Validation outcomes, per-field error accumulation and construction errors

use std::collections::BTreeMap;

/// Result of running one validator against one value.
///
/// `Invalid` is a user error: the submitted value breaks the constraint.
/// `Inapplicable` is a configuration alert: the attribute makes no sense on
/// this element, or its own value is malformed. Only `Invalid` affects
/// validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Valid,
	Invalid(String),
	Inapplicable(String),
}

impl Outcome {
	pub fn invalid(message: impl Into<String>) -> Self {
		Outcome::Invalid(message.into())
	}

	pub fn inapplicable(message: impl Into<String>) -> Self {
		Outcome::Inapplicable(message.into())
	}

	pub fn is_valid(&self) -> bool {
		matches!(self, Outcome::Valid)
	}
}

/// Per-field accumulator for one validation run.
///
/// Both channels are keyed by value index; scalar fields only ever use index 0.
/// A fresh sink is created for every run, so repeated runs never merge.
///
/// # Examples
///
/// ```
/// use formguard_forms::{ErrorSink, Outcome};
///
/// let mut sink = ErrorSink::new();
/// sink.record(1, Outcome::invalid("Input is required"));
/// sink.record(0, Outcome::inapplicable("Input `color` doesn't support this attribute: required"));
///
/// assert!(sink.has_user_errors());
/// assert_eq!(sink.user_errors_at(1), ["Input is required"]);
/// assert!(sink.user_errors_at(0).is_empty());
/// assert_eq!(sink.config_alerts().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSink {
	user_errors: BTreeMap<usize, Vec<String>>,
	config_alerts: BTreeMap<usize, Vec<String>>,
}

impl ErrorSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Route an outcome into the matching channel. `Valid` is dropped.
	pub fn record(&mut self, index: usize, outcome: Outcome) {
		match outcome {
			Outcome::Valid => {}
			Outcome::Invalid(message) => self.push_user_error(index, message),
			Outcome::Inapplicable(message) => self.push_config_alert(index, message),
		}
	}

	pub fn push_user_error(&mut self, index: usize, message: impl Into<String>) {
		self.user_errors
			.entry(index)
			.or_default()
			.push(message.into());
	}

	pub fn push_config_alert(&mut self, index: usize, message: impl Into<String>) {
		self.config_alerts
			.entry(index)
			.or_default()
			.push(message.into());
	}

	pub fn user_errors_at(&self, index: usize) -> &[String] {
		self.user_errors
			.get(&index)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	pub fn config_alerts_at(&self, index: usize) -> &[String] {
		self.config_alerts
			.get(&index)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// All user errors, in index order
	pub fn user_errors(&self) -> Vec<&str> {
		self.user_errors
			.values()
			.flatten()
			.map(String::as_str)
			.collect()
	}

	/// All config alerts, in index order
	pub fn config_alerts(&self) -> Vec<&str> {
		self.config_alerts
			.values()
			.flatten()
			.map(String::as_str)
			.collect()
	}

	/// Indices that carry at least one user error
	pub fn invalid_indices(&self) -> impl Iterator<Item = usize> + '_ {
		self.user_errors.keys().copied()
	}

	pub fn has_user_errors(&self) -> bool {
		!self.user_errors.is_empty()
	}

	pub fn has_config_alerts(&self) -> bool {
		!self.config_alerts.is_empty()
	}

	pub fn is_empty(&self) -> bool {
		self.user_errors.is_empty() && self.config_alerts.is_empty()
	}
}

/// Fatal errors raised while building a field from an element descriptor.
///
/// These abort construction of that one element; there is no field to
/// validate afterwards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
	#[error("Element descriptor has no tag name")]
	MissingTagName,
	#[error("Element `{0}` is not a form control")]
	UnsupportedTag(String),
	#[error("Element `{0}` has an attribute without a name")]
	EmptyAttributeName(String),
}

pub type ConstructionResult<T> = Result<T, ConstructionError>;
