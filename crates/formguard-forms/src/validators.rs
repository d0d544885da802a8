//! Constraint validators
//!
//! Every validator is a plain function returning an [`Outcome`]. Attribute
//! validators receive the attribute value; type checks only see the value.
//! Applicability is decided by the [`crate::registry`] before a validator is
//! called, so the functions here assume they apply to the field.

pub mod accept;
pub mod format;
pub mod length;
pub mod membership;
pub mod pattern;
pub mod range;
pub mod required;
pub mod step;
pub mod temporal;
pub mod upload;

use crate::errors::Outcome;
use crate::field::Field;
use crate::value_source::SubmittedValue;

/// Upload limits in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
	/// Host limit, already the smaller of the per-file and request limits
	pub server: u64,
	/// The form's own `MAX_FILE_SIZE`, if declared
	pub form: Option<u64>,
}

impl UploadLimits {
	/// The limit an upload was actually held to
	///
	/// # Examples
	///
	/// ```
	/// use formguard_forms::UploadLimits;
	///
	/// let limits = UploadLimits { server: 2048, form: Some(1024) };
	/// assert_eq!(limits.effective(), 1024);
	/// assert_eq!(UploadLimits { server: 2048, form: None }.effective(), 2048);
	/// ```
	pub fn effective(&self) -> u64 {
		self.form
			.map_or(self.server, |form| form.min(self.server))
	}
}

/// What a validator sees: the field, one resolved value and the upload limits
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
	pub field: &'a Field,
	pub value: &'a SubmittedValue,
	pub limits: UploadLimits,
}

impl ValidationContext<'_> {
	/// Textual value; upload descriptors read as the empty string
	pub fn text(&self) -> &str {
		self.value.as_text().unwrap_or_default()
	}

	pub fn is_empty(&self) -> bool {
		self.value.is_empty()
	}
}

/// Validator bound to a constraint attribute. The second argument is the
/// attribute's value.
pub type AttributeValidatorFn = fn(&ValidationContext<'_>, &str) -> Outcome;

/// Validator bound to a semantic type, run once per value
pub type TypeValidatorFn = fn(&ValidationContext<'_>) -> Outcome;
