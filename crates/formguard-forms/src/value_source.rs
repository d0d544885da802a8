//! Submitted values and where they come from
//!
//! The core reads submitted values through the [`ValueSource`] trait, passed in
//! at validation time. The HTTP-handling shell implements it over its decoded
//! request; tests use [`MemoryValueSource`].

use formguard_conf::Method;
use std::collections::HashMap;

/// Outcome the host reported for one uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadStatus {
	/// The file arrived intact
	Ok,
	/// Larger than the host's per-file or request limit
	ServerSizeExceeded,
	/// Larger than the form's own `MAX_FILE_SIZE` limit
	FormSizeExceeded,
	/// Only part of the file arrived
	Partial,
	/// No file was selected
	NoFile,
	/// The host had no temporary directory to stage the file in
	NoTempStorage,
	/// The host failed to write the staged file
	WriteFailure,
}

/// Metadata of an already staged upload. The core never touches the bytes.
///
/// # Examples
///
/// ```
/// use formguard_forms::{UploadedFile, UploadStatus};
///
/// let file = UploadedFile::ok("avatar.png", 2048).with_detected_type("image/png");
/// assert_eq!(file.status, UploadStatus::Ok);
/// assert_eq!(file.extension().as_deref(), Some("png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
	pub status: UploadStatus,
	pub size: Option<u64>,
	pub name: Option<String>,
	pub detected_type: Option<String>,
}

impl UploadedFile {
	/// A successfully staged file
	pub fn ok(name: impl Into<String>, size: u64) -> Self {
		Self {
			status: UploadStatus::Ok,
			size: Some(size),
			name: Some(name.into()),
			detected_type: None,
		}
	}

	/// An upload the host could not complete
	pub fn failed(status: UploadStatus) -> Self {
		Self {
			status,
			size: None,
			name: None,
			detected_type: None,
		}
	}

	pub fn with_size(mut self, size: u64) -> Self {
		self.size = Some(size);
		self
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_detected_type(mut self, mime: impl Into<String>) -> Self {
		self.detected_type = Some(mime.into());
		self
	}

	/// Lower-cased extension of the client-side file name
	pub fn extension(&self) -> Option<String> {
		let name = self.name.as_deref()?;
		let (stem, ext) = name.rsplit_once('.')?;
		if stem.is_empty() || ext.is_empty() {
			return None;
		}
		Some(ext.to_lowercase())
	}
}

/// One resolved value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedValue {
	Text(String),
	Upload(UploadedFile),
}

impl SubmittedValue {
	pub fn as_text(&self) -> Option<&str> {
		match self {
			SubmittedValue::Text(text) => Some(text),
			SubmittedValue::Upload(_) => None,
		}
	}

	pub fn as_upload(&self) -> Option<&UploadedFile> {
		match self {
			SubmittedValue::Upload(file) => Some(file),
			SubmittedValue::Text(_) => None,
		}
	}

	/// Empty text. An upload descriptor is never empty; its status says
	/// whether a file arrived.
	pub fn is_empty(&self) -> bool {
		matches!(self, SubmittedValue::Text(text) if text.is_empty())
	}
}

impl From<&str> for SubmittedValue {
	fn from(value: &str) -> Self {
		SubmittedValue::Text(value.to_string())
	}
}

impl From<String> for SubmittedValue {
	fn from(value: String) -> Self {
		SubmittedValue::Text(value)
	}
}

impl From<UploadedFile> for SubmittedValue {
	fn from(file: UploadedFile) -> Self {
		SubmittedValue::Upload(file)
	}
}

/// Read-only access to the submitted request values.
///
/// `None` means the key was not submitted at all, which is different from a
/// submitted empty string. Values for one key come back in the order they
/// were received.
pub trait ValueSource {
	/// Text values of `key` in the partition for `method`
	fn values(&self, method: Method, key: &str) -> Option<Vec<String>>;

	/// Upload descriptors of `key` from the file-upload channel
	fn uploads(&self, key: &str) -> Option<Vec<UploadedFile>>;
}

impl<T: ValueSource + ?Sized> ValueSource for &T {
	fn values(&self, method: Method, key: &str) -> Option<Vec<String>> {
		(**self).values(method, key)
	}

	fn uploads(&self, key: &str) -> Option<Vec<UploadedFile>> {
		(**self).uploads(key)
	}
}

/// In-memory value source
///
/// # Examples
///
/// ```
/// use formguard_forms::{MemoryValueSource, Method, ValueSource};
///
/// let source = MemoryValueSource::new()
///     .with_query("q", "rust")
///     .with_body("tags[]", "a")
///     .with_body("tags[]", "b");
///
/// assert_eq!(source.values(Method::Get, "q"), Some(vec!["rust".to_string()]));
/// assert_eq!(source.values(Method::Post, "q"), None);
/// assert_eq!(source.values(Method::Post, "tags[]").map(|v| v.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryValueSource {
	query: HashMap<String, Vec<String>>,
	body: HashMap<String, Vec<String>>,
	files: HashMap<String, Vec<UploadedFile>>,
}

impl MemoryValueSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a query-string value under `key`
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(Method::Get, key, value);
		self
	}

	/// Append a body value under `key`
	pub fn with_body(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(Method::Post, key, value);
		self
	}

	/// Append an upload descriptor under `key`
	pub fn with_upload(mut self, key: impl Into<String>, file: UploadedFile) -> Self {
		self.files.entry(key.into()).or_default().push(file);
		self
	}

	pub fn insert(&mut self, method: Method, key: impl Into<String>, value: impl Into<String>) {
		let partition = match method {
			Method::Get => &mut self.query,
			Method::Post => &mut self.body,
		};
		partition.entry(key.into()).or_default().push(value.into());
	}
}

impl ValueSource for MemoryValueSource {
	fn values(&self, method: Method, key: &str) -> Option<Vec<String>> {
		let partition = match method {
			Method::Get => &self.query,
			Method::Post => &self.body,
		};
		partition.get(key).cloned()
	}

	fn uploads(&self, key: &str) -> Option<Vec<UploadedFile>> {
		self.files.get(key).cloned()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_memory_source_partitions_are_separate() {
		// Arrange
		let source = MemoryValueSource::new()
			.with_query("name", "from-query")
			.with_body("name", "from-body");

		// Act
		let query = source.values(Method::Get, "name");
		let body = source.values(Method::Post, "name");

		// Assert
		assert_eq!(query, Some(vec!["from-query".to_string()]));
		assert_eq!(body, Some(vec!["from-body".to_string()]));
	}

	#[rstest]
	fn test_memory_source_distinguishes_absent_from_empty() {
		// Arrange
		let source = MemoryValueSource::new().with_query("empty", "");

		// Act + Assert
		assert_eq!(source.values(Method::Get, "empty"), Some(vec![String::new()]));
		assert_eq!(source.values(Method::Get, "missing"), None);
		assert_eq!(source.uploads("empty"), None);
	}

	#[rstest]
	#[case(Some("report.PDF"), Some("pdf"))]
	#[case(Some("archive.tar.gz"), Some("gz"))]
	#[case(Some(".bashrc"), None)]
	#[case(Some("README"), None)]
	#[case(None, None)]
	fn test_uploaded_file_extension(#[case] name: Option<&str>, #[case] expected: Option<&str>) {
		// Arrange
		let mut file = UploadedFile::failed(UploadStatus::Ok);
		file.name = name.map(str::to_string);

		// Act
		let extension = file.extension();

		// Assert
		assert_eq!(extension.as_deref(), expected);
	}

	#[rstest]
	fn test_submitted_value_emptiness() {
		assert!(SubmittedValue::from("").is_empty());
		assert!(!SubmittedValue::from("x").is_empty());
		assert!(!SubmittedValue::from(UploadedFile::failed(UploadStatus::NoFile)).is_empty());
	}
}
