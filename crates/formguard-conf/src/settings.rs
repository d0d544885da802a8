//! Form validation settings
//!
//! Settings can be loaded from a TOML file, a TOML string, or environment
//! variables. Every key is optional and falls back to its default.

use crate::method::Method;
use crate::size::{deserialize_size, parse_size};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_UPLOAD_MAX_FILESIZE: u64 = 2 * 1024 * 1024;
const DEFAULT_POST_MAX_SIZE: u64 = 8 * 1024 * 1024;

/// Host-side limits and defaults used while validating forms
///
/// # Examples
///
/// ```
/// use formguard_conf::FormSettings;
///
/// let settings = FormSettings::default()
///     .with_upload_max_filesize(1024)
///     .with_post_max_size(4096);
/// assert_eq!(settings.server_upload_limit(), 1024);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
	/// Largest single uploaded file the host accepts, in bytes
	#[serde(
		default = "default_upload_max_filesize",
		deserialize_with = "deserialize_size"
	)]
	pub upload_max_filesize: u64,

	/// Largest request body the host accepts, in bytes
	#[serde(default = "default_post_max_size", deserialize_with = "deserialize_size")]
	pub post_max_size: u64,

	/// Method used by forms that do not declare one
	#[serde(default)]
	pub default_method: Method,
}

fn default_upload_max_filesize() -> u64 {
	DEFAULT_UPLOAD_MAX_FILESIZE
}

fn default_post_max_size() -> u64 {
	DEFAULT_POST_MAX_SIZE
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			upload_max_filesize: DEFAULT_UPLOAD_MAX_FILESIZE,
			post_max_size: DEFAULT_POST_MAX_SIZE,
			default_method: Method::Get,
		}
	}
}

impl FormSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_upload_max_filesize(mut self, bytes: u64) -> Self {
		self.upload_max_filesize = bytes;
		self
	}

	pub fn with_post_max_size(mut self, bytes: u64) -> Self {
		self.post_max_size = bytes;
		self
	}

	pub fn with_default_method(mut self, method: Method) -> Self {
		self.default_method = method;
		self
	}

	/// The effective host limit for one uploaded file.
	///
	/// A file can never be larger than the whole request body, so this is the
	/// smaller of the two host limits.
	pub fn server_upload_limit(&self) -> u64 {
		self.upload_max_filesize.min(self.post_max_size)
	}

	/// Validate settings
	pub fn validate(&self) -> SettingsResult<()> {
		if self.upload_max_filesize == 0 {
			return Err(SettingsError::ValidationError(
				"upload_max_filesize must be greater than zero".to_string(),
			));
		}
		if self.post_max_size == 0 {
			return Err(SettingsError::ValidationError(
				"post_max_size must be greater than zero".to_string(),
			));
		}
		Ok(())
	}

	/// Parse settings from a TOML document
	pub fn from_toml_str(contents: &str) -> SettingsResult<Self> {
		let settings: FormSettings = toml::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Load settings from a TOML file
	pub fn from_file(path: impl Into<PathBuf>) -> SettingsResult<Self> {
		let path = path.into();
		if path.extension().and_then(|s| s.to_str()) != Some("toml") {
			return Err(SettingsError::UnsupportedFormat(path.display().to_string()));
		}
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;
		Self::from_toml_str(&contents)
	}

	/// Load settings from environment variables
	///
	/// Reads `FORMGUARD_UPLOAD_MAX_FILESIZE`, `FORMGUARD_POST_MAX_SIZE` and
	/// `FORMGUARD_DEFAULT_METHOD`; unset variables keep their defaults.
	pub fn from_env() -> SettingsResult<Self> {
		let mut settings = Self::default();

		if let Ok(size) = std::env::var("FORMGUARD_UPLOAD_MAX_FILESIZE") {
			settings.upload_max_filesize = parse_size(&size)?;
		}

		if let Ok(size) = std::env::var("FORMGUARD_POST_MAX_SIZE") {
			settings.post_max_size = parse_size(&size)?;
		}

		if let Ok(method) = std::env::var("FORMGUARD_DEFAULT_METHOD") {
			settings.default_method = method
				.parse()
				.map_err(|e: crate::MethodParseError| SettingsError::ParseError(e.to_string()))?;
		}

		settings.validate()?;
		Ok(settings)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Invalid size: {0}")]
	InvalidSize(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::io::Write;

	const ENV_KEYS: [&str; 3] = [
		"FORMGUARD_UPLOAD_MAX_FILESIZE",
		"FORMGUARD_POST_MAX_SIZE",
		"FORMGUARD_DEFAULT_METHOD",
	];

	fn load_with_env(vars: &[(&str, &str)]) -> SettingsResult<FormSettings> {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// Callers are marked #[serial] to ensure exclusive access to environment variables.
		unsafe {
			for key in ENV_KEYS {
				std::env::remove_var(key);
			}
			for (key, value) in vars {
				std::env::set_var(key, value);
			}
		}
		let result = FormSettings::from_env();
		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// Callers are marked #[serial] to ensure exclusive access to environment variables.
		unsafe {
			for key in ENV_KEYS {
				std::env::remove_var(key);
			}
		}
		result
	}

	#[rstest]
	fn test_default_settings() {
		// Act
		let settings = FormSettings::default();

		// Assert
		assert_eq!(settings.upload_max_filesize, 2 * 1024 * 1024);
		assert_eq!(settings.post_max_size, 8 * 1024 * 1024);
		assert_eq!(settings.default_method, Method::Get);
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_server_upload_limit_is_minimum() {
		// Arrange
		let settings = FormSettings::new()
			.with_upload_max_filesize(10 * 1024 * 1024)
			.with_post_max_size(3 * 1024 * 1024);

		// Act
		let limit = settings.server_upload_limit();

		// Assert
		assert_eq!(limit, 3 * 1024 * 1024);
	}

	#[rstest]
	fn test_from_toml_str_accepts_strings_and_integers() {
		// Arrange
		let toml = r#"
			upload_max_filesize = "512k"
			post_max_size = 1048576
			default_method = "POST"
		"#;

		// Act
		let settings = FormSettings::from_toml_str(toml).unwrap();

		// Assert
		assert_eq!(settings.upload_max_filesize, 512 * 1024);
		assert_eq!(settings.post_max_size, 1024 * 1024);
		assert_eq!(settings.default_method, Method::Post);
	}

	#[rstest]
	fn test_from_toml_str_missing_keys_use_defaults() {
		// Act
		let settings = FormSettings::from_toml_str("").unwrap();

		// Assert
		assert_eq!(settings, FormSettings::default());
	}

	#[rstest]
	#[case("upload_max_filesize = \"huge\"")]
	#[case("default_method = \"delete\"")]
	#[case("post_max_size = [1, 2]")]
	fn test_from_toml_str_rejects_bad_values(#[case] toml: &str) {
		// Act
		let result = FormSettings::from_toml_str(toml);

		// Assert
		assert!(matches!(result, Err(SettingsError::ParseError(_))));
	}

	#[rstest]
	fn test_from_toml_str_rejects_zero_limit() {
		// Act
		let result = FormSettings::from_toml_str("post_max_size = 0");

		// Assert
		assert!(matches!(result, Err(SettingsError::ValidationError(_))));
	}

	#[rstest]
	fn test_from_file_reads_toml() {
		// Arrange
		let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
		writeln!(file, "upload_max_filesize = \"1M\"").unwrap();

		// Act
		let settings = FormSettings::from_file(file.path()).unwrap();

		// Assert
		assert_eq!(settings.upload_max_filesize, 1024 * 1024);
	}

	#[rstest]
	fn test_from_file_rejects_other_formats() {
		// Act
		let result = FormSettings::from_file("settings.json");

		// Assert
		assert!(matches!(result, Err(SettingsError::UnsupportedFormat(_))));
	}

	#[rstest]
	#[serial(formguard_env)]
	fn test_from_env_without_variables_uses_defaults() {
		// Act
		let settings = load_with_env(&[]).unwrap();

		// Assert
		assert_eq!(settings, FormSettings::default());
	}

	#[rstest]
	#[serial(formguard_env)]
	fn test_from_env_overrides_defaults() {
		// Arrange
		let vars = [
			("FORMGUARD_UPLOAD_MAX_FILESIZE", "512k"),
			("FORMGUARD_POST_MAX_SIZE", "4M"),
			("FORMGUARD_DEFAULT_METHOD", "post"),
		];

		// Act
		let settings = load_with_env(&vars).unwrap();

		// Assert
		assert_eq!(settings.upload_max_filesize, 512 * 1024);
		assert_eq!(settings.post_max_size, 4 * 1024 * 1024);
		assert_eq!(settings.default_method, Method::Post);
	}

	#[rstest]
	#[serial(formguard_env)]
	fn test_from_env_rejects_unknown_method() {
		// Act
		let result = load_with_env(&[("FORMGUARD_DEFAULT_METHOD", "delete")]);

		// Assert
		assert!(matches!(result, Err(SettingsError::ParseError(_))));
	}

	#[rstest]
	#[serial(formguard_env)]
	#[case("FORMGUARD_UPLOAD_MAX_FILESIZE")]
	#[case("FORMGUARD_POST_MAX_SIZE")]
	fn test_from_env_rejects_bad_size(#[case] key: &str) {
		// Act
		let result = load_with_env(&[(key, "lots")]);

		// Assert
		assert!(matches!(result, Err(SettingsError::InvalidSize(_))));
	}

	#[rstest]
	#[serial(formguard_env)]
	fn test_from_env_rejects_zero_limit() {
		// Act
		let result = load_with_env(&[("FORMGUARD_POST_MAX_SIZE", "0")]);

		// Assert
		assert!(matches!(result, Err(SettingsError::ValidationError(_))));
	}
}
