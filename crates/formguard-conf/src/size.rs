//! Byte-size parsing and formatting
//!
//! Host limits are usually written the short way (`"2M"`, `"512k"`), while
//! messages shown to users need a readable unit (`"2.50 MB"`). Both directions
//! use powers of 1024.

use crate::settings::{SettingsError, SettingsResult};
use serde::{Deserialize, Deserializer};

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
const UNIT_LETTERS: &str = "bkmgtp";

/// Parse a byte size such as `"2M"`, `"512k"`, `"1.5 GB"` or `"1024"`.
///
/// The unit letter is case-insensitive and may be followed by an optional `b`.
/// A bare number is a byte count.
///
/// # Examples
///
/// ```
/// use formguard_conf::parse_size;
///
/// assert_eq!(parse_size("2M").unwrap(), 2 * 1024 * 1024);
/// assert_eq!(parse_size("512kb").unwrap(), 512 * 1024);
/// assert_eq!(parse_size("100").unwrap(), 100);
/// assert!(parse_size("lots").is_err());
/// ```
pub fn parse_size(input: &str) -> SettingsResult<u64> {
	let trimmed = input.trim();
	let split = trimmed
		.find(|c: char| !(c.is_ascii_digit() || c == '.'))
		.unwrap_or(trimmed.len());
	let (number, unit) = trimmed.split_at(split);

	let number: f64 = number
		.parse()
		.map_err(|_| SettingsError::InvalidSize(input.to_string()))?;
	if !number.is_finite() || number < 0.0 {
		return Err(SettingsError::InvalidSize(input.to_string()));
	}

	let mut unit = unit.trim().to_lowercase();
	if unit.len() == 2 && unit.ends_with('b') {
		unit.pop();
	}
	let exponent = match unit.as_str() {
		"" => 0,
		u if u.len() == 1 => UNIT_LETTERS
			.find(u)
			.ok_or_else(|| SettingsError::InvalidSize(input.to_string()))?,
		_ => return Err(SettingsError::InvalidSize(input.to_string())),
	};

	let bytes = number * 1024f64.powi(exponent as i32);
	Ok(bytes.round() as u64)
}

/// Format a byte count with two decimals and the largest fitting unit.
///
/// # Examples
///
/// ```
/// use formguard_conf::readable_size;
///
/// assert_eq!(readable_size(2_621_440), "2.50 MB");
/// assert_eq!(readable_size(512), "512.00 B");
/// assert_eq!(readable_size(1024), "1.00 KB");
/// ```
pub fn readable_size(bytes: u64) -> String {
	let mut value = bytes as f64;
	let mut unit = 0;
	while value >= 1024.0 && unit < UNITS.len() - 1 {
		value /= 1024.0;
		unit += 1;
	}
	format!("{:.2} {}", value, UNITS[unit])
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRepr {
	Bytes(u64),
	Text(String),
}

/// Serde helper accepting either a byte count or a size string.
pub(crate) fn deserialize_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
	D: Deserializer<'de>,
{
	match SizeRepr::deserialize(deserializer)? {
		SizeRepr::Bytes(bytes) => Ok(bytes),
		SizeRepr::Text(text) => parse_size(&text).map_err(serde::de::Error::custom),
	}
}
