//! Submission methods

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP method a form submits its values under.
///
/// `Get` values arrive in the query-string partition of the value source,
/// `Post` values in the body partition. Parsing is case-insensitive.
///
/// # Examples
///
/// ```
/// use formguard_conf::Method;
///
/// assert_eq!("POST".parse::<Method>().unwrap(), Method::Post);
/// assert_eq!(Method::default(), Method::Get);
/// assert!("dialog".parse::<Method>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Method {
	#[default]
	Get,
	Post,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported form method: {0}")]
pub struct MethodParseError(pub String);

impl Method {
	pub fn as_str(&self) -> &'static str {
		match self {
			Method::Get => "get",
			Method::Post => "post",
		}
	}
}

impl FromStr for Method {
	type Err = MethodParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"get" => Ok(Method::Get),
			"post" => Ok(Method::Post),
			_ => Err(MethodParseError(s.to_string())),
		}
	}
}

impl TryFrom<String> for Method {
	type Error = MethodParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
