//! Element descriptors produced by an external markup parser
//!
//! The validation core never parses markup. A parser walks the document and
//! hands over one [`ElementDescriptor`] per element, in document order.

use indexmap::IndexMap;

/// One `<option>` child of a `<select>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionDescriptor {
	/// Explicit `value` attribute, if the option had one
	pub value: Option<String>,
	/// Text content of the option
	pub text: Option<String>,
}

impl OptionDescriptor {
	/// Option with an explicit `value` attribute
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: Some(value.into()),
			text: None,
		}
	}

	/// Option without a `value` attribute, only text content
	pub fn from_text(text: impl Into<String>) -> Self {
		Self {
			value: None,
			text: Some(text.into()),
		}
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	/// The value this option submits.
	///
	/// Without an explicit `value` attribute, the text content is submitted.
	///
	/// # Examples
	///
	/// ```
	/// use formguard_forms::OptionDescriptor;
	///
	/// assert_eq!(OptionDescriptor::new("1").with_text("One").submitted_value(), "1");
	/// assert_eq!(OptionDescriptor::from_text("Two").submitted_value(), "Two");
	/// ```
	pub fn submitted_value(&self) -> &str {
		self.value
			.as_deref()
			.or(self.text.as_deref())
			.unwrap_or_default()
	}
}

/// A decoded markup element: tag name, ordered attributes and, for `<select>`,
/// its options.
///
/// # Examples
///
/// ```
/// use formguard_forms::{ElementDescriptor, OptionDescriptor};
///
/// let element = ElementDescriptor::new("select")
///     .attr("name", "size")
///     .option(OptionDescriptor::new("s").with_text("Small"))
///     .option(OptionDescriptor::new("l").with_text("Large"));
///
/// assert_eq!(element.attribute("NAME"), Some("size"));
/// assert_eq!(element.options.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementDescriptor {
	pub tag: String,
	pub attributes: IndexMap<String, String>,
	pub options: Vec<OptionDescriptor>,
}

impl ElementDescriptor {
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attributes: IndexMap::new(),
			options: Vec::new(),
		}
	}

	/// Append an attribute, keeping document order
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());
		self
	}

	/// Append a boolean attribute such as `required`
	pub fn flag(self, name: impl Into<String>) -> Self {
		self.attr(name, "")
	}

	pub fn option(mut self, option: OptionDescriptor) -> Self {
		self.options.push(option);
		self
	}

	/// Case-insensitive attribute lookup
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_builder_preserves_attribute_order() {
		// Arrange
		let element = ElementDescriptor::new("input")
			.attr("type", "text")
			.flag("required")
			.attr("pattern", "[a-z]+");

		// Act
		let names: Vec<&str> = element.attributes.keys().map(String::as_str).collect();

		// Assert
		assert_eq!(names, vec!["type", "required", "pattern"]);
		assert_eq!(element.attribute("required"), Some(""));
	}

	#[rstest]
	fn test_attribute_lookup_ignores_case() {
		// Arrange
		let element = ElementDescriptor::new("form").attr("Method", "POST");

		// Act + Assert
		assert_eq!(element.attribute("method"), Some("POST"));
		assert_eq!(element.attribute("action"), None);
	}

	#[rstest]
	fn test_option_without_value_or_text_submits_empty_string() {
		assert_eq!(OptionDescriptor::default().submitted_value(), "");
	}
}
