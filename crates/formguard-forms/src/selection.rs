//! Option lists for `<select>` fields

use crate::element::OptionDescriptor;

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
	pub value: String,
	pub text: Option<String>,
}

/// Ordered option list owned by a select field.
///
/// Membership checks compare against `value` only; display text is never
/// consulted.
///
/// # Examples
///
/// ```
/// use formguard_forms::SelectionSet;
///
/// let mut options = SelectionSet::new();
/// options.add("1", Some("One"));
/// options.add("2", None);
///
/// assert!(options.contains("1"));
/// assert!(!options.contains("One"));
/// assert_eq!(options.values().collect::<Vec<_>>(), vec!["1", "2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
	options: Vec<SelectOption>,
}

impl SelectionSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build from parser output, in document order
	pub fn from_descriptors<'a>(descriptors: impl IntoIterator<Item = &'a OptionDescriptor>) -> Self {
		let mut set = Self::new();
		for descriptor in descriptors {
			set.add(descriptor.submitted_value(), descriptor.text.as_deref());
		}
		set
	}

	pub fn add(&mut self, value: impl Into<String>, text: Option<&str>) {
		self.options.push(SelectOption {
			value: value.into(),
			text: text.map(str::to_string),
		});
	}

	pub fn extend<V, T>(&mut self, options: impl IntoIterator<Item = (V, Option<T>)>)
	where
		V: Into<String>,
		T: Into<String>,
	{
		for (value, text) in options {
			self.options.push(SelectOption {
				value: value.into(),
				text: text.map(Into::into),
			});
		}
	}

	pub fn contains(&self, value: &str) -> bool {
		self.options.iter().any(|option| option.value == value)
	}

	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.options.iter().map(|option| option.value.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = &SelectOption> {
		self.options.iter()
	}

	pub fn len(&self) -> usize {
		self.options.len()
	}

	pub fn is_empty(&self) -> bool {
		self.options.is_empty()
	}
}
