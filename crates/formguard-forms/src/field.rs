//! Form controls decoded from element descriptors

use crate::element::ElementDescriptor;
use crate::engine::{ValidationEngine, ValidationReport};
use crate::errors::{ConstructionError, ConstructionResult, ErrorSink};
use crate::selection::SelectionSet;
use crate::value_source::ValueSource;
use formguard_conf::Method;
use indexmap::IndexMap;
use indexmap::map::Entry;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// A bracket pair, empty or holding an alphanumeric index: `items[]`, `items[3]`,
// `address[city]`.
static ARRAY_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\[([0-9a-zA-Z]*)\]").expect("ARRAY_NAME_REGEX: invalid regex pattern")
});

/// Tags that decode into a [`Field`]
pub(crate) fn is_control_tag(tag: &str) -> bool {
	matches!(tag, "input" | "select" | "textarea" | "button")
}

/// Effective kind of a form control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
	Text,
	Search,
	Url,
	Tel,
	Email,
	Password,
	Number,
	Range,
	Date,
	Time,
	Week,
	Month,
	DateTimeLocal,
	Checkbox,
	Radio,
	File,
	Hidden,
	Button,
	Submit,
	Reset,
	Color,
	Image,
	Textarea,
	Select,
}

impl SemanticType {
	pub const ALL: [SemanticType; 24] = [
		SemanticType::Text,
		SemanticType::Search,
		SemanticType::Url,
		SemanticType::Tel,
		SemanticType::Email,
		SemanticType::Password,
		SemanticType::Number,
		SemanticType::Range,
		SemanticType::Date,
		SemanticType::Time,
		SemanticType::Week,
		SemanticType::Month,
		SemanticType::DateTimeLocal,
		SemanticType::Checkbox,
		SemanticType::Radio,
		SemanticType::File,
		SemanticType::Hidden,
		SemanticType::Button,
		SemanticType::Submit,
		SemanticType::Reset,
		SemanticType::Color,
		SemanticType::Image,
		SemanticType::Textarea,
		SemanticType::Select,
	];

	/// Parse the `type` attribute of an `<input>`; unknown values yield `None`
	pub fn from_input_type(value: &str) -> Option<Self> {
		let parsed = match value.trim().to_lowercase().as_str() {
			"text" => SemanticType::Text,
			"search" => SemanticType::Search,
			"url" => SemanticType::Url,
			"tel" => SemanticType::Tel,
			"email" => SemanticType::Email,
			"password" => SemanticType::Password,
			"number" => SemanticType::Number,
			"range" => SemanticType::Range,
			"date" => SemanticType::Date,
			"time" => SemanticType::Time,
			"week" => SemanticType::Week,
			"month" => SemanticType::Month,
			"datetime-local" => SemanticType::DateTimeLocal,
			"checkbox" => SemanticType::Checkbox,
			"radio" => SemanticType::Radio,
			"file" => SemanticType::File,
			"hidden" => SemanticType::Hidden,
			"button" => SemanticType::Button,
			"submit" => SemanticType::Submit,
			"reset" => SemanticType::Reset,
			"color" => SemanticType::Color,
			"image" => SemanticType::Image,
			_ => return None,
		};
		Some(parsed)
	}

	/// Derive the type from the tag name and the raw `type` attribute.
	///
	/// `textarea` and `select` are tag-derived. `<button>` is `submit` unless
	/// its type says `button` or `reset`. Everything else reads the `type`
	/// attribute, falling back to `text` when it is absent or unknown.
	///
	/// # Examples
	///
	/// ```
	/// use formguard_forms::SemanticType;
	///
	/// assert_eq!(SemanticType::resolve("input", Some("EMAIL")), SemanticType::Email);
	/// assert_eq!(SemanticType::resolve("input", None), SemanticType::Text);
	/// assert_eq!(SemanticType::resolve("input", Some("fancy")), SemanticType::Text);
	/// assert_eq!(SemanticType::resolve("select", Some("email")), SemanticType::Select);
	/// assert_eq!(SemanticType::resolve("button", None), SemanticType::Submit);
	/// ```
	pub fn resolve(tag: &str, type_attribute: Option<&str>) -> Self {
		match tag {
			"textarea" => SemanticType::Textarea,
			"select" => SemanticType::Select,
			"button" => match type_attribute.and_then(Self::from_input_type) {
				Some(kind @ (SemanticType::Button | SemanticType::Reset)) => kind,
				_ => SemanticType::Submit,
			},
			_ => match type_attribute {
				None => SemanticType::Text,
				Some(raw) => Self::from_input_type(raw).unwrap_or_else(|| {
					tracing::debug!(r#type = raw, "unknown input type, falling back to text");
					SemanticType::Text
				}),
			},
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			SemanticType::Text => "text",
			SemanticType::Search => "search",
			SemanticType::Url => "url",
			SemanticType::Tel => "tel",
			SemanticType::Email => "email",
			SemanticType::Password => "password",
			SemanticType::Number => "number",
			SemanticType::Range => "range",
			SemanticType::Date => "date",
			SemanticType::Time => "time",
			SemanticType::Week => "week",
			SemanticType::Month => "month",
			SemanticType::DateTimeLocal => "datetime-local",
			SemanticType::Checkbox => "checkbox",
			SemanticType::Radio => "radio",
			SemanticType::File => "file",
			SemanticType::Hidden => "hidden",
			SemanticType::Button => "button",
			SemanticType::Submit => "submit",
			SemanticType::Reset => "reset",
			SemanticType::Color => "color",
			SemanticType::Image => "image",
			SemanticType::Textarea => "textarea",
			SemanticType::Select => "select",
		}
	}
}

impl fmt::Display for SemanticType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Parsed `name` attribute
///
/// # Examples
///
/// ```
/// use formguard_forms::FieldName;
///
/// let name = FieldName::parse("items[]");
/// assert!(name.is_array());
/// assert_eq!(name.base(), "items");
/// assert_eq!(name.index(), Some(""));
///
/// let scalar = FieldName::parse("email");
/// assert!(!scalar.is_array());
/// assert_eq!(scalar.base(), "email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldName {
	raw: String,
	base: String,
	index: Option<String>,
}

impl FieldName {
	pub fn parse(raw: &str) -> Self {
		let index = ARRAY_NAME_REGEX
			.captures(raw)
			.and_then(|caps| caps.get(1))
			.map(|m| m.as_str().to_string());
		let base = match index {
			Some(_) => raw.split('[').next().unwrap_or_default().to_string(),
			None => raw.to_string(),
		};
		Self {
			raw: raw.to_string(),
			base,
			index,
		}
	}

	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Name before the first bracket
	pub fn base(&self) -> &str {
		&self.base
	}

	/// Contents of the first bracket pair for array-shaped names
	pub fn index(&self) -> Option<&str> {
		self.index.as_deref()
	}

	pub fn is_array(&self) -> bool {
		self.index.is_some()
	}
}

/// One decoded form control and the state of its last validation run.
///
/// The semantic type and attribute map are fixed at construction.
///
/// # Examples
///
/// ```
/// use formguard_forms::{ElementDescriptor, Field, SemanticType};
///
/// let field = Field::from_element(
///     &ElementDescriptor::new("INPUT").attr("Type", "number").attr("MIN", "10").attr("name", "age"),
/// )
/// .unwrap();
///
/// assert_eq!(field.semantic_type(), SemanticType::Number);
/// assert_eq!(field.attribute("min"), Some("10"));
/// assert_eq!(field.name(), Some("age"));
/// ```
#[derive(Debug, Clone)]
pub struct Field {
	tag: String,
	semantic_type: SemanticType,
	attributes: IndexMap<String, String>,
	attributes_imported: bool,
	field_name: Option<FieldName>,
	method: Option<Method>,
	selection: Option<SelectionSet>,
	dynamic: bool,
	errors: ErrorSink,
	validated_on: Vec<&'static str>,
}

impl Field {
	/// Build a field from one element descriptor.
	///
	/// Fails when the descriptor has no tag name, is not a form control
	/// (`input`, `select`, `textarea`, `button`), or carries an attribute with
	/// an empty name.
	pub fn from_element(element: &ElementDescriptor) -> ConstructionResult<Self> {
		let tag = element.tag.trim().to_lowercase();
		if tag.is_empty() {
			return Err(ConstructionError::MissingTagName);
		}
		if !is_control_tag(&tag) {
			return Err(ConstructionError::UnsupportedTag(tag));
		}

		let mut field = Self {
			tag,
			semantic_type: SemanticType::Text,
			attributes: IndexMap::new(),
			attributes_imported: false,
			field_name: None,
			method: None,
			selection: None,
			dynamic: false,
			errors: ErrorSink::new(),
			validated_on: Vec::new(),
		};
		field.import_attributes(&element.attributes)?;
		field.semantic_type = SemanticType::resolve(&field.tag, field.attribute("type"));
		field.field_name = field.attribute("name").map(FieldName::parse);

		if field.semantic_type == SemanticType::Select {
			field.selection = Some(SelectionSet::from_descriptors(&element.options));
		}

		Ok(field)
	}

	// Populates the attribute map exactly once; later calls keep the first import.
	fn import_attributes(&mut self, attributes: &IndexMap<String, String>) -> ConstructionResult<()> {
		if self.attributes_imported {
			return Ok(());
		}
		let mut imported = IndexMap::with_capacity(attributes.len());
		for (name, value) in attributes {
			let name = name.trim().to_lowercase();
			if name.is_empty() {
				return Err(ConstructionError::EmptyAttributeName(self.tag.clone()));
			}
			if let Entry::Vacant(slot) = imported.entry(name) {
				slot.insert(value.clone());
			}
		}
		self.attributes = imported;
		self.attributes_imported = true;
		Ok(())
	}

	/// Lower-cased tag name
	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn semantic_type(&self) -> SemanticType {
		self.semantic_type
	}

	/// Attributes in document order, names lower-cased
	pub fn attributes(&self) -> &IndexMap<String, String> {
		&self.attributes
	}

	/// Case-insensitive attribute lookup
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.get(name.to_lowercase().as_str())
			.map(String::as_str)
	}

	pub fn has_attribute(&self, name: &str) -> bool {
		self.attribute(name).is_some()
	}

	/// Lower-cased raw `type` attribute
	pub fn input_type(&self) -> Option<String> {
		self.attribute("type").map(str::to_lowercase)
	}

	/// Scalar field name.
	///
	/// Array-shaped names (`items[]`) have no scalar name and return `None`;
	/// use [`Field::base_name`] or [`Field::lookup_key`] for those.
	pub fn name(&self) -> Option<&str> {
		self.field_name
			.as_ref()
			.filter(|name| !name.is_array())
			.map(FieldName::raw)
	}

	/// Name before the first bracket, for scalar and array-shaped names alike
	pub fn base_name(&self) -> Option<&str> {
		self.field_name.as_ref().map(FieldName::base)
	}

	pub fn array_index(&self) -> Option<&str> {
		self.field_name.as_ref().and_then(FieldName::index)
	}

	pub fn is_array(&self) -> bool {
		self.field_name.as_ref().is_some_and(FieldName::is_array)
	}

	/// Key used against the value source: the raw `name` attribute
	pub fn lookup_key(&self) -> Option<&str> {
		self.field_name.as_ref().map(FieldName::raw)
	}

	/// Name used in error reports; empty when the control has no name
	pub fn report_name(&self) -> &str {
		self.lookup_key().unwrap_or_default()
	}

	/// Per-field method override
	pub fn method(&self) -> Option<Method> {
		self.method
	}

	pub fn with_method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn set_method(&mut self, method: Method) {
		self.method = Some(method);
	}

	/// Option list; `None` unless this is a select field
	pub fn selection(&self) -> Option<&SelectionSet> {
		self.selection.as_ref()
	}

	pub fn add_option(&mut self, value: impl Into<String>, text: Option<&str>) {
		match self.selection.as_mut() {
			Some(selection) => selection.add(value, text),
			None => tracing::debug!(
				field = self.report_name(),
				"ignoring option added to a non-select field"
			),
		}
	}

	pub fn add_options<V, T>(&mut self, options: impl IntoIterator<Item = (V, Option<T>)>)
	where
		V: Into<String>,
		T: Into<String>,
	{
		match self.selection.as_mut() {
			Some(selection) => selection.extend(options),
			None => tracing::debug!(
				field = self.report_name(),
				"ignoring options added to a non-select field"
			),
		}
	}

	/// Open selects take options populated elsewhere; membership is not enforced
	pub fn set_dynamic(&mut self, dynamic: bool) {
		self.dynamic = dynamic;
	}

	pub fn is_dynamic(&self) -> bool {
		self.dynamic
	}

	/// Run every applicable validator against the submitted value(s).
	///
	/// The previous run's errors are replaced, never merged.
	pub fn validate(&mut self, source: &dyn ValueSource, engine: &ValidationEngine<'_>) -> bool {
		let ValidationReport {
			errors,
			validated_on,
		} = engine.evaluate(self, source);
		self.errors = errors;
		self.validated_on = validated_on;
		self.is_valid()
	}

	/// True when the last run produced no user errors
	pub fn is_valid(&self) -> bool {
		!self.errors.has_user_errors()
	}

	pub fn error_sink(&self) -> &ErrorSink {
		&self.errors
	}

	/// User errors of the last run, in index order
	pub fn errors(&self) -> Vec<&str> {
		self.errors.user_errors()
	}

	pub fn errors_at(&self, index: usize) -> &[String] {
		self.errors.user_errors_at(index)
	}

	pub fn config_alerts(&self) -> Vec<&str> {
		self.errors.config_alerts()
	}

	pub fn config_alerts_at(&self, index: usize) -> &[String] {
		self.errors.config_alerts_at(index)
	}

	/// Validators that reached a verdict in the last run, in run order
	pub fn validated_on(&self) -> &[&'static str] {
		&self.validated_on
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn input(attributes: &[(&str, &str)]) -> Field {
		let mut element = ElementDescriptor::new("input");
		for (name, value) in attributes {
			element = element.attr(*name, *value);
		}
		Field::from_element(&element).unwrap()
	}

	#[rstest]
	#[case("input", None, SemanticType::Text)]
	#[case("input", Some("datetime-local"), SemanticType::DateTimeLocal)]
	#[case("input", Some(" Week "), SemanticType::Week)]
	#[case("input", Some("unknown"), SemanticType::Text)]
	#[case("textarea", Some("number"), SemanticType::Textarea)]
	#[case("button", Some("reset"), SemanticType::Reset)]
	#[case("button", Some("button"), SemanticType::Button)]
	#[case("button", Some("email"), SemanticType::Submit)]
	fn test_semantic_type_resolution(
		#[case] tag: &str,
		#[case] type_attribute: Option<&str>,
		#[case] expected: SemanticType,
	) {
		assert_eq!(SemanticType::resolve(tag, type_attribute), expected);
	}

	#[rstest]
	fn test_semantic_type_round_trips_through_as_str() {
		for kind in SemanticType::ALL {
			if matches!(kind, SemanticType::Textarea | SemanticType::Select) {
				continue;
			}
			assert_eq!(SemanticType::from_input_type(kind.as_str()), Some(kind));
		}
	}

	#[rstest]
	#[case("items[]", true, "items", Some(""))]
	#[case("items[3]", true, "items", Some("3"))]
	#[case("address[city]", true, "address", Some("city"))]
	#[case("email", false, "email", None)]
	#[case("odd[a-b]", false, "odd[a-b]", None)]
	fn test_field_name_parse(
		#[case] raw: &str,
		#[case] is_array: bool,
		#[case] base: &str,
		#[case] index: Option<&str>,
	) {
		// Act
		let name = FieldName::parse(raw);

		// Assert
		assert_eq!(name.is_array(), is_array);
		assert_eq!(name.base(), base);
		assert_eq!(name.index(), index);
		assert_eq!(name.raw(), raw);
	}

	#[rstest]
	fn test_array_field_has_no_scalar_name() {
		// Arrange
		let field = input(&[("name", "items[]")]);

		// Act + Assert
		assert_eq!(field.name(), None);
		assert_eq!(field.base_name(), Some("items"));
		assert_eq!(field.lookup_key(), Some("items[]"));
		assert_eq!(field.report_name(), "items[]");
		assert!(field.is_array());
	}

	#[rstest]
	fn test_attribute_names_are_lowercased_and_first_wins() {
		// Arrange
		let element = ElementDescriptor::new("input")
			.attr("MaxLength", "5")
			.attr("maxlength", "99");

		// Act
		let field = Field::from_element(&element).unwrap();

		// Assert
		assert_eq!(field.attributes().len(), 1);
		assert_eq!(field.attribute("MAXLENGTH"), Some("5"));
	}

	#[rstest]
	fn test_reimport_is_noop() {
		// Arrange
		let mut field = input(&[("type", "email"), ("required", "")]);
		let mut other = IndexMap::new();
		other.insert("pattern".to_string(), ".*".to_string());

		// Act
		field.import_attributes(&other).unwrap();

		// Assert
		assert!(field.has_attribute("required"));
		assert!(!field.has_attribute("pattern"));
		assert_eq!(field.semantic_type(), SemanticType::Email);
	}

	#[rstest]
	fn test_reimport_after_empty_import_is_noop() {
		// Arrange
		let mut field = input(&[]);
		let mut other = IndexMap::new();
		other.insert("required".to_string(), String::new());

		// Act
		field.import_attributes(&other).unwrap();

		// Assert
		assert!(field.attributes().is_empty());
		assert!(!field.has_attribute("required"));
	}

	#[rstest]
	#[case(ElementDescriptor::new(""), ConstructionError::MissingTagName)]
	#[case(ElementDescriptor::new("   "), ConstructionError::MissingTagName)]
	#[case(
		ElementDescriptor::new("label"),
		ConstructionError::UnsupportedTag("label".to_string())
	)]
	#[case(
		ElementDescriptor::new("input").attr(" ", "x"),
		ConstructionError::EmptyAttributeName("input".to_string())
	)]
	fn test_malformed_descriptors_fail_construction(
		#[case] element: ElementDescriptor,
		#[case] expected: ConstructionError,
	) {
		// Act
		let result = Field::from_element(&element);

		// Assert
		assert_eq!(result.err(), Some(expected));
	}

	#[rstest]
	fn test_select_captures_options_in_document_order() {
		// Arrange
		let element = ElementDescriptor::new("select")
			.attr("name", "color")
			.option(crate::OptionDescriptor::new("r").with_text("Red"))
			.option(crate::OptionDescriptor::from_text("Green"));

		// Act
		let field = Field::from_element(&element).unwrap();

		// Assert
		let values: Vec<&str> = field.selection().unwrap().values().collect();
		assert_eq!(values, vec!["r", "Green"]);
	}

	#[rstest]
	fn test_add_option_on_non_select_is_ignored() {
		// Arrange
		let mut field = input(&[("name", "q")]);

		// Act
		field.add_option("x", None);

		// Assert
		assert!(field.selection().is_none());
	}

	#[rstest]
	fn test_method_override() {
		// Arrange
		let field = input(&[("name", "q")]).with_method(Method::Post);

		// Act + Assert
		assert_eq!(field.method(), Some(Method::Post));
	}
}
