//! # formguard
//!
//! Server-side HTML5 constraint validation for decoded form markup.
//!
//! A markup parser hands over element descriptors; formguard turns them into a
//! [`Form`], validates submitted values against each element's constraint
//! attributes, and reports user errors apart from config alerts.
//!
//! ## Crates
//!
//! - [`forms`]: element descriptors, fields, the validator registry and engine
//! - [`conf`]: upload limits, default method, size parsing and formatting
//!
//! ## Quick Example
//!
//! ```
//! use formguard::prelude::*;
//!
//! let settings = FormSettings::from_toml_str(r#"
//!     upload_max_filesize = "1M"
//!     default_method = "post"
//! "#).unwrap();
//!
//! let mut form = Form::with_settings("avatar", settings);
//! form.extend_from_elements([
//!     ElementDescriptor::new("input").attr("type", "file").attr("name", "photo").attr("accept", "image/*"),
//! ]);
//!
//! let source = MemoryValueSource::new().with_upload(
//!     "photo",
//!     UploadedFile::failed(UploadStatus::ServerSizeExceeded).with_size(3 * 1024 * 1024),
//! );
//! assert!(!form.validate(&source));
//! assert_eq!(
//!     form.errors()[0].to_string(),
//!     "photo:File size of 3.00 MB exceeds max size of 1.00 MB"
//! );
//! ```

pub use formguard_conf as conf;
pub use formguard_forms as forms;

pub use formguard_conf::{
	FormSettings, Method, MethodParseError, SettingsError, SettingsResult, parse_size,
	readable_size,
};
pub use formguard_forms::{
	ConstraintAttribute, ConstructionError, ConstructionResult, ElementDescriptor, ErrorSink,
	Field, FieldErrors, FieldName, Form, MemoryValueSource, OptionDescriptor, Outcome,
	SelectionSet, SemanticType, SubmittedValue, UploadStatus, UploadedFile, ValidationEngine,
	ValidationReport, ValidatorRegistry, ValueSource,
};

/// Everything needed to build and validate a form
pub mod prelude {
	pub use crate::{
		ElementDescriptor, Field, FieldErrors, Form, FormSettings, MemoryValueSource, Method,
		OptionDescriptor, Outcome, SemanticType, UploadStatus, UploadedFile, ValueSource,
	};
}
