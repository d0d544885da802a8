//! HTML5 constraint validation for decoded form markup
//!
//! This crate takes the element descriptors an external markup parser produces,
//! builds a [`Form`] of [`Field`]s from them, and validates submitted values
//! against the constraint attributes each element declares:
//! - `required`, `pattern`, `minlength`, `maxlength`, `min`, `max`, `step`, `accept`
//! - type checks for `email`, `url`, `number` and the date family
//! - upload status for `file` inputs and option membership for `select`
//!
//! Every check yields an [`Outcome`]. A value that breaks a constraint is a
//! user error and makes the form invalid. An attribute that makes no sense on
//! its element is a config alert: it is logged with `tracing` and kept for
//! inspection, but never blocks the form.
//!
//! ## Example
//!
//! ```
//! use formguard_forms::{ElementDescriptor, Form, MemoryValueSource, OptionDescriptor};
//!
//! let mut form = Form::from_elements("order", vec![
//!     ElementDescriptor::new("form").attr("method", "post"),
//!     ElementDescriptor::new("input").attr("name", "qty").attr("type", "number").attr("min", "1"),
//!     ElementDescriptor::new("select")
//!         .attr("name", "size")
//!         .option(OptionDescriptor::new("s"))
//!         .option(OptionDescriptor::new("m")),
//! ]);
//!
//! let source = MemoryValueSource::new()
//!     .with_body("qty", "0")
//!     .with_body("size", "xl");
//!
//! assert!(!form.validate(&source));
//! let report: Vec<String> = form.errors().iter().map(ToString::to_string).collect();
//! assert_eq!(report, vec![
//!     "qty:Value `0` lower than required minimum: 1",
//!     "size:Value `xl` is not one of the available options",
//! ]);
//! ```

pub mod element;
pub mod engine;
pub mod errors;
pub mod field;
pub mod form;
pub mod registry;
pub mod selection;
pub mod validators;
pub mod value_source;

pub use element::{ElementDescriptor, OptionDescriptor};
pub use engine::{ValidationEngine, ValidationReport};
pub use errors::{ConstructionError, ConstructionResult, ErrorSink, Outcome};
pub use field::{Field, FieldName, SemanticType};
pub use form::{FieldErrors, Form, MAX_FILE_SIZE_FIELD};
pub use registry::{ConstraintAttribute, TypeCheck, ValidatorRegistry};
pub use selection::{SelectOption, SelectionSet};
pub use validators::{AttributeValidatorFn, TypeValidatorFn, UploadLimits, ValidationContext};
pub use value_source::{MemoryValueSource, SubmittedValue, UploadStatus, UploadedFile, ValueSource};

pub use formguard_conf::{FormSettings, Method};
