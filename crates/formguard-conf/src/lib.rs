//! # formguard settings
//!
//! Configuration for the formguard validation core.
//!
//! Settings cover the host-side limits the validation core cannot discover on its
//! own (upload size limits) and the default submission method for new forms.
//! They can be built in code, parsed from TOML, or taken from environment
//! variables.
//!
//! ## Example
//!
//! ```
//! use formguard_conf::{FormSettings, Method};
//!
//! let settings = FormSettings::from_toml_str(
//!     r#"
//!     upload_max_filesize = "2M"
//!     post_max_size = "8M"
//!     default_method = "post"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.upload_max_filesize, 2 * 1024 * 1024);
//! assert_eq!(settings.default_method, Method::Post);
//! assert_eq!(settings.server_upload_limit(), 2 * 1024 * 1024);
//! ```

pub mod method;
pub mod settings;
pub mod size;

pub use method::{Method, MethodParseError};
pub use settings::{FormSettings, SettingsError, SettingsResult};
pub use size::{parse_size, readable_size};
