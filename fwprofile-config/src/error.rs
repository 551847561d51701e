//! Typed error variants for the fwprofile-config crate.
//!
//! Resource loading never surfaces these (it logs and returns an empty
//! result instead); they are produced by the strict helpers such as
//! [`crate::ResourceLoader::try_load_structured`] and
//! [`crate::validate_resource_name`], and exposed for callers that want to
//! match on specific failure modes instead of opaque `anyhow` strings.
//!
//! # Example
//!
//! ```rust,no_run
//! use fwprofile_config::ConfigError;
//!
//! fn check_load_err(e: &anyhow::Error) {
//!     if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
//!         match cfg_err {
//!             ConfigError::Io { path, .. } => eprintln!("cannot read {}", path.display()),
//!             ConfigError::Parse { path, details } => {
//!                 eprintln!("{}: {details}", path.display())
//!             }
//!             ConfigError::NotAMapping(path) => eprintln!("{} is not a mapping", path.display()),
//!             ConfigError::PathTraversal(msg) => eprintln!("Path traversal: {msg}"),
//!             ConfigError::Validation(msg) => eprintln!("Validation: {msg}"),
//!         }
//!     }
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading configuration or resource files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error reading '{}': {source}", path.display())]
    Io {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file content could not be parsed in its declared format.
    #[error("Parse error in '{}': {details}", path.display())]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Human-readable parser message.
        details: String,
    },

    /// A structured resource parsed successfully but its top level is not a
    /// key/value mapping.
    #[error("Structured resource '{}' is not a key/value mapping", .0.display())]
    NotAMapping(PathBuf),

    /// A resource filename would resolve outside its profile directory.
    #[error("Path traversal detected: {0}")]
    PathTraversal(String),

    /// A field value failed semantic validation.
    #[error("Config validation error: {0}")]
    Validation(String),
}
