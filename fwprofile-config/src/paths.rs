//! Resource path construction.
//!
//! Resource filenames come from profile definitions, which may be loaded from
//! user-editable files. They are joined onto `<config_root>/<directory>` only
//! after a lexical check, because the candidate file usually does not exist
//! yet and cannot be canonicalized.

use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;

/// Lexically check that a relative resource or directory name stays inside
/// its parent directory.
///
/// Rejects empty names, absolute paths and any `..` component.
pub fn validate_resource_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "resource name must not be empty".to_string(),
        ));
    }

    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(ConfigError::PathTraversal(format!(
                    "'{name}' contains a parent-directory component ('..')"
                )));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ConfigError::PathTraversal(format!(
                    "'{name}' is absolute; resource names must be relative"
                )));
            }
        }
    }

    Ok(())
}

/// Build `<config_root>/<directory>/<filename>` after validating both names.
pub fn resource_path(
    config_root: &Path,
    directory: &str,
    filename: &str,
) -> Result<PathBuf, ConfigError> {
    validate_resource_name(directory)?;
    validate_resource_name(filename)?;
    Ok(config_root.join(directory).join(filename))
}
