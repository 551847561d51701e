//! Resource file location.
//!
//! A resource slot names a file; the file itself may live in the directory of
//! any chain level. The most specific level holding the file wins.

use std::path::{Path, PathBuf};

use fwprofile_config::{resource_path, validate_resource_name};

use crate::cascade::attribute_origin;
use crate::definition::DefinitionId;
use crate::registry::ProfileRegistry;

/// Locate the file named by resource `slot` for the given chain.
///
/// Returns `None` when the slot is undeclared, its filename is unusable, or
/// no chain directory contains the file.
pub fn find_resource_path(
    registry: &ProfileRegistry,
    chain: &[DefinitionId],
    config_root: &Path,
    slot: &str,
) -> Option<PathBuf> {
    let origin = attribute_origin(registry, chain, slot)?;
    let Some(filename) = origin.value.as_str() else {
        log::warn!(
            "Resource slot '{}' of profile '{}' is not a filename: {}",
            slot,
            origin.profile,
            origin.value
        );
        return None;
    };

    if let Err(e) = validate_resource_name(filename) {
        log::warn!(
            "Refusing resource '{}' for slot '{}' (profile '{}'): {}",
            filename,
            slot,
            origin.profile,
            e
        );
        return None;
    }

    for &id in chain {
        let definition = registry.definition(id);
        let Some(directory) = definition.directory.as_deref() else {
            continue;
        };
        match resource_path(config_root, directory, filename) {
            Ok(path) if path.is_file() => {
                log::debug!(
                    "Resource '{}' for slot '{}' found in '{}'",
                    filename,
                    slot,
                    path.display()
                );
                return Some(path);
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!(
                    "Skipping resource directory of profile '{}': {}",
                    definition.name,
                    e
                );
            }
        }
    }

    log::debug!(
        "Resource '{}' for slot '{}' not found under {}",
        filename,
        slot,
        config_root.display()
    );
    None
}
