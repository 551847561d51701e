//! Resource file loading.
//!
//! Profile resources are optional, so the lenient loaders never propagate a
//! failure: unreadable or malformed files are logged and come back as an
//! empty mapping (structured data) or `None` (text). The `try_*` variants
//! return a [`ConfigError`] for callers that want to report the problem.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Structured mapping produced by [`ResourceLoader::load_structured`].
pub type StructuredResource = Map<String, Value>;

/// Serialization format of a structured resource, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    Yaml,
    Json,
    Toml,
}

impl ResourceFormat {
    /// Pick the format from the file extension; unknown extensions are read as YAML
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => ResourceFormat::Json,
            Some("toml") => ResourceFormat::Toml,
            _ => ResourceFormat::Yaml,
        }
    }

    /// Parse `source` into a generic value tree.
    pub fn parse(self, source: &str) -> Result<Value, String> {
        match self {
            ResourceFormat::Yaml => serde_yaml_ng::from_str(source).map_err(|e| e.to_string()),
            ResourceFormat::Json => serde_json::from_str(source).map_err(|e| e.to_string()),
            ResourceFormat::Toml => toml::from_str::<toml::Table>(source)
                .map_err(|e| e.to_string())
                .and_then(|v| serde_json::to_value(v).map_err(|e| e.to_string())),
        }
    }
}

/// Reads located resource files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceLoader;

impl ResourceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a structured resource, returning a typed error on failure.
    ///
    /// An empty document (or a YAML `null`) yields an empty mapping.
    pub fn try_load_structured(&self, path: &Path) -> Result<StructuredResource, ConfigError> {
        let source = self.try_load_text(path)?;
        if source.trim().is_empty() {
            return Ok(Map::new());
        }
        let format = ResourceFormat::from_path(path);
        let value = format.parse(&source).map_err(|details| ConfigError::Parse {
            path: path.to_path_buf(),
            details,
        })?;

        match value {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            _ => Err(ConfigError::NotAMapping(path.to_path_buf())),
        }
    }

    /// Read a text resource, returning a typed error on failure.
    pub fn try_load_text(&self, path: &Path) -> Result<String, ConfigError> {
        std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a structured resource; failures are logged and give an empty mapping
    pub fn load_structured(&self, path: &Path) -> StructuredResource {
        match self.try_load_structured(path) {
            Ok(map) => {
                log::debug!(
                    "Loaded structured resource '{}' ({} keys)",
                    path.display(),
                    map.len()
                );
                map
            }
            Err(e) => {
                log::warn!("Ignoring unusable resource: {}", e);
                Map::new()
            }
        }
    }

    /// Load a text resource; failures are logged and give `None`
    pub fn load_text(&self, path: &Path) -> Option<String> {
        match self.try_load_text(path) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Ignoring unreadable resource: {}", e);
                None
            }
        }
    }
}
