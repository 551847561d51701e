//! Definition discovery.
//!
//! Definitions come from explicit sources rather than runtime introspection:
//! the compiled-in catalogue and, optionally, a directory of definition files.
//! A source that cannot be read contributes nothing, so a broken or missing
//! source degrades to "no match" instead of aborting start-up.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use fwprofile_config::{ResolverConfig, ResourceFormat};

use crate::builtin;
use crate::definition::ProfileDefinition;
use crate::error::RegistryError;
use crate::registry::{ProfileRegistry, RegistryBuilder};
use crate::schema::SlotSchema;

/// File extensions read by [`DirectorySource`].
const DEFINITION_EXTENSIONS: &[&str] = &["yaml", "yml", "json", "toml"];

/// Somewhere profile definitions can be enumerated from.
pub trait DefinitionSource {
    /// Human-readable name used in log messages.
    fn describe(&self) -> String;

    /// Enumerate definitions in a stable order. Failures are logged and
    /// yield whatever could be read.
    fn definitions(&self) -> Vec<ProfileDefinition>;
}

/// The compiled-in catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl DefinitionSource for BuiltinSource {
    fn describe(&self) -> String {
        "builtin catalogue".to_string()
    }

    fn definitions(&self) -> Vec<ProfileDefinition> {
        builtin::definitions()
    }
}

/// A directory of definition files, read in file-name order.
///
/// Each file holds one definition, a list of definitions, or a mapping with a
/// `profiles` list.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionFile {
    Wrapped { profiles: Vec<ProfileDefinition> },
    Many(Vec<ProfileDefinition>),
    One(Box<ProfileDefinition>),
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn definition_files(&self) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)
            .with_context(|| format!("cannot read definitions dir {}", self.dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_definition_extension(path))
            .collect();
        files.sort();
        Ok(files)
    }
}

fn has_definition_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DEFINITION_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Parse one definition file.
pub fn load_definition_file(path: &Path) -> Result<Vec<ProfileDefinition>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("cannot read definition file {}", path.display()))?;
    let value = ResourceFormat::from_path(path)
        .parse(&source)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("cannot parse definition file {}", path.display()))?;
    let file: DefinitionFile = serde_json::from_value(value)
        .with_context(|| format!("{} does not contain profile definitions", path.display()))?;

    Ok(match file {
        DefinitionFile::Wrapped { profiles } | DefinitionFile::Many(profiles) => profiles,
        DefinitionFile::One(definition) => vec![*definition],
    })
}

impl DefinitionSource for DirectorySource {
    fn describe(&self) -> String {
        format!("definitions dir {}", self.dir.display())
    }

    fn definitions(&self) -> Vec<ProfileDefinition> {
        let files = match self.definition_files() {
            Ok(files) => files,
            Err(e) => {
                log::warn!("Profile definition source unavailable: {:#}", e);
                return Vec::new();
            }
        };

        let mut definitions = Vec::new();
        for path in files {
            match load_definition_file(&path) {
                Ok(found) => {
                    log::debug!(
                        "Loaded {} profile definitions from {}",
                        found.len(),
                        path.display()
                    );
                    definitions.extend(found);
                }
                Err(e) => log::warn!("Skipping profile definition file: {:#}", e),
            }
        }
        definitions
    }
}

impl RegistryBuilder {
    /// Register everything `source` yields.
    pub fn discover(&mut self, source: &dyn DefinitionSource) -> &mut Self {
        let definitions = source.definitions();
        log::info!(
            "Discovered {} profile definitions from {}",
            definitions.len(),
            source.describe()
        );
        self.extend(definitions)
    }
}

impl ProfileRegistry {
    /// Build a registry from `sources`, in order; later sources override
    /// earlier definitions of the same name.
    pub fn discover(
        schema: SlotSchema,
        sources: &[&dyn DefinitionSource],
    ) -> Result<Self, RegistryError> {
        let mut builder = RegistryBuilder::new(schema);
        for source in sources {
            builder.discover(*source);
        }
        if builder.is_empty() {
            log::warn!("No profile definitions discovered; every identifier will be unmatched");
        }
        builder.build()
    }

    /// Registry holding only the compiled-in catalogue.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::discover(SlotSchema::builtin(), &[&BuiltinSource])
    }

    /// Registry for a resolver configuration: the builtin catalogue (unless
    /// disabled) followed by the configured definitions directory.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, RegistryError> {
        let directory = config.definitions_dir.as_deref().map(DirectorySource::new);

        let mut sources: Vec<&dyn DefinitionSource> = Vec::new();
        if config.builtin_definitions {
            sources.push(&BuiltinSource);
        }
        if let Some(directory) = &directory {
            sources.push(directory);
        }
        Self::discover(SlotSchema::builtin(), &sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let source = DirectorySource::new(tmp.path().join("absent"));
        assert!(source.definitions().is_empty());

        let registry = ProfileRegistry::discover(SlotSchema::builtin(), &[&source]).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.find_profile("v25.05"), None);
    }

    #[test]
    fn test_file_shapes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.yaml"), "name: one\n").unwrap();
        fs::write(
            tmp.path().join("b.yml"),
            "- name: two\n  parent: one\n- name: three\n  parent: one\n",
        )
        .unwrap();
        fs::write(
            tmp.path().join("c.json"),
            r#"{"profiles": [{"name": "four", "parent": "one"}]}"#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("d.toml"),
            "name = \"five\"\nparent = \"one\"\npatterns = [\"v5.*\"]\n",
        )
        .unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let names: Vec<String> = DirectorySource::new(tmp.path())
            .definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn test_malformed_file_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.yaml"), "name: root\n").unwrap();
        fs::write(tmp.path().join("b.yaml"), "name: [broken\n").unwrap();
        fs::write(tmp.path().join("c.yaml"), "just a string\n").unwrap();

        let definitions = DirectorySource::new(tmp.path()).definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "root");
    }

    #[test]
    fn test_unknown_key_skips_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.yaml"), "name: root\n").unwrap();
        fs::write(
            tmp.path().join("b.yaml"),
            "name: v2x\nparent: root\npattern: ['^v2.*']\n",
        )
        .unwrap();

        let err = load_definition_file(&tmp.path().join("b.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("does not contain profile definitions"));

        let names: Vec<String> = DirectorySource::new(tmp.path())
            .definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["root"]);
    }

    #[test]
    fn test_builtin_registry_builds() {
        let registry = ProfileRegistry::builtin().unwrap();
        assert!(!registry.is_empty());
        assert_eq!(registry.names()[0], builtin::ROOT);
    }

    #[test]
    fn test_from_config_without_builtin() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("root.yaml"), "name: only\ndirectory: base\n").unwrap();
        let config = ResolverConfig::with_config_root(tmp.path())
            .with_definitions_dir(tmp.path())
            .without_builtin_definitions();

        let registry = ProfileRegistry::from_config(&config).unwrap();
        assert_eq!(registry.names(), vec!["only"]);
    }
}
