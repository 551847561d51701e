//! Shared integration test helpers for fwprofile.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{three_level_registry, TestContext};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers is used per file.

#![allow(dead_code)]

use fwprofile::slots::*;
use fwprofile::{ProfileDefinition, ProfileRegistry, ResolverConfig};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Root ← Mid ← Leaf, the canonical three-level tree.
///
/// - Root: no pattern, dir `base`, board unset, includes `[root.h]`,
///   one conditional include `Y` gated on `FLAG`
/// - Mid: `^v2\d\.\d\d.*`, dir `v2x`, board `boardA`, includes `[mid.h]`
/// - Leaf: `^v25\.05.*`, dir `v25`, includes `[extra.h]`
pub fn three_level_definitions() -> Vec<ProfileDefinition> {
    vec![
        ProfileDefinition::new("Root")
            .directory("base")
            .unset(BOARD)
            .set(SPLIT, true)
            .list(INCLUDES, ["root.h"])
            .set(CONDITIONAL_INCLUDES, json!([{"include": "Y", "flag": "FLAG"}]))
            .set(KEYMAP_TEMPLATE, "keymap.dtsi")
            .set(BEHAVIORS, "behaviors.yaml"),
        ProfileDefinition::new("Mid")
            .parent("Root")
            .pattern(r"^v2\d\.\d\d.*")
            .directory("v2x")
            .set(BOARD, "boardA")
            .list(INCLUDES, ["mid.h"]),
        ProfileDefinition::new("Leaf")
            .parent("Mid")
            .pattern(r"^v25\.05.*")
            .directory("v25")
            .list(INCLUDES, ["extra.h"]),
    ]
}

pub fn three_level_registry() -> ProfileRegistry {
    let mut builder = ProfileRegistry::builder();
    builder.extend(three_level_definitions());
    builder.build().expect("three-level registry builds")
}

/// Write `contents` to `<root>/<relative>`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Temporary config root plus a resolver configuration pointing at it.
///
/// Directory layout:
/// ```text
/// <tmp>/
///   config/              # config_root
///   profiles/            # definitions_dir
/// ```
pub struct TestContext {
    /// Temporary directory, kept alive for the lifetime of the context.
    pub dir: TempDir,
    pub config: ResolverConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config_root = dir.path().join("config");
        let definitions = dir.path().join("profiles");
        fs::create_dir_all(&config_root).expect("Failed to create config root");
        fs::create_dir_all(&definitions).expect("Failed to create definitions dir");

        let config = ResolverConfig::with_config_root(config_root).with_definitions_dir(definitions);
        Self { dir, config }
    }

    pub fn config_root(&self) -> &Path {
        &self.config.config_root
    }

    pub fn definitions_dir(&self) -> PathBuf {
        self.dir.path().join("profiles")
    }

    /// Write a resource file under the config root.
    pub fn resource(&self, relative: &str, contents: &str) -> PathBuf {
        write_file(self.config_root(), relative, contents)
    }

    /// Write a definition file into the definitions directory.
    pub fn definition_file(&self, file_name: &str, contents: &str) -> PathBuf {
        write_file(&self.definitions_dir(), file_name, contents)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
