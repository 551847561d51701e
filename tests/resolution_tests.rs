//! End-to-end resolution: identifier → definition → cascaded attributes.

mod common;

use common::{TestContext, three_level_definitions, three_level_registry};
use fwprofile::slots::*;
use fwprofile::{
    FlagSettings, ProfileDefinition, ProfileRegistry, ProfileResolver, ResolveError,
    ResolvedProfile,
};
use serde_json::{Value, json};
use std::path::Path;

fn resolve<'a>(
    registry: &'a ProfileRegistry,
    identifier: &str,
    root: &'a Path,
) -> Option<ResolvedProfile<'a>> {
    registry
        .find_profile(identifier)
        .map(|id| ResolvedProfile::new(registry, id, root))
}

#[test]
fn test_leaf_selected_and_cascaded() {
    let registry = three_level_registry();
    let root = Path::new("/nonexistent");
    let profile = resolve(&registry, "v25.05-beta", root).unwrap();

    assert_eq!(profile.name(), "Leaf");
    assert_eq!(profile.chain_names(), vec!["Leaf", "Mid", "Root"]);

    assert_eq!(profile.attribute(BOARD, Value::Null), json!("boardA"));
    let origin = profile.attribute_origin(BOARD).unwrap();
    assert_eq!(origin.profile, "Mid");

    let includes = profile.includes();
    assert_eq!(includes, vec!["extra.h", "mid.h", "root.h"]);
}

#[test]
fn test_mid_selected_for_other_v2_release() {
    let registry = three_level_registry();
    let root = Path::new("/nonexistent");
    let profile = resolve(&registry, "v24.08", root).unwrap();

    assert_eq!(profile.name(), "Mid");
    assert_eq!(profile.includes(), vec!["mid.h", "root.h"]);
}

#[test]
fn test_unmatched_identifier() {
    let registry = three_level_registry();
    assert!(registry.find_profile("v19.10").is_none());
    assert!(registry.find_profile("").is_none());
    // Rules are anchored at both ends.
    assert!(registry.find_profile("xv25.05").is_none());
}

#[test]
fn test_unset_root_scalar_uses_default() {
    let registry = three_level_registry();
    let root = Path::new("/nonexistent");
    let profile = resolve(&registry, "v25.05", root).unwrap();

    let root_id = registry.id_of("Root").unwrap();
    assert_eq!(
        registry.resolve_attribute(root_id, BOARD, json!("fallback")),
        json!("fallback")
    );
    assert_eq!(profile.attribute(SHIELD, "none"), json!("none"));
    assert!(profile.attribute_bool(SPLIT, false));
}

#[test]
fn test_explicit_null_falls_through_to_ancestor() {
    let mut definitions = three_level_definitions();
    definitions.push(
        ProfileDefinition::new("Cleared")
            .parent("Mid")
            .pattern(r"^v26\..*")
            .unset(BOARD),
    );
    let mut builder = ProfileRegistry::builder();
    builder.extend(definitions);
    let registry = builder.build().unwrap();

    let root = Path::new("/nonexistent");
    let profile = resolve(&registry, "v26.01", root).unwrap();
    assert_eq!(profile.name(), "Cleared");
    assert!(profile.definition().declares(BOARD));
    assert_eq!(profile.attribute_str(BOARD), Some("boardA"));
}

#[test]
fn test_conditional_includes_follow_flags() {
    let registry = three_level_registry();
    let root = Path::new("/nonexistent");
    let profile = resolve(&registry, "v25.05-beta", root).unwrap();

    let enabled = FlagSettings::new().with("FLAG", true);
    let disabled = FlagSettings::new().with("FLAG", false);
    let uppercase: FlagSettings = [("FLAG", "Y")].into_iter().collect();
    let raw: FlagSettings = [("FLAG", "y")].into_iter().collect();

    let base = vec!["extra.h", "mid.h", "root.h"];
    let mut with_y = base.clone();
    with_y.push("Y");

    assert_eq!(profile.resolve_includes(&enabled), with_y);
    assert_eq!(profile.resolve_includes(&raw), with_y);
    assert_eq!(profile.resolve_includes(&uppercase), base);
    assert_eq!(profile.resolve_includes(&disabled), base);
    assert_eq!(profile.resolve_includes(&FlagSettings::new()), base);
}

#[test]
fn test_queries_are_idempotent() {
    let registry = three_level_registry();
    let root = Path::new("/nonexistent");
    let profile = resolve(&registry, "v25.05-beta", root).unwrap();

    assert_eq!(profile.includes(), profile.includes());
    assert_eq!(
        profile.attribute(BOARD, Value::Null),
        profile.attribute(BOARD, Value::Null)
    );
    assert_eq!(profile.snapshot(), profile.snapshot());
}

#[test]
fn test_priority_overrides_specificity() {
    let registry = ProfileRegistry::builder()
        .with(ProfileDefinition::new("root"))
        .with(
            ProfileDefinition::new("long")
                .parent("root")
                .pattern(r"^release-\d+\.\d+$"),
        )
        .with(
            ProfileDefinition::new("preferred")
                .parent("root")
                .pattern("release-.*")
                .priority(10),
        )
        .build()
        .unwrap();

    let id = registry.find_profile("release-1.2").unwrap();
    assert_eq!(registry.definition(id).name, "preferred");
}

#[test]
fn test_resolver_end_to_end_with_directory_definitions() {
    let ctx = TestContext::new();
    ctx.definition_file(
        "10-root.yaml",
        "name: Root\ndirectory: base\nattributes:\n  board: null\n  includes: [root.h]\n",
    );
    ctx.definition_file(
        "20-tree.yaml",
        r#"
profiles:
  - name: Mid
    parent: Root
    patterns: ['^v2\d\.\d\d.*']
    directory: v2x
    attributes:
      board: boardA
  - name: Leaf
    parent: Mid
    patterns: ['^v25\.05.*']
    directory: v25
    attributes:
      includes: [extra.h]
"#,
    );
    ctx.resource("v2x/keymap.dtsi", "// v2x keymap\n");

    let resolver =
        ProfileResolver::from_config(ctx.config.clone().without_builtin_definitions()).unwrap();
    let profile = resolver.require("v25.05-beta").unwrap();

    assert_eq!(profile.name(), "Leaf");
    assert_eq!(profile.attribute_str(BOARD), Some("boardA"));
    assert_eq!(profile.includes(), vec!["extra.h", "root.h"]);
    assert!(profile.resource_path(KEYMAP_TEMPLATE).is_none());

    match resolver.require("nightly") {
        Err(ResolveError::NoMatch { identifier, known }) => {
            assert_eq!(identifier, "nightly");
            assert_eq!(known, vec!["Root", "Mid", "Leaf"]);
        }
        other => panic!("expected NoMatch, got {:?}", other.map(|p| p.name())),
    }
}

#[test]
fn test_directory_definitions_extend_builtin_catalogue() {
    let ctx = TestContext::new();
    ctx.definition_file(
        "custom.yaml",
        r#"
name: corne-v25
parent: v25.05
patterns: ['^v25\.05-corne$']
directory: corne
attributes:
  board: corne_v4
  includes: [corne.h]
"#,
    );

    let resolver = ProfileResolver::from_config(ctx.config.clone()).unwrap();

    let corne = resolver.require("v25.05-corne").unwrap();
    assert_eq!(corne.name(), "corne-v25");
    assert_eq!(corne.attribute_str(BOARD), Some("corne_v4"));
    assert!(corne.includes().starts_with(&["corne.h".to_string(), "extra.h".to_string()]));

    let plain = resolver.require("v25.05-testbuild").unwrap();
    assert_eq!(plain.name(), "v25.05");
}
