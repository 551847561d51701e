//! Attribute slot schema.
//!
//! Every attribute a definition may declare is a named slot with a fixed
//! kind. The kind decides the merge policy: scalars and resources cascade
//! "most specific redeclaration wins", lists accumulate across the chain.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Built-in slot names.
pub mod slots {
    // Scalars
    pub const BOARD: &str = "board";
    pub const SHIELD: &str = "shield";
    pub const FIRMWARE_REPO: &str = "firmware_repo";
    pub const FIRMWARE_BRANCH: &str = "firmware_branch";
    pub const BUILD_IMAGE: &str = "build_image";
    pub const SPLIT: &str = "split";

    // Lists
    pub const INCLUDES: &str = "includes";
    pub const CONDITIONAL_INCLUDES: &str = "conditional_includes";
    pub const BUILD_FLAGS: &str = "build_flags";

    // Resources
    pub const KEYMAP_TEMPLATE: &str = "keymap_template";
    pub const KCONFIG_TEMPLATE: &str = "kconfig_template";
    pub const BEHAVIORS: &str = "behaviors";
    pub const LAYOUT: &str = "layout";
}

/// How a slot's value is typed and merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Inline value; the most specific redeclaration wins
    Scalar,
    /// Sequence; every level's contribution is merged
    List,
    /// Filename resolved against the chain's resource directories
    Resource,
}

impl SlotKind {
    /// Whether `value` may be stored in a slot of this kind. `null` is always
    /// accepted.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            SlotKind::Scalar => true,
            SlotKind::List => matches!(value, Value::Array(_) | Value::Null),
            SlotKind::Resource => matches!(value, Value::String(_) | Value::Null),
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Scalar => write!(f, "scalar"),
            SlotKind::List => write!(f, "list"),
            SlotKind::Resource => write!(f, "resource"),
        }
    }
}

/// The fixed set of slots definitions may declare.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSchema {
    slots: BTreeMap<String, SlotKind>,
}

impl SlotSchema {
    /// A schema with no slots.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The slots used by the built-in firmware catalogue.
    pub fn builtin() -> Self {
        use slots::*;

        Self::empty()
            .declare(BOARD, SlotKind::Scalar)
            .declare(SHIELD, SlotKind::Scalar)
            .declare(FIRMWARE_REPO, SlotKind::Scalar)
            .declare(FIRMWARE_BRANCH, SlotKind::Scalar)
            .declare(BUILD_IMAGE, SlotKind::Scalar)
            .declare(SPLIT, SlotKind::Scalar)
            .declare(INCLUDES, SlotKind::List)
            .declare(CONDITIONAL_INCLUDES, SlotKind::List)
            .declare(BUILD_FLAGS, SlotKind::List)
            .declare(KEYMAP_TEMPLATE, SlotKind::Resource)
            .declare(KCONFIG_TEMPLATE, SlotKind::Resource)
            .declare(BEHAVIORS, SlotKind::Resource)
            .declare(LAYOUT, SlotKind::Resource)
    }

    /// Add (or re-kind) a slot.
    pub fn declare(mut self, name: impl Into<String>, kind: SlotKind) -> Self {
        self.slots.insert(name.into(), kind);
        self
    }

    pub fn kind(&self, name: &str) -> Option<SlotKind> {
        self.slots.get(name).copied()
    }

    /// All slots, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SlotKind)> {
        self.slots.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Slot names of one kind, sorted.
    pub fn slots_of(&self, kind: SlotKind) -> impl Iterator<Item = &str> {
        self.iter().filter(move |(_, k)| *k == kind).map(|(n, _)| n)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_accepts() {
        assert!(SlotKind::Scalar.accepts(&json!({"a": 1})));
        assert!(SlotKind::List.accepts(&json!(["a"])));
        assert!(SlotKind::List.accepts(&Value::Null));
        assert!(!SlotKind::List.accepts(&json!("a")));
        assert!(SlotKind::Resource.accepts(&json!("keymap.dtsi")));
        assert!(!SlotKind::Resource.accepts(&json!(3)));
    }

    #[test]
    fn test_builtin_schema() {
        let schema = SlotSchema::builtin();
        assert_eq!(schema.kind(slots::BOARD), Some(SlotKind::Scalar));
        assert_eq!(schema.kind(slots::INCLUDES), Some(SlotKind::List));
        assert_eq!(schema.kind(slots::LAYOUT), Some(SlotKind::Resource));
        assert_eq!(schema.kind("colour"), None);

        let resources: Vec<&str> = schema.slots_of(SlotKind::Resource).collect();
        assert_eq!(
            resources,
            vec!["behaviors", "kconfig_template", "keymap_template", "layout"]
        );
    }

    #[test]
    fn test_declare_extends() {
        let schema = SlotSchema::empty().declare("L", SlotKind::List);
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.kind("L"), Some(SlotKind::List));
    }
}
