//! Profile definitions.
//!
//! A definition is one node of the inheritance tree. Its `attributes` map is
//! the presence map: a key is present only when the slot is redeclared at
//! this level, so "set here" and "inherited unchanged" are never confused.
//! An explicit `null` is a redeclaration that carries no value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Position of a definition inside a [`crate::ProfileRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinitionId(pub(crate) usize);

impl DefinitionId {
    /// Discovery-order index.
    pub fn index(self) -> usize {
        self.0
    }
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

/// A named, layered profile definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDefinition {
    /// Unique name
    pub name: String,

    /// Parent definition name; `None` only for the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Matching rules, evaluated against the whole identifier
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,

    /// Directory (under the config root) holding this level's resource files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    /// Explicit match priority; higher wins before pattern length is compared
    #[serde(default, skip_serializing_if = "is_zero")]
    pub priority: i32,

    /// Slots redeclared at this level
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
}

impl ProfileDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            patterns: Vec::new(),
            directory: None,
            priority: 0,
            attributes: BTreeMap::new(),
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Redeclare `slot` at this level.
    pub fn set(mut self, slot: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(slot.into(), value.into());
        self
    }

    /// Redeclare `slot` as explicitly empty (`null`).
    pub fn unset(self, slot: impl Into<String>) -> Self {
        self.set(slot, Value::Null)
    }

    /// Redeclare a list slot from string items.
    pub fn list<I, S>(self, slot: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<Value> = items.into_iter().map(|s| Value::String(s.into())).collect();
        self.set(slot, Value::Array(values))
    }

    /// True if this level redeclares `slot`, even as `null`.
    pub fn declares(&self, slot: &str) -> bool {
        self.attributes.contains_key(slot)
    }

    /// Value redeclared at this level, if any.
    pub fn local(&self, slot: &str) -> Option<&Value> {
        self.attributes.get(slot)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
