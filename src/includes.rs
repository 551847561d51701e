//! Conditional include resolution.
//!
//! Conditional entries are written either as a mapping
//! (`{include: pointing.h, flag: ZMK_POINTING}`) or as a two-element pair
//! (`[pointing.h, ZMK_POINTING]`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use fwprofile_config::FlagSettings;

/// An include added only when its governing flag is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConditionalIncludeRepr")]
pub struct ConditionalInclude {
    pub include: String,
    pub flag: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConditionalIncludeRepr {
    Mapping { include: String, flag: String },
    Pair(String, String),
}

impl From<ConditionalIncludeRepr> for ConditionalInclude {
    fn from(repr: ConditionalIncludeRepr) -> Self {
        match repr {
            ConditionalIncludeRepr::Mapping { include, flag }
            | ConditionalIncludeRepr::Pair(include, flag) => Self { include, flag },
        }
    }
}

impl ConditionalInclude {
    pub fn new(include: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            include: include.into(),
            flag: flag.into(),
        }
    }

    /// Parse one merged list entry; malformed entries are logged and dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        match serde_json::from_value(value.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Ignoring malformed conditional include {}: {}", value, e);
                None
            }
        }
    }
}

/// Collect string items from a merged list, logging and dropping the rest.
pub fn string_items(slot: &str, values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|value| match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                log::warn!("Ignoring non-string entry in '{}': {}", slot, value);
                None
            }
        })
        .collect()
}

/// Append each conditional include whose flag is enabled and which is not
/// already present. Unknown flags count as disabled.
pub fn apply_conditional_includes(
    mut base: Vec<String>,
    conditional: &[ConditionalInclude],
    settings: &FlagSettings,
) -> Vec<String> {
    for entry in conditional {
        if !settings.is_enabled(&entry.flag) {
            continue;
        }
        if !base.contains(&entry.include) {
            base.push(entry.include.clone());
        }
    }
    base
}
