//! Runtime flag settings.
//!
//! Collaborators hand the resolver a map of flag name to a sentinel string
//! (`"y"` enabled, `"n"` disabled). Flags that are absent, or carry any other
//! value, read as disabled.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::defaults::{FLAG_DISABLED, FLAG_ENABLED};

/// Map of flag name to enabled/disabled sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSettings {
    flags: BTreeMap<String, String>,
}

impl FlagSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `flag` to the enabled or disabled sentinel
    pub fn set(&mut self, flag: impl Into<String>, enabled: bool) {
        let sentinel = if enabled { FLAG_ENABLED } else { FLAG_DISABLED };
        self.flags.insert(flag.into(), sentinel.to_string());
    }

    /// Builder form of [`FlagSettings::set`].
    pub fn with(mut self, flag: impl Into<String>, enabled: bool) -> Self {
        self.set(flag, enabled);
        self
    }

    /// Raw sentinel recorded for `flag`, if any.
    pub fn raw(&self, flag: &str) -> Option<&str> {
        self.flags.get(flag).map(String::as_str)
    }

    /// True only when `flag` is present and carries exactly the enabled
    /// sentinel.
    pub fn is_enabled(&self, flag: &str) -> bool {
        self.raw(flag) == Some(FLAG_ENABLED)
    }

    /// Names of all enabled flags, sorted.
    pub fn enabled_flags(&self) -> Vec<&str> {
        self.flags
            .keys()
            .filter(|k| self.is_enabled(k))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FlagSettings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            flags: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<std::collections::HashMap<String, String>> for FlagSettings {
    fn from(map: std::collections::HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}
