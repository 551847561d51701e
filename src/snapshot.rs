//! Serializable summary of a resolved profile.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::resolved::ResolvedProfile;
use crate::schema::SlotKind;

/// Every schema slot of a [`ResolvedProfile`] resolved by its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSnapshot {
    pub profile: String,
    /// Chain names, most specific first
    pub chain: Vec<String>,
    /// Scalars no chain level sets are recorded as `null`
    pub scalars: BTreeMap<String, Value>,
    pub lists: BTreeMap<String, Vec<Value>>,
    /// Located resource paths; `None` when the file was not found
    pub resources: BTreeMap<String, Option<PathBuf>>,
}

impl ResolvedProfile<'_> {
    pub fn snapshot(&self) -> ProfileSnapshot {
        let mut snapshot = ProfileSnapshot {
            profile: self.name().to_string(),
            chain: self.chain_names().into_iter().map(String::from).collect(),
            scalars: BTreeMap::new(),
            lists: BTreeMap::new(),
            resources: BTreeMap::new(),
        };

        for (slot, kind) in self.registry().schema().iter() {
            match kind {
                SlotKind::Scalar => {
                    snapshot
                        .scalars
                        .insert(slot.to_string(), self.attribute(slot, Value::Null));
                }
                SlotKind::List => {
                    snapshot
                        .lists
                        .insert(slot.to_string(), self.list_attribute(slot));
                }
                SlotKind::Resource => {
                    snapshot
                        .resources
                        .insert(slot.to_string(), self.resource_path(slot));
                }
            }
        }

        snapshot
    }
}
