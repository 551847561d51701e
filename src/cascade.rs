//! Attribute cascade over a resolution chain.
//!
//! Scalars stop at the first chain level that redeclares the slot with a
//! non-null value. Lists never stop: every level that redeclares the slot
//! contributes its own list, merged most-specific-first with structural
//! de-duplication.

use serde_json::Value;

use crate::definition::DefinitionId;
use crate::registry::ProfileRegistry;

/// Where a cascaded scalar value came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeOrigin<'a> {
    /// Chain member that redeclared the slot
    pub id: DefinitionId,
    /// Its name
    pub profile: &'a str,
    /// The redeclared value
    pub value: &'a Value,
}

/// First chain member that directly redeclares `name` with a non-null value.
pub fn attribute_origin<'r>(
    registry: &'r ProfileRegistry,
    chain: &[DefinitionId],
    name: &str,
) -> Option<AttributeOrigin<'r>> {
    chain.iter().find_map(|&id| {
        let definition = registry.definition(id);
        definition
            .local(name)
            .filter(|value| !value.is_null())
            .map(|value| AttributeOrigin {
                id,
                profile: definition.name.as_str(),
                value,
            })
    })
}

/// Effective scalar value of `name`, or `default` when no level sets it.
pub fn resolve_attribute(
    registry: &ProfileRegistry,
    chain: &[DefinitionId],
    name: &str,
    default: Value,
) -> Value {
    attribute_origin(registry, chain, name)
        .map(|origin| origin.value.clone())
        .unwrap_or(default)
}

/// Merged list value of `name` across the whole chain.
///
/// Equal items keep the position of their most specific occurrence. A level
/// holding a non-array value contributes it as a single element.
pub fn resolve_list_attribute(
    registry: &ProfileRegistry,
    chain: &[DefinitionId],
    name: &str,
) -> Vec<Value> {
    let mut merged: Vec<Value> = Vec::new();
    for &id in chain {
        let items = match registry.definition(id).local(name) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(items)) => items.as_slice(),
            Some(single) => std::slice::from_ref(single),
        };
        for item in items {
            if !merged.contains(item) {
                merged.push(item.clone());
            }
        }
    }
    merged
}

impl ProfileRegistry {
    /// Scalar cascade starting at definition `id`.
    pub fn resolve_attribute(&self, id: DefinitionId, name: &str, default: Value) -> Value {
        resolve_attribute(self, &self.chain(id), name, default)
    }

    /// List merge starting at definition `id`.
    pub fn resolve_list_attribute(&self, id: DefinitionId, name: &str) -> Vec<Value> {
        resolve_list_attribute(self, &self.chain(id), name)
    }
}
