//! Per-request view of a matched profile.
//!
//! A [`ResolvedProfile`] borrows the registry, remembers the matched
//! definition and its chain, and answers attribute, list, resource and
//! include queries. Every query is independent and idempotent.

use serde_json::Value;
use std::path::{Path, PathBuf};

use fwprofile_config::{FlagSettings, ResourceLoader, StructuredResource};

use crate::cascade::{self, AttributeOrigin};
use crate::definition::{DefinitionId, ProfileDefinition};
use crate::includes::{self, ConditionalInclude};
use crate::locator;
use crate::registry::ProfileRegistry;
use crate::schema::slots;

/// A definition selected for one identifier, ready for queries.
#[derive(Debug, Clone)]
pub struct ResolvedProfile<'a> {
    registry: &'a ProfileRegistry,
    id: DefinitionId,
    chain: Vec<DefinitionId>,
    config_root: &'a Path,
    loader: ResourceLoader,
}

impl<'a> ResolvedProfile<'a> {
    /// Wrap definition `id`, resolving resources under `config_root`.
    pub fn new(registry: &'a ProfileRegistry, id: DefinitionId, config_root: &'a Path) -> Self {
        Self {
            registry,
            id,
            chain: registry.chain(id),
            config_root,
            loader: ResourceLoader::new(),
        }
    }

    pub fn id(&self) -> DefinitionId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        self.definition().name.as_str()
    }

    pub fn definition(&self) -> &'a ProfileDefinition {
        self.registry.definition(self.id)
    }

    pub fn registry(&self) -> &'a ProfileRegistry {
        self.registry
    }

    pub fn config_root(&self) -> &'a Path {
        self.config_root
    }

    /// Resolution chain, most specific first.
    pub fn chain(&self) -> &[DefinitionId] {
        &self.chain
    }

    pub fn chain_names(&self) -> Vec<&'a str> {
        let registry = self.registry;
        self.chain
            .iter()
            .map(|&id| registry.definition(id).name.as_str())
            .collect()
    }

    // ── Scalars ────────────────────────────────────────────────────────────

    /// Effective value of `name`, or `default` if no chain level sets it.
    pub fn attribute(&self, name: &str, default: impl Into<Value>) -> Value {
        cascade::resolve_attribute(self.registry, &self.chain, name, default.into())
    }

    /// Which chain level supplies `name`, and its value.
    pub fn attribute_origin(&self, name: &str) -> Option<AttributeOrigin<'a>> {
        cascade::attribute_origin(self.registry, &self.chain, name)
    }

    pub fn attribute_str(&self, name: &str) -> Option<&'a str> {
        self.attribute_origin(name)
            .and_then(|origin| origin.value.as_str())
    }

    pub fn attribute_bool(&self, name: &str, default: bool) -> bool {
        self.attribute_origin(name)
            .and_then(|origin| origin.value.as_bool())
            .unwrap_or(default)
    }

    pub fn attribute_i64(&self, name: &str, default: i64) -> i64 {
        self.attribute_origin(name)
            .and_then(|origin| origin.value.as_i64())
            .unwrap_or(default)
    }

    // ── Lists ──────────────────────────────────────────────────────────────

    /// Merged value of list slot `name`.
    pub fn list_attribute(&self, name: &str) -> Vec<Value> {
        cascade::resolve_list_attribute(self.registry, &self.chain, name)
    }

    /// Merged list slot `name`, keeping only string items.
    pub fn string_list(&self, name: &str) -> Vec<String> {
        includes::string_items(name, &self.list_attribute(name))
    }

    // ── Resources ──────────────────────────────────────────────────────────

    /// Absolute path of the file named by resource `slot`, if it exists.
    pub fn resource_path(&self, slot: &str) -> Option<PathBuf> {
        locator::find_resource_path(self.registry, &self.chain, self.config_root, slot)
    }

    /// Structured content of resource `slot`; empty when missing or unusable.
    pub fn load_resource(&self, slot: &str) -> StructuredResource {
        match self.resource_path(slot) {
            Some(path) => self.loader.load_structured(&path),
            None => StructuredResource::new(),
        }
    }

    /// Text content of resource `slot`; `None` when missing or unreadable.
    pub fn load_resource_text(&self, slot: &str) -> Option<String> {
        let path = self.resource_path(slot)?;
        self.loader.load_text(&path)
    }

    // ── Includes ───────────────────────────────────────────────────────────

    /// Merged unconditional includes.
    pub fn includes(&self) -> Vec<String> {
        self.string_list(slots::INCLUDES)
    }

    /// Merged conditional include entries, malformed ones dropped.
    pub fn conditional_includes(&self) -> Vec<ConditionalInclude> {
        self.list_attribute(slots::CONDITIONAL_INCLUDES)
            .iter()
            .filter_map(ConditionalInclude::from_value)
            .collect()
    }

    /// Final include list for the given flag settings.
    pub fn resolve_includes(&self, settings: &FlagSettings) -> Vec<String> {
        includes::apply_conditional_includes(
            self.includes(),
            &self.conditional_includes(),
            settings,
        )
    }
}
