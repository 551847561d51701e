//! Profile definition registry.
//!
//! Definitions are stored in an arena in discovery order; parent links are
//! arena indices, so walking a chain is a bounded loop that ends at the root.
//! The registry is immutable once built and can be shared across threads.

use regex::Regex;
use std::collections::HashMap;

use crate::definition::{DefinitionId, ProfileDefinition};
use crate::error::RegistryError;
use crate::schema::SlotSchema;

/// A compiled matching rule. `pattern` is the source text, used for
/// specificity; `regex` is anchored to the whole identifier.
#[derive(Debug, Clone)]
pub struct MatchRule {
    pattern: String,
    regex: Regex,
}

impl MatchRule {
    /// Compile `pattern` with full-string anchoring.
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Character length of the source pattern.
    pub fn specificity(&self) -> usize {
        self.pattern.chars().count()
    }

    /// True only if the entire identifier matches.
    pub fn is_match(&self, identifier: &str) -> bool {
        self.regex.is_match(identifier)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RegistryEntry {
    pub(crate) definition: ProfileDefinition,
    pub(crate) parent: Option<DefinitionId>,
    pub(crate) rules: Vec<MatchRule>,
}

/// Collects definitions before they are linked into a [`ProfileRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    schema: SlotSchema,
    definitions: Vec<ProfileDefinition>,
    index: HashMap<String, usize>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new(SlotSchema::builtin())
    }
}

impl RegistryBuilder {
    pub fn new(schema: SlotSchema) -> Self {
        Self {
            schema,
            definitions: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Record a definition. A duplicate name replaces the earlier definition
    /// but keeps its discovery position.
    pub fn register(&mut self, definition: ProfileDefinition) -> &mut Self {
        match self.index.get(&definition.name) {
            Some(&pos) => {
                log::warn!(
                    "Duplicate profile definition '{}' replaces the earlier one",
                    definition.name
                );
                self.definitions[pos] = definition;
            }
            None => {
                self.index
                    .insert(definition.name.clone(), self.definitions.len());
                self.definitions.push(definition);
            }
        }
        self
    }

    /// Builder-style [`RegistryBuilder::register`].
    pub fn with(mut self, definition: ProfileDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn extend<I>(&mut self, definitions: I) -> &mut Self
    where
        I: IntoIterator<Item = ProfileDefinition>,
    {
        for definition in definitions {
            self.register(definition);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Link, validate and compile the collected definitions.
    pub fn build(self) -> Result<ProfileRegistry, RegistryError> {
        let Self {
            schema,
            definitions,
            index,
        } = self;

        for definition in &definitions {
            validate_slots(&schema, definition)?;
        }

        let mut parents = Vec::with_capacity(definitions.len());
        let mut roots = Vec::new();
        for definition in &definitions {
            match &definition.parent {
                Some(parent) => match index.get(parent) {
                    Some(&pos) => parents.push(Some(DefinitionId(pos))),
                    None => {
                        return Err(RegistryError::UnknownParent {
                            profile: definition.name.clone(),
                            parent: parent.clone(),
                        });
                    }
                },
                None => {
                    roots.push(definition.name.clone());
                    parents.push(None);
                }
            }
        }

        if roots.len() > 1 {
            return Err(RegistryError::MultipleRoots(roots));
        }

        // Any walk longer than the arena has revisited a node.
        for (start, definition) in definitions.iter().enumerate() {
            let mut current = parents[start];
            let mut steps = 0;
            while let Some(DefinitionId(pos)) = current {
                steps += 1;
                if pos == start || steps > definitions.len() {
                    return Err(RegistryError::Cycle(definition.name.clone()));
                }
                current = parents[pos];
            }
        }

        let entries: Vec<RegistryEntry> = definitions
            .into_iter()
            .zip(parents)
            .map(|(definition, parent)| {
                let rules = compile_rules(&definition);
                RegistryEntry {
                    definition,
                    parent,
                    rules,
                }
            })
            .collect();

        let by_name = index
            .into_iter()
            .map(|(name, pos)| (name, DefinitionId(pos)))
            .collect();

        log::info!("Registered {} profile definitions", entries.len());

        Ok(ProfileRegistry {
            entries,
            by_name,
            schema,
        })
    }
}

fn validate_slots(schema: &SlotSchema, definition: &ProfileDefinition) -> Result<(), RegistryError> {
    for (slot, value) in &definition.attributes {
        let Some(kind) = schema.kind(slot) else {
            return Err(RegistryError::UnknownSlot {
                profile: definition.name.clone(),
                slot: slot.clone(),
            });
        };
        if !kind.accepts(value) {
            return Err(RegistryError::SlotKind {
                profile: definition.name.clone(),
                slot: slot.clone(),
                kind,
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

/// Compile a definition's rules, logging and skipping any that do not parse.
fn compile_rules(definition: &ProfileDefinition) -> Vec<MatchRule> {
    definition
        .patterns
        .iter()
        .filter_map(|pattern| match MatchRule::compile(pattern) {
            Ok(rule) => Some(rule),
            Err(e) => {
                log::warn!(
                    "Skipping invalid matching rule {:?} of profile '{}': {}",
                    pattern,
                    definition.name,
                    e
                );
                None
            }
        })
        .collect()
}

/// Read-only catalogue of linked profile definitions.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    pub(crate) entries: Vec<RegistryEntry>,
    by_name: HashMap<String, DefinitionId>,
    schema: SlotSchema,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::empty(SlotSchema::builtin())
    }
}

impl ProfileRegistry {
    /// A registry with no definitions; every lookup reports no match.
    pub fn empty(schema: SlotSchema) -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
            schema,
        }
    }

    /// Start collecting definitions against the built-in slot schema.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn schema(&self) -> &SlotSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in discovery order.
    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.definition.name.as_str())
            .collect()
    }

    pub fn id_of(&self, name: &str) -> Option<DefinitionId> {
        self.by_name.get(name).copied()
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&ProfileDefinition> {
        self.id_of(name).map(|id| self.definition(id))
    }

    /// Definition for an id handed out by this registry.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different registry and is out of range.
    /// Use [`ProfileRegistry::try_definition`] for ids of unknown origin.
    pub fn definition(&self, id: DefinitionId) -> &ProfileDefinition {
        &self.entries[id.0].definition
    }

    /// Checked form of [`ProfileRegistry::definition`].
    pub fn try_definition(&self, id: DefinitionId) -> Option<&ProfileDefinition> {
        self.entries.get(id.0).map(|e| &e.definition)
    }

    /// Parent of `id`, `None` for the root.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn parent(&self, id: DefinitionId) -> Option<DefinitionId> {
        self.entries[id.0].parent
    }

    /// Compiled rules of a definition (invalid patterns already dropped).
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn rules(&self, id: DefinitionId) -> &[MatchRule] {
        &self.entries[id.0].rules
    }

    /// Definitions in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (DefinitionId, &ProfileDefinition)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(pos, e)| (DefinitionId(pos), &e.definition))
    }

    /// Resolution chain from `id` up to the root, inclusive.
    pub fn chain(&self, id: DefinitionId) -> Vec<DefinitionId> {
        let mut chain = vec![id];
        let mut current = self.parent(id);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    /// True if `ancestor` appears above `id` in its chain.
    pub fn is_ancestor(&self, ancestor: DefinitionId, id: DefinitionId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }
}
