//! Identifier → definition matching.
//!
//! Every definition whose rules fully match the identifier is a candidate.
//! Selection order:
//!
//! 1. a candidate that is an ancestor of another candidate is dropped, since
//!    the descendant refines it;
//! 2. higher explicit `priority` wins;
//! 3. longer matching rule (in characters) wins;
//! 4. the earliest discovered definition wins the remaining ties.

use crate::definition::{DefinitionId, ProfileDefinition};
use crate::registry::ProfileRegistry;

/// A definition with at least one rule matching the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub id: DefinitionId,
    /// Explicit priority of the definition
    pub priority: i32,
    /// Length of the longest rule that matched
    pub specificity: usize,
}

impl Candidate {
    fn rank(&self) -> (i32, usize) {
        (self.priority, self.specificity)
    }
}

impl ProfileRegistry {
    /// All definitions with a fully matching rule, in discovery order.
    pub fn candidates(&self, identifier: &str) -> Vec<Candidate> {
        self.iter()
            .filter_map(|(id, definition)| {
                self.rules(id)
                    .iter()
                    .filter(|rule| rule.is_match(identifier))
                    .map(|rule| rule.specificity())
                    .max()
                    .map(|specificity| Candidate {
                        id,
                        priority: definition.priority,
                        specificity,
                    })
            })
            .collect()
    }

    /// Select the single best-matching definition for `identifier`.
    pub fn find_profile(&self, identifier: &str) -> Option<DefinitionId> {
        let candidates = self.candidates(identifier);
        if candidates.is_empty() {
            log::debug!("No profile rule matches '{}'", identifier);
            return None;
        }

        let best = candidates
            .iter()
            .filter(|c| {
                !candidates
                    .iter()
                    .any(|other| other.id != c.id && self.is_ancestor(c.id, other.id))
            })
            .fold(None::<&Candidate>, |best, c| match best {
                Some(b) if c.rank() <= b.rank() => Some(b),
                _ => Some(c),
            })?;

        log::debug!(
            "Identifier '{}' matched profile '{}' ({} candidates, specificity {}, priority {})",
            identifier,
            self.definition(best.id).name,
            candidates.len(),
            best.specificity,
            best.priority
        );
        Some(best.id)
    }

    /// [`ProfileRegistry::find_profile`] returning the definition itself.
    pub fn find_definition(&self, identifier: &str) -> Option<&ProfileDefinition> {
        self.find_profile(identifier).map(|id| self.definition(id))
    }
}
