//! Typed error types for fwprofile.
//!
//! Lookups follow a NotFound-is-`None` convention and never fail. Only a
//! structurally invalid definition set (caught while building the registry)
//! and a caller explicitly requiring a match produce errors.

use thiserror::Error;

use crate::schema::SlotKind;

/// A definition set that cannot form a single rooted inheritance tree, or
/// whose definitions violate the slot schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A definition names a parent that was never registered.
    #[error("profile '{profile}' names unknown parent '{parent}'")]
    UnknownParent {
        /// Definition carrying the dangling reference.
        profile: String,
        /// Parent name that could not be found.
        parent: String,
    },

    /// Following parent links from this definition never reaches a root.
    #[error("profile inheritance cycle through '{0}'")]
    Cycle(String),

    /// More than one definition has no parent.
    #[error("multiple root profiles: {}", .0.join(", "))]
    MultipleRoots(Vec<String>),

    /// A definition declares a slot the schema does not know.
    #[error("profile '{profile}' declares unknown attribute slot '{slot}'")]
    UnknownSlot {
        /// Offending definition.
        profile: String,
        /// Undeclared slot name.
        slot: String,
    },

    /// A definition sets a slot to a value its kind cannot hold.
    #[error("profile '{profile}' sets {kind} slot '{slot}' to an incompatible value: {value}")]
    SlotKind {
        /// Offending definition.
        profile: String,
        /// Slot name.
        slot: String,
        /// Kind declared by the schema.
        kind: SlotKind,
        /// The rejected value, rendered as JSON.
        value: String,
    },
}

/// Errors surfaced by [`crate::ProfileResolver`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No registered definition matches the identifier.
    #[error("no profile matches '{identifier}' (known profiles: {})", known.join(", "))]
    NoMatch {
        /// The identifier that was looked up.
        identifier: String,
        /// Names of all registered definitions, in discovery order.
        known: Vec<String>,
    },

    /// The definition set could not be turned into a registry.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The resolver configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] anyhow::Error),
}
