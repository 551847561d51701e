//! Hierarchical firmware profile resolution.
//!
//! Given a free-form firmware identifier (`"v25.05-testbuild"`), fwprofile
//! selects the best-matching profile definition from a single-parent tree and
//! answers queries against it by cascading through the definition's ancestor
//! chain:
//!
//! - scalar attributes: the most specific redeclaration wins
//! - list attributes: every level contributes, merged most-specific-first
//! - resource files: found in the most specific level's directory that has them
//! - conditional includes: appended when a runtime flag is enabled
//!
//! ```rust,no_run
//! use fwprofile::{FlagSettings, ProfileResolver, ResolverConfig, slots};
//!
//! let resolver = ProfileResolver::from_config(ResolverConfig::default())?;
//! let profile = resolver.require("v25.05-testbuild")?;
//! let board = profile.attribute_str(slots::BOARD);
//! let includes = profile.resolve_includes(&FlagSettings::new().with("ZMK_POINTING", true));
//! # Ok::<(), fwprofile::ResolveError>(())
//! ```

pub mod builtin;
pub mod cascade;
pub mod definition;
pub mod discovery;
pub mod error;
pub mod includes;
pub mod locator;
pub mod matcher;
pub mod registry;
pub mod resolved;
pub mod resolver;
pub mod schema;
pub mod snapshot;

pub use cascade::AttributeOrigin;
pub use definition::{DefinitionId, ProfileDefinition};
pub use discovery::{BuiltinSource, DefinitionSource, DirectorySource};
pub use error::{RegistryError, ResolveError};
pub use includes::ConditionalInclude;
pub use matcher::Candidate;
pub use registry::{MatchRule, ProfileRegistry, RegistryBuilder};
pub use resolved::ResolvedProfile;
pub use resolver::ProfileResolver;
pub use schema::{SlotKind, SlotSchema, slots};
pub use snapshot::ProfileSnapshot;

// Re-export the configuration types callers pass in
pub use fwprofile_config::{FlagSettings, ResolverConfig, StructuredResource};
