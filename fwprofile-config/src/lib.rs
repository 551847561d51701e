//! Configuration support for the fwprofile resolver.
//!
//! This crate provides the pieces of the resolver that touch the outside
//! world:
//!
//! - Resolver configuration (`config.yaml`, `${VAR}` substitution, env overrides)
//! - Runtime flag settings used by conditional includes
//! - Resource loading (YAML / JSON / TOML mappings and raw text)
//! - Path helpers guarding resource filenames against traversal

pub mod config;
pub mod defaults;
pub mod error;
pub mod paths;
pub mod resource;
pub mod settings;

pub use config::{ResolverConfig, substitute_variables};
pub use error::ConfigError;
pub use paths::{resource_path, validate_resource_name};
pub use resource::{ResourceFormat, ResourceLoader, StructuredResource};
pub use settings::FlagSettings;
