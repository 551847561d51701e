//! Resolver front door.
//!
//! Owns the registry and the resolver configuration, and hands out
//! [`ResolvedProfile`] views for identifiers.

use fwprofile_config::ResolverConfig;

use crate::error::{RegistryError, ResolveError};
use crate::registry::ProfileRegistry;
use crate::resolved::ResolvedProfile;

/// Registry plus configuration; build once, resolve many times.
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    registry: ProfileRegistry,
    config: ResolverConfig,
}

impl ProfileResolver {
    pub fn new(registry: ProfileRegistry, config: ResolverConfig) -> Self {
        Self { registry, config }
    }

    /// Discover definitions as described by `config`.
    pub fn from_config(config: ResolverConfig) -> Result<Self, RegistryError> {
        let registry = ProfileRegistry::from_config(&config)?;
        Ok(Self::new(registry, config))
    }

    /// Load `~/.config/fwprofile/config.yaml` (plus env overrides) and discover.
    pub fn load() -> Result<Self, ResolveError> {
        let config = ResolverConfig::load()?;
        Ok(Self::from_config(config)?)
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `identifier`, or `None` when no definition matches.
    pub fn resolve(&self, identifier: &str) -> Option<ResolvedProfile<'_>> {
        let id = self.registry.find_profile(identifier)?;
        Some(ResolvedProfile::new(
            &self.registry,
            id,
            &self.config.config_root,
        ))
    }

    /// Resolve `identifier`, turning a miss into an actionable error.
    pub fn require(&self, identifier: &str) -> Result<ResolvedProfile<'_>, ResolveError> {
        self.resolve(identifier)
            .ok_or_else(|| ResolveError::NoMatch {
                identifier: identifier.to_string(),
                known: self.registry.names().into_iter().map(String::from).collect(),
            })
    }
}
