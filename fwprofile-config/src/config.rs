//! Resolver configuration.
//!
//! Tells the resolver where profile resource directories live and where to
//! discover extra profile definitions. Loaded from
//! `~/.config/fwprofile/config.yaml` when present, otherwise defaults; the
//! `FWPROFILE_CONFIG_ROOT` and `FWPROFILE_DEFINITIONS_DIR` environment
//! variables take precedence over the file.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::defaults;

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-((?:[^}\\]|\\.)*))?}").expect("invalid regex")
});

/// Substitute `${VAR_NAME}` patterns in a string with environment variable values.
///
/// - `${VAR}` is replaced with the value of the environment variable `VAR`.
/// - If the variable is not set, the `${VAR}` placeholder is left unchanged.
/// - `$${VAR}` (doubled dollar sign) is an escape and produces the literal `${VAR}`.
/// - `${VAR:-default}` provides a default value when the variable is unset.
pub fn substitute_variables(input: &str) -> String {
    substitute_variables_with(input, |name| std::env::var(name).ok())
}

/// [`substitute_variables`] with an explicit variable lookup.
pub fn substitute_variables_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let escaped_placeholder = "\x00ESC_DOLLAR\x00";
    let working = input.replace("$${", escaped_placeholder);

    let result = VARIABLE_RE.replace_all(&working, |caps: &regex::Captures| {
        match lookup(&caps[1]) {
            Some(val) => val,
            None => caps
                .get(2)
                .map(|m| m.as_str().replace("\\}", "}"))
                .unwrap_or_else(|| caps[0].to_string()),
        }
    });

    result.replace(escaped_placeholder, "${")
}

/// Where the resolver finds profile resources and definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Root directory holding one sub-directory per profile `directory` name
    #[serde(default = "defaults::config_root")]
    pub config_root: PathBuf,

    /// Optional directory of extra profile definition files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions_dir: Option<PathBuf>,

    /// Whether the compiled-in profile catalogue is registered
    #[serde(default = "defaults::bool_true")]
    pub builtin_definitions: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            config_root: defaults::config_root(),
            definitions_dir: None,
            builtin_definitions: true,
        }
    }
}

impl ResolverConfig {
    /// Configuration rooted at an explicit directory, builtin definitions only.
    pub fn with_config_root(config_root: impl Into<PathBuf>) -> Self {
        Self {
            config_root: config_root.into(),
            ..Self::default()
        }
    }

    pub fn with_definitions_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.definitions_dir = Some(dir.into());
        self
    }

    pub fn without_builtin_definitions(mut self) -> Self {
        self.builtin_definitions = false;
        self
    }

    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&defaults::config_path())?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Resolver config path: {:?}", path);

        if !path.exists() {
            log::info!("Resolver config not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read resolver config {}", path.display()))?;
        let contents = substitute_variables(&contents);
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: ResolverConfig = serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("failed to parse resolver config {}", path.display()))?;
        config.expand_home_dirs();
        Ok(config)
    }

    /// Apply `FWPROFILE_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(defaults::ENV_CONFIG_ROOT).filter(|v| !v.is_empty()) {
            log::info!("{} overrides config root: {}", defaults::ENV_CONFIG_ROOT, root);
            self.config_root = PathBuf::from(root);
        }
        if let Some(dir) = lookup(defaults::ENV_DEFINITIONS_DIR).filter(|v| !v.is_empty()) {
            log::info!(
                "{} overrides definitions dir: {}",
                defaults::ENV_DEFINITIONS_DIR,
                dir
            );
            self.definitions_dir = Some(PathBuf::from(dir));
        }
        self.expand_home_dirs();
    }

    fn expand_home_dirs(&mut self) {
        self.config_root = expand_home_dir(&self.config_root);
        self.definitions_dir = self.definitions_dir.as_deref().map(expand_home_dir);
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_home_dir(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
