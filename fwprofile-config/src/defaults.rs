//! Default values and well-known names.
//!
//! The free functions double as `#[serde(default = "crate::defaults::...")]`
//! attributes on [`crate::ResolverConfig`] fields.

use std::path::PathBuf;

/// Directory name used under the platform config dir
pub const APP_DIR_NAME: &str = "fwprofile";

/// Resolver configuration file name
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Sub-directory holding the per-profile resource directories
pub const PROFILES_DIR_NAME: &str = "profiles";

/// Environment variable overriding [`crate::ResolverConfig::config_root`]
pub const ENV_CONFIG_ROOT: &str = "FWPROFILE_CONFIG_ROOT";

/// Environment variable overriding [`crate::ResolverConfig::definitions_dir`]
pub const ENV_DEFINITIONS_DIR: &str = "FWPROFILE_DEFINITIONS_DIR";

/// Flag sentinel meaning "enabled"
pub const FLAG_ENABLED: &str = "y";

/// Flag sentinel meaning "disabled"
pub const FLAG_DISABLED: &str = "n";

/// Get the configuration directory path (using XDG convention)
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join(APP_DIR_NAME)
        } else {
            PathBuf::from(".")
        }
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".config").join(APP_DIR_NAME)
        } else {
            PathBuf::from(".")
        }
    }
}

/// Default location of the resolver configuration file
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Default root of the per-profile resource directories
pub fn config_root() -> PathBuf {
    config_dir().join(PROFILES_DIR_NAME)
}

pub fn bool_true() -> bool {
    true
}
