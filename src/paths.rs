//! Path resolution for javactl
//!
//! # Environment Variables
//!
//! - `JAVACTL_CONFIG` - Override the config file location
//!
//! # Config File Priority
//!
//! 1. `--config` flag (must exist)
//! 2. `JAVACTL_CONFIG` environment variable (must exist)
//! 3. `/etc/javactl/config.toml` (optional; defaults apply when absent)

use std::path::{Path, PathBuf};

/// Environment variable for config file override
pub const ENV_CONFIG: &str = "JAVACTL_CONFIG";

/// System-wide config file
pub const DEFAULT_CONFIG: &str = "/etc/javactl/config.toml";

/// Where to read settings from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: PathBuf,
    /// Whether a missing file is an error.
    pub required: bool,
}

/// Resolve the config file, given the `--config` flag value.
pub fn config_file(flag: Option<&Path>) -> ConfigSource {
    if let Some(path) = flag {
        let path = expand(&path.to_string_lossy());
        log::debug!("Using config from --config: {}", path.display());
        return ConfigSource {
            path,
            required: true,
        };
    }

    if let Ok(value) = std::env::var(ENV_CONFIG)
        && !value.is_empty()
    {
        let path = expand(&value);
        log::debug!("Using config from {}: {}", ENV_CONFIG, path.display());
        return ConfigSource {
            path,
            required: true,
        };
    }

    log::debug!("Using default config: {}", DEFAULT_CONFIG);
    ConfigSource {
        path: PathBuf::from(DEFAULT_CONFIG),
        required: false,
    }
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}
