use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::LabelPolicy;
use crate::error::{GitVersionError, Result};
use crate::session::DEFAULT_CHAR_LIMIT;

/// File name looked up in the repository root
pub const REPO_CONFIG_FILE: &str = "gitversion.toml";

/// Represents the complete configuration for git-version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub bump: BumpConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Configuration for version bumping.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BumpConfig {
    /// Which bump kinds carry a `--label`
    #[serde(default)]
    pub label_policy: LabelPolicy,
}

fn default_char_limit() -> usize {
    DEFAULT_CHAR_LIMIT
}

fn default_autofill() -> bool {
    true
}

/// Configuration for the interactive annotation session.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SessionConfig {
    /// Maximum annotation length in characters, 0 for unlimited
    #[serde(default = "default_char_limit")]
    pub char_limit: usize,

    /// Whether `→` on an empty annotation fills in the HEAD commit message
    #[serde(default = "default_autofill")]
    pub autofill: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            char_limit: default_char_limit(),
            autofill: default_autofill(),
        }
    }
}

/// Per-user configuration file, `<config dir>/git-version/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("git-version").join("config.toml"))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `gitversion.toml` in the repository root
/// 3. `git-version/config.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_path` - Repository root
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, repo_path: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => {
            let repo_config = repo_path.join(REPO_CONFIG_FILE);
            if repo_config.exists() {
                repo_config
            } else if let Some(user_config) = user_config_path().filter(|p| p.exists()) {
                user_config
            } else {
                debug!("no configuration file found, using defaults");
                return Ok(Config::default());
            }
        }
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        GitVersionError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let config = parse_config(&config_str)
        .map_err(|e| GitVersionError::config(format!("{}: {}", path.display(), e)))?;
    debug!(path = %path.display(), "loaded configuration");

    Ok(config)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(config_str)
}
