//! Configuration schema for depinject
//!
//! Configuration is stored at `~/.config/depinject/config.toml`

use crate::cache::DEFAULT_CACHE_ROOT;
use crate::context::DEFAULT_PATH_VAR;
use crate::fetch::USER_AGENT;
use crate::repository::DEFAULT_REPOSITORY;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Local artifact cache
    pub cache: CacheConfig,

    /// Download settings
    pub fetch: FetchConfig,

    /// Repository selection and custom repositories
    pub repositories: RepositoriesConfig,

    /// Injection settings
    pub inject: InjectConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root, relative paths resolve against the working directory
    pub root: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_CACHE_ROOT),
        }
    }
}

/// Download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds (0 = wait indefinitely)
    pub timeout_secs: u64,

    /// User-Agent header
    pub user_agent: String,

    /// Show a progress bar on interactive terminals
    pub progress: bool,
}

impl FetchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 0,
            user_agent: USER_AGENT.to_string(),
            progress: true,
        }
    }
}

/// Repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoriesConfig {
    /// Repository name or URL used when none is given
    pub default: String,

    /// Additional named repositories (name = URL)
    pub custom: BTreeMap<String, String>,
}

impl Default for RepositoriesConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_REPOSITORY.to_string(),
            custom: BTreeMap::new(),
        }
    }
}

/// Injection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectConfig {
    /// Environment variable extended by `exec`
    pub path_var: String,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            path_var: DEFAULT_PATH_VAR.to_string(),
        }
    }
}
