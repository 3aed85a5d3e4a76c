//! Configuration management for depinject

pub mod schema;

pub use schema::Config;

use crate::error::{DepinjectError, DepinjectResult};
use crate::repository::RepositoryCatalog;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depinject")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file is missing
    pub async fn load(&self) -> DepinjectResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        let config = self.load_from_file(&self.config_path).await?;
        Self::validate(&config, &self.config_path)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> DepinjectResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| DepinjectError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| DepinjectError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Reject values that only fail later, deep inside a command
    fn validate(config: &Config, path: &Path) -> DepinjectResult<()> {
        let invalid = |reason: String| DepinjectError::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        };

        if !matches!(config.general.log_format.as_str(), "text" | "json") {
            return Err(invalid(format!(
                "general.log_format must be \"text\" or \"json\", got \"{}\"",
                config.general.log_format
            )));
        }
        if config.cache.root.as_os_str().is_empty() {
            return Err(invalid("cache.root is empty".to_string()));
        }
        if config.inject.path_var.is_empty() {
            return Err(invalid("inject.path_var is empty".to_string()));
        }
        RepositoryCatalog::with_custom(&config.repositories.custom)
            .map_err(|e| invalid(e.to_string()))?;

        Ok(())
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> DepinjectResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            DepinjectError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> DepinjectResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DepinjectError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
