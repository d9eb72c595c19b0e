//! Configuration management for labbook-resolve

pub mod schema;

pub use schema::Config;

use crate::error::{LabError, LabResult};
use schema::RemoteConfig;
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
            .join("labbook-resolve")
            .join("config.toml")
    }

    /// Get the state directory path
    pub fn state_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("labbook-resolve")
    }

    /// Get the default job records path
    pub fn default_jobs_path() -> PathBuf {
        Self::state_dir().join("jobs.json")
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> LabResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> LabResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| LabError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| LabError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> LabResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            LabError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> LabResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| LabError::ConfigDirCreate {
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

impl Config {
    /// The remote named by `remote.default_remote`
    pub fn default_remote(&self) -> LabResult<(&str, &RemoteConfig)> {
        let name = self.remote.default_remote.as_str();
        self.remote
            .remotes
            .get(name)
            .map(|remote| (name, remote))
            .ok_or_else(|| LabError::RemoteNotConfigured(name.to_string()))
    }

    /// Where job records are read from
    pub fn jobs_path(&self) -> PathBuf {
        self.jobs
            .path
            .clone()
            .unwrap_or_else(ConfigManager::default_jobs_path)
    }
}
