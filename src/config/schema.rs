//! Configuration schema for labbook-resolve
//!
//! Configuration is stored at `~/.config/labbook-resolve/config.toml`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Local LabBook storage
    pub storage: StorageConfig,

    /// Connection paging defaults
    pub paging: PagingConfig,

    /// Container runtime used for environment status
    pub runtime: RuntimeConfig,

    /// Background job records
    pub jobs: JobsConfig,

    /// Remote repository servers
    pub remote: RemoteSettings,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Acting user when none is given on the command line
    pub username: String,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            username: "default".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// Local LabBook storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory holding `<user>/<owner>/labbooks/<name>`
    pub working_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            working_dir: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("labbooks"),
        }
    }
}

/// Paging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Remote page size when neither `first` nor `last` is given
    pub default_page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: crate::paging::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Supported container runtime CLIs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeBackend {
    #[default]
    Podman,
    Docker,
}

/// Container runtime settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Which CLI to probe
    pub backend: RuntimeBackend,
}

/// Job record settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    /// JSON file of job records (defaults to `<state dir>/jobs.json`)
    pub path: Option<PathBuf>,
}

/// Remote servers, keyed by name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Name of the remote used by remote listing and deletion
    pub default_remote: String,

    /// Known remotes
    pub remotes: BTreeMap<String, RemoteConfig>,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        let mut remotes = BTreeMap::new();
        remotes.insert("repo.gigantum.io".to_string(), RemoteConfig::default());
        Self {
            default_remote: "repo.gigantum.io".to_string(),
            remotes,
        }
    }
}

/// One remote repository server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the project API (e.g. `https://host/api/v4`)
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Base URL of the search index service; when set, deleted projects
    /// are also removed from the index
    pub index_url: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: "https://repo.gigantum.io/api/v4".to_string(),
            timeout_secs: 30,
            index_url: None,
        }
    }
}
