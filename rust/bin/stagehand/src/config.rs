//! Client-side configuration.
//!
//! Reads/writes `~/.stagehand/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stagehand_core::ServiceConfig;

/// Client configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of a stagehandd instance (e.g. "http://127.0.0.1:7878").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Upper bound for a single remote call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Field assistant endpoint used by `fields generate`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub assistant_url: String,

    /// Directory holding the draft database (default: ~/.stagehand).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_dir: String,
}

fn default_timeout_secs() -> u64 {
    ServiceConfig::default().timeout_secs
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            timeout_secs: default_timeout_secs(),
            assistant_url: String::new(),
            data_dir: String::new(),
        }
    }
}

impl ClientConfig {
    /// Default config file path: ~/.stagehand/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Runtime config. `local_root` is the sandbox for local generation.
    pub fn to_service_config(&self, local_root: Option<&str>) -> ServiceConfig {
        let data_dir = if self.data_dir.is_empty() {
            dirs_path()
        } else {
            PathBuf::from(&self.data_dir)
        };
        ServiceConfig {
            root_dir: local_root.map(PathBuf::from),
            data_dir: Some(data_dir),
            timeout_secs: self.timeout_secs,
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Return the stagehand config directory (~/.stagehand).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".stagehand")
}
