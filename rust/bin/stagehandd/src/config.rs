//! Server-side configuration.
//!
//! Read from `/etc/stagehand/<name>.toml` or an explicit path:
//!
//! ```toml
//! [server]
//! listen = "127.0.0.1:7878"
//!
//! [storage]
//! root_dir = "/srv/site"
//! data_dir = "/var/lib/stagehand"
//!
//! [limits]
//! max_file_bytes = 1048576
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stagehand_core::ServiceConfig;

const CONFIG_DIR: &str = "/etc/stagehand";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    pub storage: StorageConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    ServiceConfig::default().listen
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Sandbox root of the filesystem endpoint.
    pub root_dir: String,
    /// Directory of the draft database. Defaults to `root_dir/.stagehand`.
    #[serde(default)]
    pub data_dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest file `createFile` accepts.
    #[serde(default)]
    pub max_file_bytes: Option<usize>,
}

impl ServerConfig {
    /// A bare name resolves to `/etc/stagehand/<name>.toml`; anything that
    /// looks like a path (contains `/` or `.`) is used as is.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            Path::new(CONFIG_DIR).join(format!("{}.toml", name_or_path))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Runtime config, with `listen` taking precedence over the file.
    pub fn to_service_config(&self, listen: Option<&str>) -> ServiceConfig {
        let root_dir = PathBuf::from(&self.storage.root_dir);
        let data_dir = if self.storage.data_dir.is_empty() {
            root_dir.join(".stagehand")
        } else {
            PathBuf::from(&self.storage.data_dir)
        };
        ServiceConfig {
            root_dir: Some(root_dir),
            data_dir: Some(data_dir),
            listen: listen.unwrap_or(&self.server.listen).to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_by_name() {
        assert_eq!(
            ServerConfig::resolve_path("site"),
            PathBuf::from("/etc/stagehand/site.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./site.toml"),
            PathBuf::from("./site.toml")
        );
    }

    #[test]
    fn parse_minimal() {
        let config: ServerConfig = toml::from_str(
            r#"
            [storage]
            root_dir = "/srv/site"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:7878");
        assert_eq!(config.limits.max_file_bytes, None);

        let service = config.to_service_config(None);
        assert_eq!(service.resolve_root_dir(), PathBuf::from("/srv/site"));
        assert_eq!(
            service.resolve_db_path(),
            PathBuf::from("/srv/site/.stagehand/drafts.redb")
        );
    }

    #[test]
    fn parse_full_and_override_listen() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            listen = "0.0.0.0:9000"

            [storage]
            root_dir = "/srv/site"
            data_dir = "/var/lib/stagehand"

            [limits]
            max_file_bytes = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.limits.max_file_bytes, Some(1024));
        assert_eq!(config.to_service_config(None).listen, "0.0.0.0:9000");
        assert_eq!(
            config.to_service_config(Some("127.0.0.1:1")).listen,
            "127.0.0.1:1"
        );
        assert_eq!(
            config.to_service_config(None).resolve_db_path(),
            PathBuf::from("/var/lib/stagehand/drafts.redb")
        );
    }
}
