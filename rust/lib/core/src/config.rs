use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration shared by the daemon and the CLI.
///
/// Both binaries fill it from their own sources (TOML file, flags) and
/// resolve paths through it.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory every filesystem gateway operation is confined to.
    /// Defaults to the current directory.
    pub root_dir: Option<PathBuf>,

    /// Directory holding the draft database.
    pub data_dir: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,

    /// Upper bound for a single remote call, in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            data_dir: None,
            listen: "127.0.0.1:7878".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ServiceConfig {
    /// Resolve the sandbox root, falling back to `.`.
    pub fn resolve_root_dir(&self) -> PathBuf {
        self.root_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the redb draft database path: `{data_dir}/drafts.redb`,
    /// or `./drafts.redb` without a data dir.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("drafts.redb")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
