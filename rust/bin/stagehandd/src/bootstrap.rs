//! Bootstrap: first-start checks and storage setup.

use std::path::Path;
use std::sync::Arc;

use stagehand_fsgate::LocalGateway;
use stagehand_kv::{KVStore, RedbStore};
use tracing::info;

use crate::config::ServerConfig;

/// Refuse to start on a configuration that cannot work.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.storage.root_dir.trim().is_empty() {
        anyhow::bail!("Storage root_dir is empty in configuration.");
    }
    if config.limits.max_file_bytes == Some(0) {
        anyhow::bail!("limits.max_file_bytes must be greater than zero.");
    }
    Ok(())
}

/// Open the sandboxed gateway, creating the root if needed.
pub fn open_gateway(root: &Path, max_file_bytes: Option<usize>) -> anyhow::Result<Arc<LocalGateway>> {
    let mut gateway = LocalGateway::open(root)
        .map_err(|e| anyhow::anyhow!("failed to open filesystem root {}: {}", root.display(), e))?;
    if let Some(limit) = max_file_bytes {
        gateway = gateway.with_max_file_bytes(limit);
    }
    info!("Filesystem root: {}", root.display());
    Ok(Arc::new(gateway))
}

/// Open the draft database, creating its directory if needed.
pub fn open_drafts(db_path: &Path) -> anyhow::Result<Arc<dyn KVStore>> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let kv = RedbStore::open(db_path)
        .map_err(|e| anyhow::anyhow!("failed to open draft store: {}", e))?;
    info!("Draft store: {}", db_path.display());
    Ok(Arc::new(kv))
}
