use async_trait::async_trait;

use crate::protocol::{FsResult, PagePaths, PathValidation};

/// Filesystem operations the page generator needs.
///
/// Implementations never return transport or I/O errors directly: every
/// failure is folded into `FsResult { success: false, error }`, and
/// `file_exists` answers `false` when the answer cannot be obtained.
#[async_trait]
pub trait FsGateway: Send + Sync {
    /// Create `path` and any missing parents. Succeeds if it already exists.
    async fn ensure_directory_exists(&self, path: &str) -> FsResult;

    async fn file_exists(&self, path: &str) -> bool;

    /// Write `content` to `path`, replacing any existing file.
    async fn create_file(&self, path: &str, content: &str) -> FsResult;

    async fn check_write_permission(&self, path: &str) -> FsResult;

    /// Derive the page layout under `base_path/page_name`, then ensure each
    /// directory exists and is writable, in order. Stops at the first
    /// failure and reports it.
    async fn validate_path(&self, base_path: &str, page_name: &str) -> PathValidation {
        let paths = PagePaths::derive(base_path, page_name);

        for dir in paths.dirs() {
            let created = self.ensure_directory_exists(dir).await;
            if !created.success {
                return PathValidation::failure(created.message());
            }
            let writable = self.check_write_permission(dir).await;
            if !writable.success {
                return PathValidation::failure(writable.message());
            }
        }

        PathValidation::ok(paths)
    }
}
