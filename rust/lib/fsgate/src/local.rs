use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::FsError;
use crate::gateway::FsGateway;
use crate::protocol::FsResult;

const WRITE_CHECK_FILE: &str = ".stagehand-write-check";

/// FsGateway over the local filesystem, sandboxed under `root`.
///
/// Gateway paths map to paths under `root`:
///   "src/app/produtos"  → `{root}/src/app/produtos`
///   "/src/app/produtos" → `{root}/src/app/produtos`
///
/// Paths containing `..` are rejected, as are paths whose existing part
/// resolves (through symlinks) outside `root`.
pub struct LocalGateway {
    root: PathBuf,
    max_file_bytes: Option<usize>,
}

impl LocalGateway {
    /// Create a gateway rooted at `root`. The directory is created if it
    /// doesn't exist.
    pub fn open(root: &Path) -> Result<Self, FsError> {
        std::fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            max_file_bytes: None,
        })
    }

    /// Reject `create_file` contents larger than `limit` bytes.
    pub fn with_max_file_bytes(mut self, limit: usize) -> Self {
        self.max_file_bytes = Some(limit);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a gateway path to a filesystem path under the canonical root.
    ///
    /// Every existing component is inspected without following it. A
    /// symlink is only accepted when its target exists and lies under
    /// root, so dangling links are rejected.
    pub async fn resolve(&self, path: &str) -> Result<PathBuf, FsError> {
        if path.trim().is_empty() || path.contains('\0') {
            return Err(FsError::InvalidPath(path.to_string()));
        }

        let canonical_root = tokio::fs::canonicalize(&self.root).await?;
        let mut resolved = canonical_root.clone();
        let mut on_disk = true;
        for component in Path::new(path).components() {
            let part = match component {
                Component::Normal(part) => part,
                Component::RootDir | Component::CurDir | Component::Prefix(_) => continue,
                Component::ParentDir => return Err(FsError::Traversal(path.to_string())),
            };
            resolved.push(part);
            if !on_disk {
                continue;
            }
            match tokio::fs::symlink_metadata(&resolved).await {
                Ok(meta) if meta.file_type().is_symlink() => {
                    let target = tokio::fs::canonicalize(&resolved)
                        .await
                        .map_err(|_| FsError::Traversal(path.to_string()))?;
                    if !target.starts_with(&canonical_root) {
                        return Err(FsError::Traversal(path.to_string()));
                    }
                    resolved = target;
                }
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => on_disk = false,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(resolved)
    }

    async fn ensure_dir(&self, path: &str) -> Result<(), FsError> {
        let dir = self.resolve(path).await?;
        if let Some(meta) = metadata(&dir).await {
            if !meta.is_dir() {
                return Err(FsError::NotADirectory(path.to_string()));
            }
        }
        tokio::fs::create_dir_all(&dir).await?;
        Ok(())
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), FsError> {
        if let Some(limit) = self.max_file_bytes {
            if content.len() > limit {
                return Err(FsError::TooLarge {
                    size: content.len(),
                    limit,
                });
            }
        }
        let file = self.resolve(path).await?;
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file, content).await?;
        Ok(())
    }

    async fn check_write(&self, path: &str) -> Result<(), FsError> {
        let dir = self.resolve(path).await?;
        if !metadata(&dir).await.is_some_and(|meta| meta.is_dir()) {
            return Err(FsError::NotADirectory(path.to_string()));
        }
        let marker = dir.join(WRITE_CHECK_FILE);
        tokio::fs::write(&marker, b"").await?;
        tokio::fs::remove_file(&marker).await?;
        Ok(())
    }
}

async fn metadata(path: &Path) -> Option<std::fs::Metadata> {
    tokio::fs::metadata(path).await.ok()
}

fn into_result(path: &str, op: &str, outcome: Result<(), FsError>) -> FsResult {
    match outcome {
        Ok(()) => FsResult::ok(),
        Err(e) => {
            tracing::warn!("{} {} failed: {}", op, path, e);
            e.into()
        }
    }
}

#[async_trait]
impl FsGateway for LocalGateway {
    async fn ensure_directory_exists(&self, path: &str) -> FsResult {
        into_result(path, "ensureDir", self.ensure_dir(path).await)
    }

    async fn file_exists(&self, path: &str) -> bool {
        match self.resolve(path).await {
            Ok(file) => metadata(&file).await.is_some_and(|meta| meta.is_file()),
            Err(_) => false,
        }
    }

    async fn create_file(&self, path: &str, content: &str) -> FsResult {
        into_result(path, "createFile", self.write_file(path, content).await)
    }

    async fn check_write_permission(&self, path: &str) -> FsResult {
        into_result(path, "checkWritePermission", self.check_write(path).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> (tempfile::TempDir, LocalGateway) {
        let dir = tempfile::tempdir().unwrap();
        let gateway = LocalGateway::open(dir.path()).unwrap();
        (dir, gateway)
    }

    #[tokio::test]
    async fn ensure_dir_and_write() {
        let (dir, gateway) = gateway();

        assert!(gateway.ensure_directory_exists("app/produtos/components").await.success);
        assert!(dir.path().join("app/produtos/components").is_dir());
        // Idempotent.
        assert!(gateway.ensure_directory_exists("app/produtos").await.success);

        assert!(!gateway.file_exists("app/produtos/page.tsx").await);
        assert!(gateway.create_file("app/produtos/page.tsx", "x").await.success);
        assert!(gateway.file_exists("app/produtos/page.tsx").await);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("app/produtos/page.tsx")).unwrap(),
            "x"
        );
    }

    #[tokio::test]
    async fn leading_slash_stays_in_root() {
        let (dir, gateway) = gateway();
        assert!(gateway.ensure_directory_exists("/abs/path").await.success);
        assert!(dir.path().join("abs/path").is_dir());
    }

    #[tokio::test]
    async fn traversal_rejected() {
        let (_dir, gateway) = gateway();
        let result = gateway.ensure_directory_exists("app/../../etc").await;
        assert!(!result.success);
        assert!(result.message().contains("escapes"));
        assert!(!gateway.file_exists("../secret").await);
    }

    #[tokio::test]
    async fn empty_path_rejected() {
        let (_dir, gateway) = gateway();
        assert!(!gateway.create_file("", "x").await.success);
    }

    #[tokio::test]
    async fn write_permission_check() {
        let (dir, gateway) = gateway();
        gateway.ensure_directory_exists("app").await;
        assert!(gateway.check_write_permission("app").await.success);
        assert!(!dir.path().join("app").join(WRITE_CHECK_FILE).exists());

        let result = gateway.check_write_permission("missing").await;
        assert!(!result.success);
        assert!(result.message().contains("not a directory"));
    }

    #[tokio::test]
    async fn ensure_dir_over_file_fails() {
        let (_dir, gateway) = gateway();
        gateway.create_file("app/page.tsx", "x").await;
        assert!(!gateway.ensure_directory_exists("app/page.tsx").await.success);
    }

    #[tokio::test]
    async fn size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = LocalGateway::open(dir.path()).unwrap().with_max_file_bytes(4);
        assert!(gateway.create_file("a.txt", "1234").await.success);
        let result = gateway.create_file("b.txt", "12345").await;
        assert!(!result.success);
        assert!(result.message().contains("too large"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlink_escape_rejected() {
        let (dir, gateway) = gateway();
        let outside = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();
        let result = gateway.create_file("link/x.txt", "x").await;
        assert!(!result.success);
        assert!(!outside.path().join("x.txt").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn dangling_symlink_rejected() {
        let (dir, gateway) = gateway();
        let outside = tempfile::tempdir().unwrap();
        let target = outside.path().join("escaped.txt");
        std::os::unix::fs::symlink(&target, dir.path().join("link")).unwrap();

        let result = gateway.create_file("link", "pwned").await;
        assert!(!result.success);
        assert!(result.message().contains("escapes"));
        assert!(!target.exists());

        std::os::unix::fs::symlink(outside.path().join("dir"), dir.path().join("dirlink")).unwrap();
        assert!(!gateway.ensure_directory_exists("dirlink/sub").await.success);
        assert!(!outside.path().join("dir").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlink_inside_root_allowed() {
        let (dir, gateway) = gateway();
        std::fs::create_dir_all(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();
        assert!(gateway.create_file("alias/page.tsx", "x").await.success);
        assert!(dir.path().join("real/page.tsx").is_file());
    }
}
