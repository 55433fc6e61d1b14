use serde::{Deserialize, Serialize};

// ── Wire types ──────────────────────────────────────────────────────
//
// Body of `POST /api/filesystem`:
//   {"operation": "ensureDir", "path": "app/produtos"}
//   {"operation": "createFile", "path": "app/produtos/page.tsx", "content": "..."}
//
// Every answer is `{"success": bool, "error"?: string}` except
// `fileExists`, which answers `{"exists": bool}`.

/// The gateway operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    EnsureDir,
    FileExists,
    CreateFile,
    CheckWritePermission,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnsureDir => "ensureDir",
            Self::FileExists => "fileExists",
            Self::CreateFile => "createFile",
            Self::CheckWritePermission => "checkWritePermission",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ensureDir" => Some(Self::EnsureDir),
            "fileExists" => Some(Self::FileExists),
            "createFile" => Some(Self::CreateFile),
            "checkWritePermission" => Some(Self::CheckWritePermission),
            _ => None,
        }
    }
}

/// Request body. `operation` stays a string so unknown operations can be
/// answered with a failure result instead of a rejected body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsRequest {
    pub operation: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FsRequest {
    pub fn new(operation: Operation, path: impl Into<String>) -> Self {
        Self {
            operation: operation.as_str().to_string(),
            path: path.into(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Outcome of every operation except `fileExists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FsResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }

    /// Error text of a failed result. Empty for successes.
    pub fn message(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

// ── Page layout ─────────────────────────────────────────────────────

/// The three directories of a generated page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePaths {
    pub page_dir: String,
    pub components_dir: String,
    pub api_dir: String,
}

impl PagePaths {
    /// `base/page`, `base/page/components`, `base/page/api`.
    ///
    /// Inputs are joined as given; callers normalize them first.
    pub fn derive(base_path: &str, page_name: &str) -> Self {
        let base = base_path.trim_end_matches('/');
        let page = page_name.trim_matches('/');
        let page_dir = if base.is_empty() && base_path.starts_with('/') {
            format!("/{}", page)
        } else if base.is_empty() {
            page.to_string()
        } else {
            format!("{}/{}", base, page)
        };
        Self {
            components_dir: format!("{}/components", page_dir),
            api_dir: format!("{}/api", page_dir),
            page_dir,
        }
    }

    /// In creation order.
    pub fn dirs(&self) -> [&str; 3] {
        [&self.page_dir, &self.components_dir, &self.api_dir]
    }
}

/// Result of the composite path check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathValidation {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<PagePaths>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PathValidation {
    pub fn ok(paths: PagePaths) -> Self {
        Self {
            success: true,
            paths: Some(paths),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            paths: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names() {
        for op in [
            Operation::EnsureDir,
            Operation::FileExists,
            Operation::CreateFile,
            Operation::CheckWritePermission,
        ] {
            assert_eq!(Operation::parse(op.as_str()), Some(op));
        }
        assert_eq!(Operation::parse("deleteFile"), None);
    }

    #[test]
    fn request_wire_shape() {
        let req = FsRequest::new(Operation::EnsureDir, "app/x");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"operation": "ensureDir", "path": "app/x"})
        );

        let req = FsRequest::new(Operation::CreateFile, "app/x/page.tsx").with_content("hi");
        assert_eq!(serde_json::to_value(&req).unwrap()["content"], "hi");
    }

    #[test]
    fn result_wire_shape() {
        assert_eq!(
            serde_json::to_string(&FsResult::ok()).unwrap(),
            r#"{"success":true}"#
        );
        assert_eq!(
            serde_json::to_string(&FsResult::failure("nope")).unwrap(),
            r#"{"success":false,"error":"nope"}"#
        );
    }

    #[test]
    fn derive_paths() {
        let paths = PagePaths::derive("src/app/", "produtos");
        assert_eq!(paths.page_dir, "src/app/produtos");
        assert_eq!(paths.components_dir, "src/app/produtos/components");
        assert_eq!(paths.api_dir, "src/app/produtos/api");
        assert_eq!(
            paths.dirs(),
            ["src/app/produtos", "src/app/produtos/components", "src/app/produtos/api"]
        );

        let json = serde_json::to_value(&paths).unwrap();
        assert_eq!(json["pageDir"], "src/app/produtos");
    }

    #[test]
    fn derive_paths_absolute_base() {
        assert_eq!(PagePaths::derive("/", "x").page_dir, "/x");
        assert_eq!(PagePaths::derive("", "x").page_dir, "x");
        assert_eq!(PagePaths::derive("/srv/app", "x").page_dir, "/srv/app/x");
    }
}
