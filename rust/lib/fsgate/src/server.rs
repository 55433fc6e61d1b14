use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use stagehand_core::Module;

use crate::gateway::FsGateway;
use crate::local::LocalGateway;
use crate::protocol::{ExistsResponse, FsRequest, FsResult, Operation};

/// Route of the filesystem endpoint.
pub const FILESYSTEM_PATH: &str = "/api/filesystem";

/// `POST /api/filesystem` backed by `gateway`.
///
/// Malformed bodies are rejected by axum's JSON extractor (4xx). Operation
/// failures, including unknown operations, answer 200 with
/// `{"success": false, "error": ...}`.
pub fn router(gateway: Arc<LocalGateway>) -> Router {
    Router::new()
        .route(FILESYSTEM_PATH, post(handle))
        .with_state(gateway)
}

async fn handle(State(gateway): State<Arc<LocalGateway>>, Json(req): Json<FsRequest>) -> Json<Value> {
    tracing::debug!("filesystem {} {}", req.operation, req.path);

    let answer = match Operation::parse(&req.operation) {
        Some(Operation::FileExists) => {
            let exists = gateway.file_exists(&req.path).await;
            serde_json::json!(ExistsResponse { exists })
        }
        Some(Operation::EnsureDir) => result_json(gateway.ensure_directory_exists(&req.path).await),
        Some(Operation::CreateFile) => match req.content.as_deref() {
            Some(content) => result_json(gateway.create_file(&req.path, content).await),
            None => result_json(FsResult::failure("content is required for createFile")),
        },
        Some(Operation::CheckWritePermission) => {
            result_json(gateway.check_write_permission(&req.path).await)
        }
        None => result_json(FsResult::failure(format!(
            "unsupported operation: {}",
            req.operation
        ))),
    };

    Json(answer)
}

fn result_json(result: FsResult) -> Value {
    serde_json::json!(result)
}

/// The filesystem endpoint as a daemon module.
pub struct FsModule {
    gateway: Arc<LocalGateway>,
}

impl FsModule {
    pub fn new(gateway: Arc<LocalGateway>) -> Self {
        Self { gateway }
    }
}

impl Module for FsModule {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn routes(&self) -> Router {
        router(self.gateway.clone())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn make_router() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Arc::new(LocalGateway::open(dir.path()).unwrap());
        (router(gateway), dir)
    }

    async fn api(router: &Router, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(FILESYSTEM_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn operations_roundtrip() {
        let (router, dir) = make_router();

        let (status, body) = api(&router, r#"{"operation":"ensureDir","path":"app/x"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"success": true}));
        assert!(dir.path().join("app/x").is_dir());

        let (_, body) = api(
            &router,
            r#"{"operation":"createFile","path":"app/x/page.tsx","content":"hello"}"#,
        )
        .await;
        assert_eq!(body["success"], true);

        let (_, body) = api(&router, r#"{"operation":"fileExists","path":"app/x/page.tsx"}"#).await;
        assert_eq!(body, serde_json::json!({"exists": true}));

        let (_, body) =
            api(&router, r#"{"operation":"checkWritePermission","path":"app/x"}"#).await;
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn failures_are_200_with_error() {
        let (router, _dir) = make_router();

        let (status, body) = api(&router, r#"{"operation":"deleteFile","path":"x"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "unsupported operation: deleteFile");

        let (_, body) = api(&router, r#"{"operation":"createFile","path":"x.txt"}"#).await;
        assert_eq!(body["error"], "content is required for createFile");

        let (_, body) = api(&router, r#"{"operation":"ensureDir","path":"../x"}"#).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn malformed_body_rejected() {
        let (router, _dir) = make_router();
        let (status, _) = api(&router, r#"{"path":"x"}"#).await;
        assert!(status.is_client_error());
    }

    #[test]
    fn module_name() {
        let dir = tempfile::tempdir().unwrap();
        let module = FsModule::new(Arc::new(LocalGateway::open(dir.path()).unwrap()));
        assert_eq!(module.name(), "filesystem");
    }
}
