use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::gateway::FsGateway;
use crate::protocol::{ExistsResponse, FsRequest, FsResult, Operation};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// FsGateway that forwards every operation to a remote filesystem
/// endpoint (`POST {endpoint}` with an [`FsRequest`] body).
///
/// Transport errors, non-2xx answers and undecodable bodies all come back
/// as `FsResult { success: false, error }`.
pub struct HttpGateway {
    http: reqwest::Client,
    endpoint: String,
}

/// Error body of a failed answer, either shape.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &FsRequest) -> Result<reqwest::Response, String> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("network: {}", e))?;

        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error.or(body.message))
            .unwrap_or(text);
        Err(format!("HTTP {}: {}", status, detail))
    }

    async fn call(&self, request: FsRequest) -> FsResult {
        let outcome = match self.send(&request).await {
            Ok(resp) => resp
                .json::<FsResult>()
                .await
                .map_err(|e| format!("decode: {}", e)),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => result,
            Err(message) => {
                tracing::warn!("{} {} failed: {}", request.operation, request.path, message);
                FsResult::failure(message)
            }
        }
    }
}

#[async_trait]
impl FsGateway for HttpGateway {
    async fn ensure_directory_exists(&self, path: &str) -> FsResult {
        self.call(FsRequest::new(Operation::EnsureDir, path)).await
    }

    async fn file_exists(&self, path: &str) -> bool {
        let request = FsRequest::new(Operation::FileExists, path);
        let resp = match self.send(&request).await {
            Ok(resp) => resp,
            Err(message) => {
                tracing::warn!("fileExists {} failed: {}", path, message);
                return false;
            }
        };
        match resp.json::<ExistsResponse>().await {
            Ok(body) => body.exists,
            Err(e) => {
                tracing::warn!("fileExists {}: undecodable answer: {}", path, e);
                false
            }
        }
    }

    async fn create_file(&self, path: &str, content: &str) -> FsResult {
        self.call(FsRequest::new(Operation::CreateFile, path).with_content(content))
            .await
    }

    async fn check_write_permission(&self, path: &str) -> FsResult {
        self.call(FsRequest::new(Operation::CheckWritePermission, path))
            .await
    }
}
