//! Field generation from a free-text description, delegated to an external
//! inference service.
//!
//! The service is optional. [`crate::SchemaBuilder::generate_with_assistant`]
//! absorbs every failure from here and falls back to the boilerplate fields.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::Field;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    #[error("assistant returned no fields")]
    Empty,
}

// ── FieldAssistant ──────────────────────────────────────────────────

/// Produces a field list for a table from a description of what it holds.
#[async_trait::async_trait]
pub trait FieldAssistant: Send + Sync {
    async fn suggest_fields(&self, table_name: &str, context: &str) -> Result<Vec<Field>, AssistError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssistRequest<'a> {
    table_name: &'a str,
    context: &'a str,
}

#[derive(Deserialize)]
struct AssistResponse {
    #[serde(default)]
    fields: Vec<Field>,
}

/// Calls `POST {endpoint}` with `{"tableName", "context"}` and expects
/// `{"fields": [...]}` back.
pub struct HttpFieldAssistant {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpFieldAssistant {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(30))
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
}

#[async_trait::async_trait]
impl FieldAssistant for HttpFieldAssistant {
    async fn suggest_fields(&self, table_name: &str, context: &str) -> Result<Vec<Field>, AssistError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&AssistRequest { table_name, context })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AssistError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body: AssistResponse = resp
            .json()
            .await
            .map_err(|e| AssistError::Decode(format!("response body: {}", e)))?;

        if body.fields.is_empty() {
            return Err(AssistError::Empty);
        }
        Ok(body.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        // Port 9 (discard) is not listening on loopback.
        let assistant = HttpFieldAssistant::with_timeout("http://127.0.0.1:9/assist", Duration::from_secs(2));
        let err = assistant.suggest_fields("produtos", "loja").await.unwrap_err();
        assert!(matches!(err, AssistError::Network(_)), "got {err:?}");
    }

    #[test]
    fn request_wire_shape() {
        let body = serde_json::to_value(AssistRequest {
            table_name: "produtos",
            context: "catálogo",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"tableName": "produtos", "context": "catálogo"}));
    }
}
