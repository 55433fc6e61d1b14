//! Named schema drafts over HTTP, backed by the daemon's KV store.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use stagehand_core::{Module, ServiceError};
use stagehand_kv::KVStore;
use stagehand_schema::{DraftStore, Schema, SchemaError};

type Kv = Arc<dyn KVStore>;

fn service_error(err: SchemaError) -> ServiceError {
    match err {
        SchemaError::EmptyDraftName => ServiceError::Validation(err.to_string()),
        SchemaError::Storage(_) | SchemaError::Serialization(_) => {
            ServiceError::Storage(err.to_string())
        }
        _ => ServiceError::Internal(err.to_string()),
    }
}

async fn list(State(kv): State<Kv>) -> Result<Json<Value>, ServiceError> {
    let names = DraftStore::new(kv.as_ref()).list().map_err(service_error)?;
    Ok(Json(serde_json::json!({ "drafts": names })))
}

async fn load(State(kv): State<Kv>, Path(name): Path<String>) -> Result<Json<Schema>, ServiceError> {
    match DraftStore::new(kv.as_ref()).load(&name).map_err(service_error)? {
        Some(schema) => Ok(Json(schema)),
        None => Err(ServiceError::NotFound(format!("draft '{}' not found", name))),
    }
}

async fn save(
    State(kv): State<Kv>,
    Path(name): Path<String>,
    Json(schema): Json<Schema>,
) -> Result<Json<Value>, ServiceError> {
    DraftStore::new(kv.as_ref()).save(&name, &schema).map_err(service_error)?;
    tracing::info!("draft saved: {}", name);
    Ok(Json(serde_json::json!({ "saved": name })))
}

async fn remove(State(kv): State<Kv>, Path(name): Path<String>) -> Result<Json<Value>, ServiceError> {
    DraftStore::new(kv.as_ref()).remove(&name).map_err(service_error)?;
    tracing::info!("draft removed: {}", name);
    Ok(Json(serde_json::json!({ "deleted": name })))
}

pub struct DraftModule {
    kv: Kv,
}

impl DraftModule {
    pub fn new(kv: Kv) -> Self {
        Self { kv }
    }
}

impl Module for DraftModule {
    fn name(&self) -> &str {
        "drafts"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/api/drafts", get(list))
            .route("/api/drafts/{name}", get(load).put(save).delete(remove))
            .with_state(self.kv.clone())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use stagehand_kv::{KVError, MemoryStore};
    use tower::ServiceExt;

    use super::*;

    async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let resp = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn make_router() -> Router {
        DraftModule::new(Arc::new(MemoryStore::new())).routes()
    }

    #[tokio::test]
    async fn draft_lifecycle() {
        let router = make_router();
        let schema = serde_json::json!({
            "pageTitle": "Clientes",
            "tableName": "clientes",
            "fields": [{"name": "nome", "type": "text", "required": true}]
        });

        let (status, body) = call(&router, "PUT", "/api/drafts/clientes", Some(schema)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"saved": "clientes"}));

        let (_, body) = call(&router, "GET", "/api/drafts", None).await;
        assert_eq!(body, serde_json::json!({"drafts": ["clientes"]}));

        let (status, body) = call(&router, "GET", "/api/drafts/clientes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tableName"], "clientes");
        assert_eq!(body["fields"][0]["name"], "nome");

        let (_, body) = call(&router, "DELETE", "/api/drafts/clientes", None).await;
        assert_eq!(body, serde_json::json!({"deleted": "clientes"}));

        let (status, body) = call(&router, "GET", "/api/drafts/clientes", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    struct BrokenStore;

    impl KVStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, KVError> {
            Err(KVError::Storage("disk gone".into()))
        }
        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), KVError> {
            Err(KVError::Storage("disk gone".into()))
        }
        fn delete(&self, _key: &str) -> Result<(), KVError> {
            Err(KVError::Storage("disk gone".into()))
        }
        fn scan(&self, _prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
            Err(KVError::Storage("disk gone".into()))
        }
    }

    #[tokio::test]
    async fn storage_failure_is_500() {
        let router = DraftModule::new(Arc::new(BrokenStore)).routes();
        let (status, body) = call(&router, "GET", "/api/drafts", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "STORAGE_ERROR");
    }

    #[tokio::test]
    async fn blank_name_is_validation_error() {
        let router = make_router();
        let (status, body) = call(&router, "PUT", "/api/drafts/%20", Some(serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }
}
