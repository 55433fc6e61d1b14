//! Schema tools over HTTP: DDL rendering and table suggestions.

use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use stagehand_core::{Module, ServiceError};
use stagehand_schema::{Schema, Suggestion};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestRequest {
    #[serde(default)]
    table_name: String,
}

async fn render_sql(Json(schema): Json<Schema>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "sql": schema.sql() }))
}

async fn suggest(Json(req): Json<SuggestRequest>) -> Result<Json<Suggestion>, ServiceError> {
    let table_name = req.table_name.trim();
    if table_name.is_empty() {
        return Err(ServiceError::Validation("table name is required".into()));
    }
    tracing::debug!("suggest for {}", table_name);
    Ok(Json(stagehand_schema::suggest(table_name)))
}

pub struct SchemaModule;

impl Module for SchemaModule {
    fn name(&self) -> &str {
        "schema"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/api/schema/sql", post(render_sql))
            .route("/api/schema/suggest", post(suggest))
    }
}
