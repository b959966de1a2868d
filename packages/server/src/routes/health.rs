use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint. Static: the process being up is the signal.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
