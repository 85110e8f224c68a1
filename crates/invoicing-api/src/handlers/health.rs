use axum::Json;
use serde_json::{json, Value};

/// Health check handler - GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoicing-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
