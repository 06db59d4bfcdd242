// Health Check
// Liveness endpoint reporting service name and version

use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "falsify",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
