use axum::Json;
use serde_json::{Value, json};
use std::time::{SystemTime, UNIX_EPOCH};

pub async fn handle() -> Json<Value> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    Json(json!({
        "status": "OK",
        "timestamp": timestamp,
        "message": "GCG document service is running",
    }))
}
