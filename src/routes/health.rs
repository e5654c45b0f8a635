use axum::Json;
use chrono::Utc;
use serde_json::{Value, json};

use crate::models::{HealthResponse, SERVICE_NAME};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "status": "active",
        "timestamp": Utc::now(),
        "health": "/health",
        "example": "/example",
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
