use axum::Json;
use serde_json::{Value, json};

use crate::models::POPULAR_FUNDS;

/// `GET /analyze`: usage help, not an analysis.
pub async fn analyze_usage() -> Json<Value> {
    Json(json!({
        "message": "This endpoint requires a POST request with JSON data",
        "method": "POST",
        "url": "/analyze",
        "example_request": {
            "instrumentName": POPULAR_FUNDS[0],
        },
        "curl_example": "curl -X POST \"http://localhost:8000/analyze\" -H \"Content-Type: application/json\" -d '{\"instrumentName\": \"HDFC Top 100 Fund\"}'",
    }))
}

pub async fn example() -> Json<Value> {
    Json(json!({
        "example_request": {
            "instrumentName": POPULAR_FUNDS[0],
        },
        "popular_funds": POPULAR_FUNDS,
        "endpoints": {
            "analyze": "POST /analyze - Synchronous analysis",
            "analyze-async": "POST /analyze-async - Background analysis",
            "tasks": "GET /tasks/{task_id} - Background analysis status and result",
            "health": "GET /health - Service health check",
        },
    }))
}
