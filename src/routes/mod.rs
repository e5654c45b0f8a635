pub mod analyze;
pub mod health;
pub mod info;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/analyze", post(analyze::analyze).get(info::analyze_usage))
        .route("/analyze-async", post(analyze::analyze_async))
        .route("/tasks/{task_id}", get(analyze::get_task))
        .route("/example", get(info::example))
        .with_state(state)
}
