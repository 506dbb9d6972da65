//! HTTP handlers.

pub mod auth;
pub mod expense;
pub mod user;

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use serde_json::{Value, json};

/// Service health summary.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Service is healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.environment(),
    }))
}

/// JSON 404 for unmatched paths.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    let message = if uri.path().starts_with("/api/") {
        "API endpoint not found"
    } else {
        "Route not found"
    };
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": "error", "message": message })),
    )
}
