use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "guide-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: the completion provider must answer its health check.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state
        .generator
        .health_check()
        .await
        .map(|_| StatusCode::OK)
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))
}
