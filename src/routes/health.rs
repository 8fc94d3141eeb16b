use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::routes::AppState;

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// GET /ready - Readiness probe
/// Returns 503 while the portfolio content could not be loaded
pub async fn ready(State(app): State<AppState>) -> impl IntoResponse {
    if app.content.is_ready() {
        return (StatusCode::OK, Json(json!({"status": "ready"})));
    }

    tracing::error!("Readiness check failed: portfolio content unavailable");

    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "status": "not_ready",
            "reason": "content_unavailable"
        })),
    )
}
