use axum::{extract::State, response::Json};
use serde::Serialize;

use super::AppState;

/// Liveness report. Never calls FIS.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    upstream: String,
    timestamp: i64,
}

// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        upstream: state.fis.base_url().to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
