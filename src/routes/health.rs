use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    service: &'static str,
    version: &'static str,
    stats_source: String,
    timestamp: i64,
}

// GET /health - Liveness check, never calls the stats provider
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        stats_source: state.provider.source().to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    (StatusCode::OK, Json(response))
}
