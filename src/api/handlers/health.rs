//! Health check endpoint handlers.
//!
//! Neither route inspects the upstream: the relay is "healthy" as long as it
//! can answer, so a platform probe never restarts it over a Nexus outage.

use crate::state::AppState;
use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};
use serde::{Deserialize, Serialize};

/// Health check response structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Time of the check (RFC 3339)
    pub timestamp: String,
    /// Last upstream timestamp acted upon, if any
    pub last_updated: Option<i64>,
    /// Both secrets are configured
    pub polling_enabled: bool,
}

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - JSON status
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        timestamp: jiff::Timestamp::now().to_string(),
        last_updated: state.monitor.last_updated().await,
        polling_enabled: state.polling_enabled,
    })
}

pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}
