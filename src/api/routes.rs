//! Router configuration.

use axum::{Router, middleware, routing::get};

use crate::api::handlers;
use crate::api::middleware::logging_middleware;
use crate::state::AppState;

/// Creates the application router.
///
/// # Routes
/// - `GET /` - plain-text banner for platform health checks
/// - `GET /health`, `GET /health/live`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::banner))
        .merge(handlers::health::health_routes())
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
