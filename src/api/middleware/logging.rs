//! Request/response logging.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, Level, debug, span};

/// Logs method, path, status and duration of every request.
///
/// Health probes arrive every few seconds, so the per-request lines are kept
/// at debug level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = span!(Level::INFO, "http_request", method = %method, path = %path);

    async move {
        let start = Instant::now();
        let response = next.run(request).await;

        debug!(
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Response sent"
        );

        response
    }
    .instrument(span)
    .await
}
