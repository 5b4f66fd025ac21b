//! Core notification provider trait and types.

use super::embed::WebhookPayload;
use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a notification send attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether send was successful
    pub success: bool,
    /// HTTP status code, absent when the request never got a response
    pub status_code: Option<u16>,
    /// Response body or transport error message
    pub response: Option<String>,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

/// Trait for webhook-style notification sinks
///
/// Delivery failures that happen on the wire are reported as an unsuccessful
/// [`NotificationResult`] rather than an `Err`, so callers can log the status
/// and body; `Err` is reserved for problems building the request.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends one payload
    async fn send(&self, payload: &WebhookPayload) -> AppResult<NotificationResult>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Checked before every tick. An error means the tick is skipped.
    async fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }
}
