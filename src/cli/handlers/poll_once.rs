//! Poll-once command handler

use std::sync::Arc;

use anyhow::anyhow;

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::services::{TickOutcome, UpdateMonitor};

/// Runs exactly one tick and reports it
pub struct PollOnceCommandHandler {
    monitor: Arc<UpdateMonitor>,
}

impl PollOnceCommandHandler {
    pub fn new(config: &Settings) -> Self {
        Self::with_monitor(Arc::new(UpdateMonitor::from_settings(config)))
    }

    pub fn with_monitor(monitor: Arc<UpdateMonitor>) -> Self {
        Self { monitor }
    }

    /// Succeeds for `Notified` and `NoUpdate`; every other outcome is an error
    pub async fn execute(&self) -> AppResult<TickOutcome> {
        let outcome = self.monitor.tick().await;
        println!("Poll outcome: {}", outcome);

        match outcome {
            TickOutcome::Notified { .. } | TickOutcome::NoUpdate => Ok(outcome),
            TickOutcome::SkippedUnconfigured => Err(AppError::NotConfigured {
                key: "NEXUS_API_KEY and DISCORD_WEBHOOK_URL".to_string(),
            }),
            other => Err(AppError::Internal {
                source: anyhow!("poll did not complete: {}", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_is_an_error() {
        let handler = PollOnceCommandHandler::new(&Settings::default());
        let err = handler.execute().await.unwrap_err();
        assert!(matches!(err, AppError::NotConfigured { .. }));
    }
}
