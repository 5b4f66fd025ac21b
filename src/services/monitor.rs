//! Update detection for the watched mod.
//!
//! [`UpdateMonitor`] owns the last-seen timestamp and runs one poll per
//! [`tick`](UpdateMonitor::tick). Every failure is logged and folded into a
//! [`TickOutcome`]; nothing propagates to the scheduler.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use jiff::Timestamp;
use tokio::sync::Mutex;

use crate::config::Settings;
use crate::error::AppResult;
use crate::external::nexus::{ModSource, NexusClient};
use crate::services::notifications::{
    DiscordWebhookProvider, NotificationProvider, build_update_payload,
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// API key or webhook URL missing or invalid; nothing was sent
    SkippedUnconfigured,
    /// Another tick was still running
    SkippedInFlight,
    /// Fetched fine, timestamp did not advance
    NoUpdate,
    /// Timestamp advanced and the webhook accepted the notification
    Notified { updated: i64 },
    /// Timestamp advanced (and was stored) but delivery failed
    NotifyFailed { updated: i64 },
    /// Upstream request failed; state untouched
    FetchFailed,
}

impl std::fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickOutcome::SkippedUnconfigured => write!(f, "skipped (not configured)"),
            TickOutcome::SkippedInFlight => write!(f, "skipped (previous poll still running)"),
            TickOutcome::NoUpdate => write!(f, "no update"),
            TickOutcome::Notified { updated } => write!(f, "notified (updated {})", updated),
            TickOutcome::NotifyFailed { updated } => {
                write!(f, "notification failed (updated {})", updated)
            }
            TickOutcome::FetchFailed => write!(f, "fetch failed"),
        }
    }
}

/// Clears the in-flight flag when the tick ends, including on panic.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct UpdateMonitor {
    source: Arc<dyn ModSource>,
    notifier: Arc<dyn NotificationProvider>,
    announcement: String,
    last_updated: Mutex<Option<i64>>,
    in_flight: AtomicBool,
}

impl UpdateMonitor {
    pub fn new(
        source: Arc<dyn ModSource>,
        notifier: Arc<dyn NotificationProvider>,
        announcement: impl Into<String>,
    ) -> Self {
        Self {
            source,
            notifier,
            announcement: announcement.into(),
            last_updated: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Wire the Nexus client and Discord provider from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(NexusClient::new(settings.nexus.clone())),
            Arc::new(DiscordWebhookProvider::new(settings.webhook.clone())),
            settings.webhook.content.clone(),
        )
    }

    /// Last timestamp acted upon; `None` until the first successful poll
    pub async fn last_updated(&self) -> Option<i64> {
        *self.last_updated.lock().await
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one poll: fetch, compare, and notify on a strictly newer timestamp.
    pub async fn tick(&self) -> TickOutcome {
        if let Err(e) = self.check_configured().await {
            tracing::error!(error = %e, "Polling skipped: relay is not configured");
            return TickOutcome::SkippedUnconfigured;
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::warn!("Previous poll still in flight, skipping this tick");
            return TickOutcome::SkippedInFlight;
        };

        let since = self.last_updated().await;
        tracing::debug!(source = self.source.name(), since = ?since, "Polling upstream");

        let info = match self.source.fetch(since).await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    status = ?e.status(),
                    body = ?e.body(),
                    "Error polling upstream API"
                );
                return TickOutcome::FetchFailed;
            }
        };

        let advanced = info
            .updated_timestamp
            .filter(|ts| since.is_none_or(|last| *ts > last));
        let Some(updated) = advanced else {
            tracing::info!(
                mod_id = info.mod_id,
                updated_timestamp = ?info.updated_timestamp,
                "No new updates for mod"
            );
            return TickOutcome::NoUpdate;
        };

        *self.last_updated.lock().await = Some(updated);
        tracing::info!(
            mod_id = info.mod_id,
            name = info.name.as_deref().unwrap_or_default(),
            version = info.version.as_deref().unwrap_or_default(),
            previous = ?since,
            updated,
            "Mod updated"
        );

        let payload = build_update_payload(&info, &self.announcement, Timestamp::now());
        match self.notifier.send(&payload).await {
            Ok(result) if result.success => {
                tracing::info!(
                    provider = self.notifier.name(),
                    status = ?result.status_code,
                    duration_ms = result.duration_ms,
                    "Webhook notification sent"
                );
                TickOutcome::Notified { updated }
            }
            Ok(result) => {
                tracing::error!(
                    provider = self.notifier.name(),
                    status = ?result.status_code,
                    response = ?result.response,
                    duration_ms = result.duration_ms,
                    "Error sending webhook notification"
                );
                TickOutcome::NotifyFailed { updated }
            }
            Err(e) => {
                tracing::error!(
                    provider = self.notifier.name(),
                    error = %e,
                    "Error sending webhook notification"
                );
                TickOutcome::NotifyFailed { updated }
            }
        }
    }

    async fn check_configured(&self) -> AppResult<()> {
        self.source.validate_config().await?;
        self.notifier.validate_config().await?;
        Ok(())
    }
}
