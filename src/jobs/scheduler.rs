use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler as TokioCronScheduler};

use crate::config::PollerConfig;
use crate::error::{AppError, AppResult};
use crate::services::UpdateMonitor;

/// Drives [`UpdateMonitor::tick`] on a fixed interval
///
/// Ticks are fire-and-forget: the next one is scheduled whatever the previous
/// outcome, and overlap is rejected inside the monitor itself.
pub struct PollScheduler {
    scheduler: Mutex<TokioCronScheduler>,
    monitor: Arc<UpdateMonitor>,
    interval: Duration,
    run_on_startup: bool,
}

impl PollScheduler {
    pub async fn new(monitor: Arc<UpdateMonitor>, config: &PollerConfig) -> AppResult<Self> {
        let scheduler = TokioCronScheduler::new()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;

        Ok(Self {
            scheduler: Mutex::new(scheduler),
            monitor,
            interval: Duration::from_secs(config.interval_seconds),
            run_on_startup: config.run_on_startup,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Register the repeating job and start the scheduler
    ///
    /// With `run_on_startup`, one tick is spawned immediately so startup is
    /// not blocked on a slow upstream.
    pub async fn start(&self) -> AppResult<()> {
        let monitor = Arc::clone(&self.monitor);
        let job = Job::new_repeated_async(self.interval, move |_uuid, _lock| {
            let monitor = Arc::clone(&monitor);
            Box::pin(async move {
                let outcome = monitor.tick().await;
                tracing::debug!(outcome = %outcome, "Scheduled poll finished");
            })
        })
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?;

        let scheduler = self.scheduler.lock().await;
        scheduler.add(job).await.map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?;
        scheduler.start().await.map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?;

        tracing::info!(
            interval_seconds = self.interval.as_secs(),
            run_on_startup = self.run_on_startup,
            "Poll scheduler started"
        );

        if self.run_on_startup {
            let monitor = Arc::clone(&self.monitor);
            tokio::spawn(async move {
                let outcome = monitor.tick().await;
                tracing::debug!(outcome = %outcome, "Startup poll finished");
            });
        }

        Ok(())
    }

    /// Stop the scheduler gracefully
    pub async fn shutdown(&self) -> AppResult<()> {
        self.scheduler
            .lock()
            .await
            .shutdown()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;
        tracing::info!("Poll scheduler stopped");
        Ok(())
    }
}
