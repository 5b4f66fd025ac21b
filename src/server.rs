//! Server lifecycle: poll scheduler plus the liveness HTTP server.

use std::sync::Arc;

use crate::api::routes::create_router;
use crate::config::settings::Settings;
use crate::jobs::PollScheduler;
use crate::services::UpdateMonitor;
use crate::state::AppState;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start polling and serving, and run until Ctrl+C or SIGTERM.
    ///
    /// Missing secrets do not stop startup: the HTTP server still answers so
    /// the platform keeps the process alive, and every tick logs the problem.
    pub async fn run(self) -> anyhow::Result<()> {
        let shutdown = CancellationToken::new();
        tokio::spawn(cancel_on_signal(shutdown.clone()));
        self.run_until(shutdown).await
    }

    /// Like [`Server::run`] but stops when `shutdown` is cancelled.
    pub async fn run_until(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            "Application starting"
        );
        tracing::info!(
            mod_url = %settings.nexus.mod_url(),
            api_key_configured = settings.nexus.has_api_key(),
            webhook_configured = settings.webhook.has_url(),
            interval_seconds = settings.poller.interval_seconds,
            "Relay configuration loaded"
        );
        tracing::info!(
            level = %settings.logger.level,
            format = %settings.logger.format,
            "Logger configuration loaded"
        );

        if !settings.polling_enabled() {
            tracing::warn!(
                "NEXUS_API_KEY or DISCORD_WEBHOOK_URL is missing; polling will be skipped"
            );
        }

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        let monitor = Arc::new(UpdateMonitor::from_settings(settings));
        let scheduler = PollScheduler::new(Arc::clone(&monitor), &settings.poller).await?;
        scheduler.start().await?;

        let router = create_router(AppState::new(monitor, settings));

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await;

        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!(error = %e, "Poll scheduler did not stop cleanly");
        }
        served?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn cancel_on_signal(token: CancellationToken) {
    shutdown_signal().await;
    token.cancel();
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_bind_failure_is_reported() {
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let mut settings = Settings::default();
        settings.server.host = "127.0.0.1".to_string();
        settings.server.port = occupied.local_addr().unwrap().port();
        settings.poller.run_on_startup = false;

        let err = Server::new(settings)
            .run_until(CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to bind"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancelled_token_stops_server() {
        let mut settings = Settings::default();
        settings.server.host = "127.0.0.1".to_string();
        settings.server.port = free_port();
        settings.poller.run_on_startup = false;

        let token = CancellationToken::new();
        token.cancel();
        Server::new(settings).run_until(token).await.unwrap();
    }

    fn free_port() -> u16 {
        std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port()
    }
}
