//! Discord webhook provider.
//!
//! Executes a webhook with a JSON [`WebhookPayload`]. Discord answers `204 No
//! Content` on success, or `200` with the created message when `?wait=true`.

use super::embed::WebhookPayload;
use super::provider::{NotificationProvider, NotificationResult};
use crate::config::WebhookConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use reqwest::Url;
use std::time::{Duration, Instant};

pub struct DiscordWebhookProvider {
    config: WebhookConfig,
    http: reqwest::Client,
}

impl DiscordWebhookProvider {
    pub fn new(config: WebhookConfig) -> Self {
        Self::with_client(config, HTTP_CLIENT.clone())
    }

    pub fn with_client(config: WebhookConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    fn parse_url(&self) -> AppResult<Url> {
        Url::parse(self.config.url.trim()).map_err(|e| AppError::Validation {
            field: "webhook.url".to_string(),
            reason: format!("Invalid URL format: {}", e),
        })
    }
}

#[async_trait]
impl NotificationProvider for DiscordWebhookProvider {
    async fn send(&self, payload: &WebhookPayload) -> AppResult<NotificationResult> {
        let url = self.parse_url()?;
        let start = Instant::now();

        let response = self
            .http
            .post(url)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .json(payload)
            .send()
            .await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(resp) => {
                let status = resp.status();
                let response_text = resp.text().await.ok().filter(|t| !t.is_empty());

                Ok(NotificationResult {
                    success: status.is_success(),
                    status_code: Some(status.as_u16()),
                    response: response_text,
                    duration_ms,
                })
            }
            Err(e) => Ok(NotificationResult {
                success: false,
                status_code: e.status().map(|s| s.as_u16()),
                response: Some(e.to_string()),
                duration_ms,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "discord"
    }

    async fn validate_config(&self) -> AppResult<()> {
        if !self.config.has_url() {
            return Err(AppError::NotConfigured {
                key: "webhook.url (DISCORD_WEBHOOK_URL)".to_string(),
            });
        }

        let url = self.parse_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Validation {
                field: "webhook.url".to_string(),
                reason: format!("Unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(())
    }
}
