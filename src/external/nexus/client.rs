use super::provider::ModSource;
use super::types::ModInfo;
use crate::config::NexusConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use reqwest::Url;

/// Header carrying the personal API key
pub const API_KEY_HEADER: &str = "apikey";

/// Query parameter asking for records updated since a timestamp
pub const UPDATED_SINCE_PARAM: &str = "updated_since";

/// Longest upstream error body kept for logging
const MAX_ERROR_BODY: usize = 2048;

pub struct NexusClient {
    config: NexusConfig,
    http: reqwest::Client,
}

impl NexusClient {
    pub fn new(config: NexusConfig) -> Self {
        Self::with_client(config, HTTP_CLIENT.clone())
    }

    pub fn with_client(config: NexusConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    fn make_error(
        message: impl Into<String>,
        status: Option<u16>,
        body: Option<String>,
        source: Option<anyhow::Error>,
    ) -> AppError {
        AppError::ExternalApi {
            service: "nexus".into(),
            message: message.into(),
            status,
            body,
            source,
        }
    }

    /// Mod record URL, with `updated_since` appended when known
    fn request_url(&self, since: Option<i64>) -> AppResult<Url> {
        let mut url = Url::parse(&self.config.mod_url()).map_err(|e| AppError::Validation {
            field: "nexus.api_base".to_string(),
            reason: format!("Invalid mod URL: {}", e),
        })?;

        if let Some(since) = since {
            url.query_pairs_mut()
                .append_pair(UPDATED_SINCE_PARAM, &since.to_string());
        }

        Ok(url)
    }
}

#[async_trait]
impl ModSource for NexusClient {
    fn name(&self) -> &'static str {
        "nexus"
    }

    async fn fetch(&self, since: Option<i64>) -> AppResult<ModInfo> {
        let url = self.request_url(since)?;
        let mod_id = self.config.mod_id;

        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e: reqwest::Error| {
                Self::make_error(
                    format!("fetch({}) request failed: {}", mod_id, e),
                    e.status().map(|s| s.as_u16()),
                    None,
                    Some(e.into()),
                )
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .ok()
                .filter(|b| !b.trim().is_empty())
                .map(|b| b.chars().take(MAX_ERROR_BODY).collect());
            return Err(Self::make_error(
                format!("fetch({}) HTTP error: {}", mod_id, status),
                Some(status.as_u16()),
                body,
                None,
            ));
        }

        resp.json::<ModInfo>().await.map_err(|e: reqwest::Error| {
            Self::make_error(
                format!("fetch({}) invalid JSON: {}", mod_id, e),
                Some(status.as_u16()),
                None,
                Some(e.into()),
            )
        })
    }

    async fn validate_config(&self) -> AppResult<()> {
        if !self.config.has_api_key() {
            return Err(AppError::NotConfigured {
                key: "nexus.api_key (NEXUS_API_KEY)".to_string(),
            });
        }

        self.request_url(None)?;
        Ok(())
    }
}
