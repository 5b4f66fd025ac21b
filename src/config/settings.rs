//! Configuration settings structures for nexus-relay
//!
//! Every field carries a serde default so an empty configuration deserializes
//! into a runnable (if polling-disabled) service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "nexus-relay".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}

fn default_api_base() -> String {
    "https://api.nexusmods.com/v1".to_string()
}

fn default_game() -> String {
    "starwarsbattlefront22017".to_string()
}

fn default_mod_id() -> u64 {
    11814
}

fn default_webhook_timeout() -> u64 {
    30
}

fn default_announcement() -> String {
    "📡 Incoming transmission from 🔧 SYSTEM UPDATE...   🛠️ STATUS: Deployed and operational.  \
     📍 Location: Central Repository of NEXUS <<Holocron Archives>>  \
     📄 End of transmission. May the source be with you."
        .to_string()
}

fn default_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Liveness HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port; the `PORT` environment variable overrides it
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ============================================================================
// Nexus Mods Configuration
// ============================================================================

/// Upstream mod record to watch
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NexusConfig {
    /// Base URL of the Nexus Mods v1 API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Game domain name as used in Nexus URLs
    #[serde(default = "default_game")]
    pub game: String,

    #[serde(default = "default_mod_id")]
    pub mod_id: u64,

    /// Personal API key sent in the `apikey` header. Empty disables polling.
    #[serde(default)]
    pub api_key: String,
}

impl NexusConfig {
    /// Full URL of the mod record endpoint
    pub fn mod_url(&self) -> String {
        format!(
            "{}/games/{}/mods/{}.json",
            self.api_base.trim_end_matches('/'),
            self.game,
            self.mod_id
        )
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            game: default_game(),
            mod_id: default_mod_id(),
            api_key: String::new(),
        }
    }
}

impl fmt::Debug for NexusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NexusConfig")
            .field("api_base", &self.api_base)
            .field("game", &self.game)
            .field("mod_id", &self.mod_id)
            .field("api_key", &redacted(&self.api_key))
            .finish()
    }
}

// ============================================================================
// Webhook Configuration
// ============================================================================

/// Discord webhook delivery configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Webhook URL. Empty disables polling.
    #[serde(default)]
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_webhook_timeout")]
    pub timeout_seconds: u64,

    /// Plain `content` text sent above the embed
    #[serde(default = "default_announcement")]
    pub content: String,
}

impl WebhookConfig {
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_seconds: default_webhook_timeout(),
            content: default_announcement(),
        }
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The webhook URL embeds its own token.
        f.debug_struct("WebhookConfig")
            .field("url", &redacted(&self.url))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("content", &self.content)
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

// ============================================================================
// Poller Configuration
// ============================================================================

/// Poll schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Seconds between ticks
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,

    /// Run one tick immediately on startup instead of waiting a full interval
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
            run_on_startup: true,
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Colour is only applied when stdout is a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level or full `EnvFilter` directive, e.g. `info,nexus_relay=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Line format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    #[serde(default)]
    pub console: ConsoleSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: ConsoleSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert settings into the logger's own configuration type
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.format", e.to_string()))?;

        let config = LoggerConfig {
            level: self.level,
            format,
            console: ConsoleConfig {
                enabled: self.console.enabled,
                colored: self.console.colored,
            },
        };
        config
            .validate()
            .map_err(|e| ConfigError::validation("logger", e.to_string()))?;
        Ok(config)
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub nexus: NexusConfig,

    #[serde(default)]
    pub webhook: WebhookConfig,

    #[serde(default)]
    pub poller: PollerConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Both secrets are present, so ticks will reach the network
    pub fn polling_enabled(&self) -> bool {
        self.nexus.has_api_key() && self.webhook.has_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let settings: Settings = toml_from_str("");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server.port, 10000);
        assert_eq!(settings.poller.interval_seconds, 60);
        assert!(!settings.polling_enabled());
    }

    #[test]
    fn test_mod_url_trims_trailing_slash() {
        let nexus = NexusConfig {
            api_base: "http://127.0.0.1:9000/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            nexus.mod_url(),
            "http://127.0.0.1:9000/v1/games/starwarsbattlefront22017/mods/11814.json"
        );
    }

    #[test]
    fn test_default_mod_url() {
        assert_eq!(
            NexusConfig::default().mod_url(),
            "https://api.nexusmods.com/v1/games/starwarsbattlefront22017/mods/11814.json"
        );
    }

    #[test]
    fn test_polling_requires_both_secrets() {
        let mut settings = Settings::default();
        settings.nexus.api_key = "key".to_string();
        assert!(!settings.polling_enabled());

        settings.webhook.url = "https://discord.com/api/webhooks/1/abc".to_string();
        assert!(settings.polling_enabled());

        settings.nexus.api_key = "   ".to_string();
        assert!(!settings.polling_enabled());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut settings = Settings::default();
        settings.nexus.api_key = "super-secret-key".to_string();
        settings.webhook.url = "https://discord.com/api/webhooks/1/token".to_string();

        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("super-secret-key"));
        assert!(!rendered.contains("token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_into_logger_config_parses_format() {
        let settings = LoggerSettings {
            format: "json".to_string(),
            ..Default::default()
        };
        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_into_logger_config_rejects_bad_format() {
        let settings = LoggerSettings {
            format: "xml".to_string(),
            ..Default::default()
        };
        let err = settings.into_logger_config().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { field, .. } if field == "logger.format"));
    }

    fn toml_from_str(source: &str) -> Settings {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
