//! Configuration validation logic
//!
//! Missing secrets (`nexus.api_key`, `webhook.url`) are not checked here.
//! They disable polling at tick time and never stop the server from starting.

use crate::config::error::ConfigError;
use crate::config::settings::{
    LoggerSettings, NexusConfig, PollerConfig, ServerConfig, Settings, WebhookConfig,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host must not be empty.",
            ));
        }

        Ok(())
    }
}

impl NexusConfig {
    /// Validate upstream location; the API key is checked per tick instead
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                field: "nexus.api_base".to_string(),
                message: format!(
                    "API base must be an http(s) URL, got '{}'",
                    self.api_base
                ),
            });
        }

        if self.game.trim().is_empty() {
            return Err(ConfigError::validation(
                "nexus.game",
                "Game domain name must not be empty.",
            ));
        }

        Ok(())
    }
}

impl WebhookConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "webhook.timeout_seconds",
                "Webhook timeout must be greater than 0 seconds.",
            ));
        }
        Ok(())
    }
}

impl PollerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_seconds == 0 {
            return Err(ConfigError::validation(
                "poller.interval_seconds",
                "Poll interval must be greater than 0 seconds.",
            ));
        }
        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger configuration
    ///
    /// `level` may be a plain level or a full `EnvFilter` directive; only the
    /// plain form is checked against the known level names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings, returning the first error found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.nexus.validate()?;
        self.webhook.validate()?;
        self.poller.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
