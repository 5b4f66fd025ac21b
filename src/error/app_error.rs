use thiserror::Error;

use crate::config::error::ConfigError;

/// Application-wide error type.
///
/// Runtime failures of a poll tick (upstream fetch, webhook delivery) are
/// carried by `ExternalApi` and `Notification`; the tick handler logs and
/// swallows them so they never terminate the process.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// A required secret or setting is absent
    #[error("Not configured: {key}")]
    NotConfigured { key: String },

    /// Upstream API call failed at the transport, status or decode stage
    #[error("{service} API error: {message}")]
    ExternalApi {
        service: String,
        message: String,
        status: Option<u16>,
        body: Option<String>,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Webhook delivery failed
    #[error("Notification via {provider} failed: {message}")]
    Notification {
        provider: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// HTTP status reported by the remote side, if the failure got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::ExternalApi { status, .. } => *status,
            _ => None,
        }
    }

    /// Response body captured from the remote side, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            AppError::ExternalApi { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
