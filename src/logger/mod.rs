//! Logger Module
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a single
//! console layer in full, compact or JSON format.

pub mod config;
pub mod error;

pub use config::{ConsoleConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber with the given configuration
///
/// # Errors
///
/// Fails on an invalid configuration or when a global subscriber is already set.
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let filter = config.env_filter()?;
    let use_ansi = config.console.colored && std::io::stdout().is_terminal();
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Full => registry
            .with(fmt::layer().with_ansi(use_ansi).with_target(true))
            .try_init()?,
        LogFormat::Compact => registry
            .with(fmt::layer().with_ansi(use_ansi).with_target(true).compact())
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().with_ansi(false).json())
            .try_init()?,
    }

    Ok(())
}
