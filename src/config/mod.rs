//! Configuration management module for nexus-relay
//!
//! Layered loading, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `default.toml`, `{environment}.toml`, `local.toml` from the config directory
//! 3. `RELAY_*` environment variables (`__` separates nested keys)
//! 4. The deployment variables `NEXUS_API_KEY`, `DISCORD_WEBHOOK_URL` and `PORT`
//!
//! CLI flags are merged on top by [`crate::cli::ConfigurationMerger`].

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, LoggerSettings, NexusConfig, PollerConfig, ServerConfig, Settings,
    WebhookConfig,
};
