//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Watches a Nexus Mods record and announces updates on Discord
#[derive(Parser, Debug)]
#[command(name = "nexus-relay")]
#[command(about = "Watches a Nexus Mods record and announces updates on Discord")]
#[command(long_about = "
nexus-relay polls one Nexus Mods record on a fixed interval and posts a
Discord embed whenever its \"updated\" timestamp advances. A small HTTP
server answers platform health checks while it runs.

Secrets come from NEXUS_API_KEY and DISCORD_WEBHOOK_URL. Without both the
server still starts, but polling is skipped.

EXAMPLES:
    # Start with default configuration
    nexus-relay serve

    # Listen on a different port
    nexus-relay serve --port 8080

    # Check configuration without starting
    nexus-relay serve --dry-run

    # Run a single poll against the real endpoints
    nexus-relay poll-once

    # Use a specific configuration file
    nexus-relay --config /etc/nexus-relay/relay.toml serve
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Loads this single TOML file instead of the layered `config/` directory.
    /// Environment variables still apply on top.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection (`RELAY_APP_ENV`)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start polling and the health server (default)
    ///
    /// Examples:
    ///   nexus-relay serve                  # Start with defaults
    ///   nexus-relay serve --port 8080      # Override PORT
    ///   nexus-relay serve --dry-run        # Validate config without starting
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override, takes precedence over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Run a single poll and exit
    ///
    /// Uses the configured endpoints and secrets, prints the outcome and the
    /// timestamp observed. Nothing is remembered between runs, so a reachable
    /// record with a timestamp always produces a notification.
    PollOnce,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["nexus-relay", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["nexus-relay"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "nexus-relay",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--log-level",
            "warning",
        ])
        .unwrap();
        let Some(Commands::Serve {
            host,
            port,
            log_level,
            dry_run,
        }) = cli.command
        else {
            panic!("Expected Serve command");
        };
        assert_eq!(host.as_deref(), Some("127.0.0.1"));
        assert_eq!(port, Some(8080));
        assert!(matches!(log_level, Some(LogLevel::Warn)));
        assert!(!dry_run);
    }

    #[test]
    fn test_poll_once_command() {
        let cli = Cli::try_parse_from(["nexus-relay", "poll-once"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::PollOnce)));
    }

    #[test]
    fn test_env_alias() {
        let cli = Cli::try_parse_from(["nexus-relay", "--env", "prod"]).unwrap();
        let env: crate::config::Environment = cli.env.unwrap().into();
        assert_eq!(env, crate::config::Environment::Production);
    }

    #[test]
    fn test_zero_port_rejected() {
        assert!(Cli::try_parse_from(["nexus-relay", "serve", "--port", "0"]).is_err());
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["nexus-relay", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
