//! Structured logging setup
//!
//! Thin wrapper over `tracing-subscriber`: an env-filtered compact
//! formatter, with the level derived from CLI verbosity flags unless
//! `RUST_LOG` overrides it.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_target: false,
        }
    }
}

impl LogConfig {
    /// Derive the log level from `-v` counts and `--quiet`
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        };
        Self {
            level: level.to_string(),
            show_target: verbose > 1,
        }
    }
}

/// Initialize the global tracing subscriber
pub fn init() -> anyhow::Result<()> {
    init_with_config(LogConfig::default())
}

/// Initialize with custom configuration
pub fn init_with_config(config: LogConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(config.show_target).compact());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(())
}
