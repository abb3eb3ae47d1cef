//! Tracing setup for poddle
//!
//! The binary picks a [`TracingConfig`] from its `--debug` and `--json-logs`
//! flags and installs it once. `RUST_LOG` always wins over the configured
//! default level.
//!
//! ```ignore
//! use poddle_core::tracing::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::from_flags(false, true))?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// A global subscriber was already installed
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Single-line human-readable output
    Compact,
    /// One JSON object per line, for log collectors
    Json,
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level for poddle's own crates when RUST_LOG is not set
    pub default_level: Level,
    /// Output format for log lines
    pub output_format: TracingOutputFormat,
    /// Whether to include file/line information
    pub include_location: bool,
    /// Whether to include timestamps
    pub include_timestamp: bool,
}

impl TracingConfig {
    /// Interactive terminal output.
    #[must_use]
    pub fn cli() -> Self {
        Self {
            default_level: Level::INFO,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_timestamp: true,
        }
    }

    /// JSON output for a long-running HTTP server.
    #[must_use]
    pub fn server() -> Self {
        Self {
            default_level: Level::INFO,
            output_format: TracingOutputFormat::Json,
            include_location: true,
            include_timestamp: true,
        }
    }

    /// Builds the config for the `--debug` / `--json-logs` flag pair.
    ///
    /// Debug lowers the level and adds source locations; in compact mode it
    /// also drops timestamps.
    #[must_use]
    pub fn from_flags(debug: bool, json_logs: bool) -> Self {
        let mut config = if json_logs { Self::server() } else { Self::cli() };
        if debug {
            config.default_level = Level::DEBUG;
            config.include_location = true;
            config.include_timestamp = json_logs;
        }
        config
    }
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.default_level)));

    let layer = match config.output_format {
        TracingOutputFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_file(config.include_location)
                .with_line_number(config.include_location);
            if config.include_timestamp {
                layer.boxed()
            } else {
                layer.without_time().boxed()
            }
        }
        TracingOutputFormat::Json => fmt::layer()
            .json()
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(env_filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Default filter: our own crates at `level`, HTTP request spans at `info`.
fn default_directive(level: Level) -> String {
    format!("poddle={},tower_http=info", level)
}
