//! Server error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that stop the server from starting or running.
///
/// Per-request provider failures never end up here; the service layer
/// turns them into HTTP responses.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error (bind, accept, config file).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file is not valid TOML for our schema.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration is incomplete or invalid.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Provider could not be initialised.
    #[error("Provider error: {0}")]
    Provider(#[from] poddle_providers::ProviderError),

    /// Logging could not be initialised.
    #[error("Tracing error: {0}")]
    Tracing(#[from] poddle_core::TracingError),
}

impl ServerError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
