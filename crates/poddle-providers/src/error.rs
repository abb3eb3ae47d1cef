//! Error types for provider operations.
//!
//! Every failure talking to the Epos Now API ends up as a [`ProviderError`].
//! Nothing in this crate panics or lets a transport error escape untyped.

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
///
/// This enum provides a fine-grained classification for logs and for the
/// front door's status mapping. See [`FailureKind`] for the coarse grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Authentication failed or credentials are invalid/expired (401).
    AuthenticationFailed,
    /// Authorization failed - caller lacks permission (403).
    AuthorizationFailed,
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// Rate limit exceeded (429).
    RateLimited,
    /// Server returned an error (5xx status codes).
    ServerError,
    /// Invalid response from the server - parse error, unexpected format.
    InvalidResponse,
    /// Resource not found (404).
    NotFound,
    /// Request was rejected (400 and other 4xx) - bad code, bad refresh token.
    BadRequest,
    /// Configuration error - missing or invalid config.
    ConfigurationError,
    /// Internal error - unexpected state, bug.
    InternalError,
}

impl ProviderErrorCode {
    /// Returns true if this error is transient and the caller may resubmit.
    ///
    /// Nothing in this crate retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::RateLimited | Self::ServerError
        )
    }

    /// Returns a human-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::AuthorizationFailed => "authorization_failed",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::ConfigurationError => "configuration_error",
            Self::InternalError => "internal_error",
        }
    }

    /// Classifies a non-success HTTP status from the provider.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::AuthenticationFailed,
            403 => Self::AuthorizationFailed,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            400..=499 => Self::BadRequest,
            _ => Self::InvalidResponse,
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse failure grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A required credential or URL is missing or malformed. Fatal at startup.
    Configuration,
    /// The provider answered with a non-2xx status.
    UpstreamRejection,
    /// Network error, timeout or undecodable body.
    Transport,
}

/// An error that occurred while interacting with the provider.
#[derive(Debug, Error)]
pub struct ProviderError {
    /// The error code categorizing this error.
    code: ProviderErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The HTTP status returned by the provider, for upstream rejections.
    status: Option<u16>,
    /// The provider endpoint or resource path involved.
    endpoint: Option<String>,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            endpoint: None,
            source: None,
        }
    }

    /// Creates an upstream rejection for a non-success status.
    ///
    /// The response body is not included; callers log it separately if needed.
    pub fn from_status(status: u16, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let mut err = Self::new(
            ProviderErrorCode::from_status(status),
            format!("provider returned {} for {}", status, endpoint),
        );
        err.status = Some(status);
        err.endpoint = Some(endpoint);
        err
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    /// Sets the endpoint this error relates to.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the upstream HTTP status, if the provider answered.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the endpoint, if set.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Returns the coarse failure kind.
    pub fn kind(&self) -> FailureKind {
        if self.code == ProviderErrorCode::ConfigurationError {
            FailureKind::Configuration
        } else if self.status.is_some() {
            FailureKind::UpstreamRejection
        } else {
            FailureKind::Transport
        }
    }

    /// Returns true if the provider reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.code == ProviderErrorCode::NotFound
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[eposnow] {}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
