//! Shared HTTP plumbing for the Epos Now clients.

use tracing::error;

use crate::error::{ProviderError, ProviderResult};

use super::config::ProviderConfig;

/// Builds the HTTP client shared by the token exchanger and the fetcher.
///
/// The configured timeout bounds every request, so a hung provider resolves
/// as a network error instead of leaving the call pending.
pub fn build_http_client(config: &ProviderConfig) -> ProviderResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| ProviderError::internal("failed to create HTTP client").with_source(e))
}

/// Converts a transport failure into a network error tagged with `endpoint`.
pub(crate) fn transport_error(err: reqwest::Error, endpoint: &str) -> ProviderError {
    let message = if err.is_timeout() {
        "request timeout".to_string()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        format!("request failed: {}", err)
    };
    error!(endpoint, error = %err, "error calling provider");
    ProviderError::network(message)
        .with_endpoint(endpoint)
        .with_source(err)
}

/// Reads the body of a successful response.
pub(crate) async fn read_body(response: reqwest::Response, endpoint: &str) -> ProviderResult<String> {
    response
        .text()
        .await
        .map_err(|e| transport_error(e, endpoint))
}
