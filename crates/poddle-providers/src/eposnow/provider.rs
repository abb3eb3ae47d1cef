//! Epos Now provider wiring.

use std::sync::Arc;

use tracing::info;

use crate::error::{ProviderError, ProviderResult};

use super::client::EposNowClient;
use super::config::ProviderConfig;
use super::fetcher::ResourceFetcher;
use super::http::build_http_client;
use super::oauth::OAuthClient;

/// The token exchanger and the resource client, sharing one validated
/// configuration and one HTTP connection pool.
#[derive(Debug, Clone)]
pub struct EposNowProvider {
    config: Arc<ProviderConfig>,
    oauth: OAuthClient,
    api: EposNowClient,
}

impl EposNowProvider {
    /// Validates `config` and builds both clients.
    ///
    /// A missing credential or malformed URL is reported here, before any
    /// request is made.
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        config.validate().map_err(ProviderError::configuration)?;

        let config = Arc::new(config);
        let http_client = build_http_client(&config)?;

        let oauth = OAuthClient::with_http_client(Arc::clone(&config), http_client.clone());
        let api = EposNowClient::new(ResourceFetcher::with_http_client(
            Arc::clone(&config),
            http_client,
        ));

        info!(
            api = %config.api_base_url,
            auth = %config.auth_base_url,
            "eposnow provider ready"
        );

        Ok(Self { config, oauth, api })
    }

    /// Returns the shared configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Returns the token exchanger.
    pub fn oauth(&self) -> &OAuthClient {
        &self.oauth
    }

    /// Returns the resource client.
    pub fn api(&self) -> &EposNowClient {
        &self.api
    }
}
