//! Authenticated GETs against the Epos Now resource API.
//!
//! One generic routine serves every resource: it injects the caller's bearer
//! token and the configured package key, and decodes the JSON body into the
//! requested type without caring about field-name casing.
//!
//! A single request is made per call. There is no retry and no paging: if the
//! provider paginates, only the first page is returned.

use std::sync::Arc;

use poddle_core::json::{from_str_case_insensitive, from_str_or_default};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};

use super::config::ProviderConfig;
use super::http::{build_http_client, read_body, transport_error};

/// Header carrying the static package credential.
pub const PACKAGE_KEY_HEADER: &str = "PackageKey";

/// Stateless fetcher for provider resources.
///
/// Cheap to clone; clones share the HTTP connection pool and the config.
#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    config: Arc<ProviderConfig>,
    http_client: reqwest::Client,
}

impl ResourceFetcher {
    /// Creates a new fetcher with its own HTTP client.
    pub fn new(config: Arc<ProviderConfig>) -> ProviderResult<Self> {
        let http_client = build_http_client(&config)?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Creates a new fetcher reusing an existing HTTP client.
    pub fn with_http_client(config: Arc<ProviderConfig>, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Fetches `path` and decodes the body into `T`.
    ///
    /// `path` is relative to the API base URL and starts with `/`.
    pub async fn fetch<T>(&self, path: &str, access_token: &str) -> ProviderResult<T>
    where
        T: DeserializeOwned,
    {
        let body = self.get(path, access_token).await?;
        from_str_case_insensitive(&body).map_err(|e| decode_error(e, path))
    }

    /// Fetches a list resource. An empty or `null` body yields an empty list.
    pub async fn fetch_list<T>(&self, path: &str, access_token: &str) -> ProviderResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let body = self.get(path, access_token).await?;
        from_str_or_default(&body).map_err(|e| decode_error(e, path))
    }

    /// Fetches a single resource, mapping a provider 404 to `None`.
    pub async fn fetch_optional<T>(
        &self,
        path: &str,
        access_token: &str,
    ) -> ProviderResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.fetch(path, access_token).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Issues the GET and returns the raw body of a successful response.
    async fn get(&self, path: &str, access_token: &str) -> ProviderResult<String> {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!(endpoint = path, "calling provider");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .header(PACKAGE_KEY_HEADER, self.config.package_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(e, path))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), endpoint = path, "API call failed");
            return Err(ProviderError::from_status(status.as_u16(), path));
        }

        read_body(response, path).await
    }
}

fn decode_error(err: serde_json::Error, path: &str) -> ProviderError {
    warn!(endpoint = path, error = %err, "failed to decode provider response");
    ProviderError::invalid_response(format!("failed to parse response: {}", err))
        .with_endpoint(path)
        .with_source(err)
}
