//! Epos Now provider implementation.
//!
//! This module talks to the Epos Now point-of-sale API on behalf of a caller
//! who already holds (or is about to obtain) an OAuth access token.
//!
//! # Components
//!
//! - [`OAuthClient`] - authorization URL, code exchange, token refresh
//! - [`ResourceFetcher`] - one authenticated GET, case-insensitive decoding
//! - [`EposNowClient`] - typed product / customer / sale reads
//!
//! Nothing here caches tokens or retries; every call is one round trip and
//! the only shared state is the read-only [`ProviderConfig`].
//!
//! # Example
//!
//! ```ignore
//! use poddle_providers::eposnow::{EposNowProvider, ProviderConfig};
//!
//! let config = ProviderConfig::new("client-id", "client-secret", "package-key", "https://app/cb");
//! let provider = EposNowProvider::new(config)?;
//!
//! let tokens = provider.oauth().exchange_code(&code).await?;
//! let products = provider.api().products(&tokens.access_token).await?;
//! ```

mod client;
mod config;
mod fetcher;
mod http;
mod oauth;
mod provider;

pub use client::EposNowClient;
pub use config::ProviderConfig;
pub use fetcher::{PACKAGE_KEY_HEADER, ResourceFetcher};
pub use http::build_http_client;
pub use oauth::{OAuthClient, TokenGrant};
pub use provider::EposNowProvider;
