//! Typed read operations over the Epos Now resources.

use poddle_core::{Customer, Product, Sale};

use crate::error::ProviderResult;

use super::fetcher::ResourceFetcher;

const PRODUCTS_PATH: &str = "/Product";
const CUSTOMERS_PATH: &str = "/Customer";
const SALES_PATH: &str = "/Sale";

/// Epos Now API client.
///
/// Each call is a single independent round trip authenticated with the
/// caller's access token.
#[derive(Debug, Clone)]
pub struct EposNowClient {
    fetcher: ResourceFetcher,
}

impl EposNowClient {
    /// Creates a client on top of `fetcher`.
    pub fn new(fetcher: ResourceFetcher) -> Self {
        Self { fetcher }
    }

    /// Lists products (first page only).
    pub async fn products(&self, access_token: &str) -> ProviderResult<Vec<Product>> {
        self.fetcher.fetch_list(PRODUCTS_PATH, access_token).await
    }

    /// Fetches one product, `None` if the provider does not know it.
    pub async fn product(&self, id: i32, access_token: &str) -> ProviderResult<Option<Product>> {
        self.fetcher
            .fetch_optional(&format!("{}/{}", PRODUCTS_PATH, id), access_token)
            .await
    }

    /// Lists customers (first page only).
    pub async fn customers(&self, access_token: &str) -> ProviderResult<Vec<Customer>> {
        self.fetcher.fetch_list(CUSTOMERS_PATH, access_token).await
    }

    /// Fetches one customer, `None` if the provider does not know it.
    pub async fn customer(&self, id: i32, access_token: &str) -> ProviderResult<Option<Customer>> {
        self.fetcher
            .fetch_optional(&format!("{}/{}", CUSTOMERS_PATH, id), access_token)
            .await
    }

    /// Lists sales (first page only).
    pub async fn sales(&self, access_token: &str) -> ProviderResult<Vec<Sale>> {
        self.fetcher.fetch_list(SALES_PATH, access_token).await
    }
}
