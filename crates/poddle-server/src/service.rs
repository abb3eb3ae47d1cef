//! Named operations exposed to the HTTP layer.
//!
//! Each operation logs its invocation and delegates to the provider. Typed
//! provider failures are logged here and collapsed into the shapes the
//! routes need: `None` for a failed token exchange or a missing entity, an
//! empty list for a failed list read.

use poddle_core::{Customer, Product, Sale, TokenResponse};
use poddle_providers::eposnow::EposNowProvider;
use poddle_providers::{ProviderError, ProviderResult};
use tracing::{info, warn};

/// Epos Now operations, one per route.
#[derive(Debug, Clone)]
pub struct EposNowService {
    provider: EposNowProvider,
}

impl EposNowService {
    /// Creates a service over `provider`.
    pub fn new(provider: EposNowProvider) -> Self {
        Self { provider }
    }

    /// Builds the consent URL for `scopes` (default scopes when `None`).
    pub fn authorization_url(&self, scopes: Option<&str>) -> String {
        self.provider.oauth().authorization_url(scopes)
    }

    /// Exchanges an authorization code for tokens.
    pub async fn authorize(&self, code: &str) -> Option<TokenResponse> {
        info!("exchanging authorization code");
        collapse("authorize", self.provider.oauth().exchange_code(code).await)
    }

    /// Refreshes an access token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Option<TokenResponse> {
        info!("refreshing token");
        collapse(
            "refresh_token",
            self.provider.oauth().refresh_token(refresh_token).await,
        )
    }

    /// Lists products; empty if the provider call failed.
    pub async fn products(&self, access_token: &str) -> Vec<Product> {
        info!("fetching products");
        collapse_list("products", self.provider.api().products(access_token).await)
    }

    /// Fetches one product.
    pub async fn product(&self, id: i32, access_token: &str) -> Option<Product> {
        info!(id, "fetching product");
        collapse("product", self.provider.api().product(id, access_token).await).flatten()
    }

    /// Lists customers; empty if the provider call failed.
    pub async fn customers(&self, access_token: &str) -> Vec<Customer> {
        info!("fetching customers");
        collapse_list("customers", self.provider.api().customers(access_token).await)
    }

    /// Fetches one customer.
    pub async fn customer(&self, id: i32, access_token: &str) -> Option<Customer> {
        info!(id, "fetching customer");
        collapse("customer", self.provider.api().customer(id, access_token).await).flatten()
    }

    /// Lists sales; empty if the provider call failed.
    pub async fn sales(&self, access_token: &str) -> Vec<Sale> {
        info!("fetching sales");
        collapse_list("sales", self.provider.api().sales(access_token).await)
    }
}

fn collapse<T>(operation: &str, result: ProviderResult<T>) -> Option<T> {
    result.map_err(|e| log_failure(operation, &e)).ok()
}

fn collapse_list<T>(operation: &str, result: ProviderResult<Vec<T>>) -> Vec<T> {
    collapse(operation, result).unwrap_or_default()
}

fn log_failure(operation: &str, err: &ProviderError) {
    warn!(
        operation,
        code = %err.code(),
        kind = ?err.kind(),
        status = err.status(),
        endpoint = err.endpoint(),
        retryable = err.is_retryable(),
        "provider call failed: {}",
        err.message()
    );
}
