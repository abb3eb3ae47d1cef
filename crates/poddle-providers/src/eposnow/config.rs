//! Epos Now provider configuration.

use std::time::Duration;

use url::Url;

/// Credentials and endpoints for the Epos Now API.
///
/// Built once at startup and shared read-only (behind an `Arc`) by the token
/// exchanger and the resource fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// OAuth client identifier.
    pub client_id: String,

    /// OAuth client secret.
    pub client_secret: String,

    /// Static package credential sent as the `PackageKey` header.
    pub package_key: String,

    /// Redirect URI registered with the provider.
    pub redirect_uri: String,

    /// Base URL of the resource API, without trailing slash.
    pub api_base_url: String,

    /// Base URL of the OAuth server, without trailing slash.
    pub auth_base_url: String,

    /// Upper bound for a single provider round trip.
    pub timeout: Duration,

    /// User agent string for provider requests.
    pub user_agent: String,
}

impl ProviderConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default resource API base URL.
    pub const DEFAULT_API_BASE_URL: &'static str = "https://api.eposnowhq.com/api/V2";

    /// Default OAuth server base URL.
    pub const DEFAULT_AUTH_BASE_URL: &'static str = "https://auth.eposnowhq.com";

    /// Scopes requested when the caller does not name any.
    pub const DEFAULT_SCOPES: &'static str = "sales products customers";

    /// Creates a configuration with the default endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        package_key: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            package_key: package_key.into(),
            redirect_uri: redirect_uri.into(),
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            auth_base_url: Self::DEFAULT_AUTH_BASE_URL.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("poddle/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the resource API base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = trim_trailing_slash(url.into());
        self
    }

    /// Sets the OAuth server base URL.
    pub fn with_auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = trim_trailing_slash(url.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the token endpoint URL.
    pub fn token_url(&self) -> String {
        format!("{}/token", self.auth_base_url)
    }

    /// Validates the configuration.
    ///
    /// Every credential must be non-empty and both base URLs must be absolute
    /// http(s) URLs. Returns a message naming the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("package_key", &self.package_key),
            ("redirect_uri", &self.redirect_uri),
            ("base_url", &self.api_base_url),
            ("auth_url", &self.auth_base_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} is required", name));
            }
        }

        for (name, value) in [("base_url", &self.api_base_url), ("auth_url", &self.auth_base_url)] {
            let url = Url::parse(value).map_err(|e| format!("{} is not a valid URL: {}", name, e))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!("{} must use http or https", name));
            }
        }

        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
