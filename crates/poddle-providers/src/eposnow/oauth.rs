//! OAuth 2.0 authorization-code and refresh-token grants against Epos Now.
//!
//! Both grants post a form to `{auth_base_url}/token` and parse the same JSON
//! shape; they only differ in their form parameters, selected by
//! [`TokenGrant`]. Tokens are returned to the caller and never stored here.

use std::sync::Arc;

use poddle_core::TokenResponse;
use tracing::{debug, info, warn};

use crate::error::{ProviderError, ProviderResult};

use super::config::ProviderConfig;
use super::http::{build_http_client, read_body, transport_error};

/// Endpoint label used in errors and logs.
const TOKEN_ENDPOINT: &str = "/token";

/// The grant presented to the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenGrant<'a> {
    /// Exchange an authorization code obtained from the consent redirect.
    AuthorizationCode { code: &'a str },
    /// Exchange a refresh token for a fresh access token.
    RefreshToken { refresh_token: &'a str },
}

impl<'a> TokenGrant<'a> {
    /// Returns the OAuth `grant_type` value.
    pub fn grant_type(&self) -> &'static str {
        match self {
            Self::AuthorizationCode { .. } => "authorization_code",
            Self::RefreshToken { .. } => "refresh_token",
        }
    }

    /// Returns the form parameters for this grant.
    pub fn form_params(&self, config: &'a ProviderConfig) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![("grant_type", self.grant_type())];
        match *self {
            Self::AuthorizationCode { code } => {
                params.push(("code", code));
                params.push(("redirect_uri", config.redirect_uri.as_str()));
            }
            Self::RefreshToken { refresh_token } => {
                params.push(("refresh_token", refresh_token));
            }
        }
        params.push(("client_id", config.client_id.as_str()));
        params.push(("client_secret", config.client_secret.as_str()));
        params
    }
}

/// OAuth client for the Epos Now authorization server.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: Arc<ProviderConfig>,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates a new OAuth client with its own HTTP client.
    pub fn new(config: Arc<ProviderConfig>) -> ProviderResult<Self> {
        let http_client = build_http_client(&config)?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Creates a new OAuth client reusing an existing HTTP client.
    pub fn with_http_client(config: Arc<ProviderConfig>, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Builds the URL the user is sent to in order to grant access.
    ///
    /// `None` or a blank string requests [`ProviderConfig::DEFAULT_SCOPES`];
    /// any other value is encoded as given.
    pub fn authorization_url(&self, scopes: Option<&str>) -> String {
        let scopes = scopes
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(ProviderConfig::DEFAULT_SCOPES);

        format!(
            "{}/authorize?response_type=code&client_id={}&redirect_uri={}&scope={}",
            self.config.auth_base_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(scopes),
        )
    }

    /// Exchanges an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> ProviderResult<TokenResponse> {
        self.request_token(TokenGrant::AuthorizationCode { code })
            .await
    }

    /// Exchanges a refresh token for a new token set.
    pub async fn refresh_token(&self, refresh_token: &str) -> ProviderResult<TokenResponse> {
        self.request_token(TokenGrant::RefreshToken { refresh_token })
            .await
    }

    /// Posts `grant` to the token endpoint and parses the response.
    pub async fn request_token(&self, grant: TokenGrant<'_>) -> ProviderResult<TokenResponse> {
        let grant_type = grant.grant_type();
        let params = grant.form_params(&self.config);

        debug!(grant_type, "requesting token");

        let response = self
            .http_client
            .post(self.config.token_url())
            .form(&params)
            .send()
            .await
            .map_err(|e| transport_error(e, TOKEN_ENDPOINT))?;

        let status = response.status();
        if !status.is_success() {
            warn!(grant_type, status = status.as_u16(), "token request rejected");
            return Err(ProviderError::from_status(status.as_u16(), TOKEN_ENDPOINT));
        }

        let body = read_body(response, TOKEN_ENDPOINT).await?;
        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(grant_type, error = %e, "invalid token response");
            ProviderError::invalid_response(format!("invalid token response: {}", e))
                .with_endpoint(TOKEN_ENDPOINT)
                .with_source(e)
        })?;

        info!(grant_type, expires_in = token.expires_in, "obtained tokens");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::error::{FailureKind, ProviderErrorCode};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(auth_base_url: &str) -> Arc<ProviderConfig> {
        Arc::new(
            ProviderConfig::new(
                "client-1",
                "s3cret",
                "pkg",
                "https://app.example.com/eposnow/callback?x=1",
            )
            .with_auth_base_url(auth_base_url)
            .with_timeout(Duration::from_secs(5)),
        )
    }

    fn client(auth_base_url: &str) -> OAuthClient {
        OAuthClient::new(config(auth_base_url)).unwrap()
    }

    fn token_json() -> serde_json::Value {
        json!({
            "access_token": "a",
            "token_type": "Bearer",
            "expires_in": 3600,
            "refresh_token": "r"
        })
    }

    #[test]
    fn authorization_url_format() {
        let url = client("https://auth.example.com").authorization_url(Some("sales products"));
        assert_eq!(
            url,
            "https://auth.example.com/authorize?response_type=code&client_id=client-1\
             &redirect_uri=https%3A%2F%2Fapp.example.com%2Feposnow%2Fcallback%3Fx%3D1\
             &scope=sales%20products"
        );
    }

    #[test]
    fn authorization_url_default_scopes() {
        let client = client("https://auth.example.com");
        let expected = "scope=sales%20products%20customers";
        assert!(client.authorization_url(None).ends_with(expected));
        assert!(client.authorization_url(Some("  ")).ends_with(expected));
    }

    #[test]
    fn authorization_url_keeps_surrounding_whitespace() {
        let url = client("https://auth.example.com").authorization_url(Some(" sales "));
        assert!(url.ends_with("&scope=%20sales%20"));
    }

    #[test]
    fn authorization_url_encodes_arbitrary_scopes() {
        let client = client("https://auth.example.com");
        for scopes in ["a", "a b&c=d", "produits ventes", "x/y+z", " sales "] {
            let url = client.authorization_url(Some(scopes));
            assert!(url.contains("response_type=code"));
            assert!(url.ends_with(&format!("&scope={}", urlencoding::encode(scopes))));
            assert!(url.contains(&format!(
                "redirect_uri={}",
                urlencoding::encode("https://app.example.com/eposnow/callback?x=1")
            )));
        }
    }

    #[test]
    fn grant_form_params() {
        let config = config("https://auth.example.com");

        let params = TokenGrant::AuthorizationCode { code: "abc" }.form_params(&config);
        assert_eq!(
            params,
            vec![
                ("grant_type", "authorization_code"),
                ("code", "abc"),
                ("redirect_uri", "https://app.example.com/eposnow/callback?x=1"),
                ("client_id", "client-1"),
                ("client_secret", "s3cret"),
            ]
        );

        let params = TokenGrant::RefreshToken { refresh_token: "r1" }.form_params(&config);
        assert_eq!(
            params,
            vec![
                ("grant_type", "refresh_token"),
                ("refresh_token", "r1"),
                ("client_id", "client-1"),
                ("client_secret", "s3cret"),
            ]
        );
    }

    #[tokio::test]
    async fn exchange_code_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=validcode"))
            .and(body_string_contains("client_secret=s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_json()))
            .expect(1)
            .mount(&server)
            .await;

        let token = client(&server.uri()).exchange_code("validcode").await.unwrap();
        assert_eq!(
            token,
            TokenResponse {
                access_token: "a".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 3600,
                refresh_token: "r".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn refresh_token_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=r-old"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_json()))
            .expect(1)
            .mount(&server)
            .await;

        let token = client(&server.uri()).refresh_token("r-old").await.unwrap();
        assert_eq!(token.access_token, "a");
        assert_eq!(token.refresh_token, "r");
    }

    #[tokio::test]
    async fn rejected_grants_are_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})),
            )
            .mount(&server)
            .await;

        let client = client(&server.uri());

        let err = client.exchange_code("expired").await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::BadRequest);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.endpoint(), Some("/token"));
        assert_eq!(err.kind(), FailureKind::UpstreamRejection);

        let err = client.refresh_token("revoked").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn malformed_token_body_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server.uri()).exchange_code("code").await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let server = MockServer::builder().start().await;
        let uri = server.uri();
        drop(server);

        let err = client(&uri).exchange_code("code").await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::NetworkError);
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(token_json())
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = Arc::new(
            ProviderConfig::new("id", "secret", "pkg", "https://app.example.com/cb")
                .with_auth_base_url(server.uri())
                .with_timeout(Duration::from_millis(100)),
        );
        let err = OAuthClient::new(config)
            .unwrap()
            .refresh_token("r")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::NetworkError);
        assert_eq!(err.message(), "request timeout");
    }
}
