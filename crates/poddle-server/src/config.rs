//! Server configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/poddle/config.toml` by default:
//!
//! ```toml
//! [server]
//! bind_address = "127.0.0.1"
//! port = 5000
//!
//! [eposnow]
//! client_id = "env::EPOSNOW_CLIENT_ID"
//! client_secret = "pass::eposnow/client-secret"
//! package_key = "env::EPOSNOW_PACKAGE_KEY"
//! redirect_uri = "https://app.example.com/eposnow/callback"
//! ```
//!
//! Credential values support secret references (see [`crate::secret`]).

use std::path::{Path, PathBuf};
use std::time::Duration;

use poddle_providers::eposnow::ProviderConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Configuration for the poddle server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener settings.
    pub server: ServerSettings,

    /// Epos Now credentials and endpoints.
    pub eposnow: EposNowSettings,
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address or host name to bind.
    pub bind_address: String,

    /// TCP port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Epos Now settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EposNowSettings {
    /// OAuth client ID (supports `pass::` and `env::` prefixes).
    pub client_id: Option<String>,

    /// OAuth client secret (supports `pass::` and `env::` prefixes).
    pub client_secret: Option<String>,

    /// Package key sent with every API call (supports `pass::` and `env::`).
    pub package_key: Option<String>,

    /// Redirect URI registered with Epos Now.
    pub redirect_uri: Option<String>,

    /// Resource API base URL.
    pub base_url: String,

    /// OAuth server base URL.
    pub auth_url: String,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for EposNowSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            package_key: None,
            redirect_uri: None,
            base_url: ProviderConfig::DEFAULT_API_BASE_URL.to_string(),
            auth_url: ProviderConfig::DEFAULT_AUTH_BASE_URL.to_string(),
            timeout: ProviderConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EposNowSettings {
    /// Converts to provider configuration.
    ///
    /// Resolves secret references and validates the result, so that any
    /// missing credential is reported at startup rather than on first use.
    pub fn to_provider_config(&self) -> Result<ProviderConfig, String> {
        let client_id = resolve_required("client_id", self.client_id.as_deref())?;
        let client_secret = resolve_required("client_secret", self.client_secret.as_deref())?;
        let package_key = resolve_required("package_key", self.package_key.as_deref())?;
        let redirect_uri = resolve_required("redirect_uri", self.redirect_uri.as_deref())?;

        let config = ProviderConfig::new(client_id, client_secret, package_key, redirect_uri)
            .with_api_base_url(&self.base_url)
            .with_auth_base_url(&self.auth_url)
            .with_timeout(Duration::from_secs(self.timeout));

        config.validate()?;
        Ok(config)
    }
}

fn resolve_required(name: &str, raw: Option<&str>) -> Result<String, String> {
    let raw = raw.ok_or_else(|| {
        format!(
            "{} is missing from [eposnow] section in {}",
            name,
            ServerConfig::default_path().display()
        )
    })?;
    crate::secret::resolve(raw).map_err(|e| format!("failed to resolve {}: {}", name, e))
}

impl ServerConfig {
    /// Loads configuration from the default path, or defaults if absent.
    pub fn load() -> ServerResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ServerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ServerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ServerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the Epos Now settings into a validated provider config.
    pub fn provider_config(&self) -> ServerResult<ProviderConfig> {
        self.eposnow
            .to_provider_config()
            .map_err(ServerError::config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("poddle")
    }
}
