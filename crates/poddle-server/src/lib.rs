//! HTTP front door for the Epos Now integration.
//!
//! This crate maps inbound HTTP requests onto the provider operations:
//! - TOML configuration with secret references
//! - Bearer token extraction and status-code mapping
//! - Per-operation logging in [`EposNowService`]
//! - Graceful shutdown on SIGTERM/SIGINT
//!
//! # Example
//!
//! ```rust,no_run
//! use poddle_providers::eposnow::EposNowProvider;
//! use poddle_server::{EposNowService, HttpServer, ServerConfig, shutdown_signal};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::load()?;
//!     let provider = EposNowProvider::new(config.provider_config()?)?;
//!     let server = HttpServer::bind(&config.server, EposNowService::new(provider)).await?;
//!     server.run(shutdown_signal()).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
mod config;
mod error;
mod routes;
mod secret;
mod server;
mod service;
mod signals;

pub use config::{EposNowSettings, ServerConfig, ServerSettings};
pub use error::{ServerError, ServerResult};
pub use routes::{API_PREFIX, AppState, BearerToken, extract_bearer_token, router};
pub use server::HttpServer;
pub use service::EposNowService;
pub use signals::shutdown_signal;
