//! Epos Now provider: OAuth token exchange and authenticated resource reads.
//!
//! - [`eposnow::OAuthClient`] - authorization-code and refresh-token grants
//! - [`eposnow::ResourceFetcher`] - generic authenticated GET with
//!   case-insensitive decoding
//! - [`ProviderError`] - typed failures (configuration, upstream rejection,
//!   transport)
//!
//! # Architecture
//!
//! ```text
//!            caller (access token)
//!                     │
//!                     ▼
//!  ┌─────────────────────────────────────┐
//!  │           EposNowProvider           │
//!  │                                     │
//!  │  OAuthClient        EposNowClient   │
//!  │       │                   │         │
//!  │       │            ResourceFetcher  │
//!  └───────┼───────────────────┼─────────┘
//!          ▼                   ▼
//!   POST /token         GET /Product, ...
//! ```

pub mod eposnow;
pub mod error;

pub use error::{FailureKind, ProviderError, ProviderErrorCode, ProviderResult};
