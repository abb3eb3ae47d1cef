//! Core types: provider read models, case-insensitive decoding, tracing

pub mod json;
pub mod models;
pub mod tracing;

pub use json::{fold_key, fold_keys, from_str_case_insensitive, from_str_or_default};
pub use models::{Customer, Product, Sale, SaleItem, TokenResponse};
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
