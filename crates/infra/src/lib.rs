//! # Courier Infrastructure
//!
//! Infrastructure implementations of the core transport ports.
//!
//! This crate contains:
//! - `reqwest`-backed transports and the pooled transport selector
//! - `reqwest::Error` classification
//! - Configuration loading (environment variables, TOML/JSON files)
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `courier-core`
//! - Depends on `courier-domain` and `courier-core`
//! - Contains all "impure" code (sockets, files, process environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use errors::{classify_reqwest_error, InfraError};
pub use http::{build_executor, build_transport_selector, ReqwestTransport, ReqwestTransportBuilder};
pub use observability::init_tracing;
