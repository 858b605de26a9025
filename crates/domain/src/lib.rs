//! # Courier Domain
//!
//! Data types shared by the request execution engine.
//!
//! This crate contains:
//! - Request descriptions (`RequestSpec`, `RetryPolicy`,
//!   `AuthenticationDirective`)
//! - The uniform result type (`ResponseEnvelope`)
//! - Configuration structures
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other Courier crates
//! - No I/O, no async runtime

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
