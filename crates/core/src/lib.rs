//! # Courier Core
//!
//! Request orchestration - no HTTP client code.
//!
//! This crate contains:
//! - Transport ports (`Transport`, `TransportProvider`) and wire types
//! - Authentication header injection
//! - Linear backoff timing with cancellation
//! - `RequestExecutor`, which turns a `RequestSpec` into one `ResponseEnvelope`
//!
//! ## Architecture Principles
//! - Only depends on `courier-domain`
//! - Concrete transports are injected through `TransportProvider`
//! - Every failure surfaces as an envelope, never a panic

pub mod auth;
pub mod backoff;
pub mod executor;
pub mod transport;

pub use auth::AuthenticationInjector;
pub use backoff::{BackoffSchedule, Cancelled};
pub use executor::RequestExecutor;
pub use tokio_util::sync::CancellationToken;
pub use transport::{
    Transport, TransportError, TransportProvider, TransportSelector, WireRequest, WireResponse,
};
