//! Port interfaces for sending requests

use std::sync::Arc;

use async_trait::async_trait;

use super::errors::TransportError;
use super::wire::{WireRequest, WireResponse};

/// A pooled HTTP client able to perform one request/response exchange
///
/// Implementations must be safe for concurrent use; the executor shares them
/// across every in-flight call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Name used in logs ("default" or "compressed" for the pooled pair)
    fn name(&self) -> &str;

    /// Send the request and read the full response.
    ///
    /// Non-2xx responses are returned as `Ok`; only failures to complete the
    /// exchange are errors.
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}

/// Supplies the transport for a request based on its compression preference
///
/// Lookups must be pure: the same flag always yields the same instance.
pub trait TransportProvider: Send + Sync {
    fn get(&self, use_compression: bool) -> Arc<dyn Transport>;
}
