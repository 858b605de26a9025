//! HTTP transports and their assembly into an executor

pub mod transport;

use std::sync::Arc;

use courier_core::{RequestExecutor, TransportSelector};
use courier_domain::{Result, TransportConfig};
use tracing::info;

pub use transport::{ReqwestTransport, ReqwestTransportBuilder};

/// Build the two pooled transports once.
///
/// Every call to [`TransportSelector`]'s `get` returns a clone of one of
/// these two `Arc`s, so connections are reused across requests.
///
/// # Errors
/// Returns `CourierError::Config` if either client cannot be built.
pub fn build_transport_selector(config: &TransportConfig) -> Result<TransportSelector> {
    let plain = Arc::new(ReqwestTransport::plain(config)?);
    let compressed = Arc::new(ReqwestTransport::compressed(config)?);
    info!(
        user_agent = %config.user_agent,
        connect_timeout = ?config.connect_timeout(),
        "Transports initialised"
    );
    Ok(TransportSelector::new(plain, compressed))
}

/// Executor wired to the pooled `reqwest` transports.
///
/// # Errors
/// Returns `CourierError::Config` if the transports cannot be built.
pub fn build_executor(config: &TransportConfig) -> Result<RequestExecutor> {
    let selector = build_transport_selector(config)?;
    Ok(RequestExecutor::new(Arc::new(selector)))
}
