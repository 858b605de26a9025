//! Transport error classification
//!
//! Separates faults worth retrying (the network misbehaved) from internal
//! errors (the request itself is broken, retrying cannot help).

use std::time::Duration;

use thiserror::Error;

/// Errors a transport can report for one attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// DNS resolution or TCP/TLS connection failure
    #[error("connection failed: {0}")]
    Connect(String),

    /// The attempt exceeded its deadline
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The request could not be sent or the exchange broke mid-flight
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be read or decompressed
    #[error("response body failed: {0}")]
    Body(String),

    /// Malformed request or other non-network failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl TransportError {
    /// Whether the failure came from the network and may succeed on retry.
    pub const fn is_transport_fault(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_classification() {
        assert!(TransportError::Connect("dns".into()).is_transport_fault());
        assert!(TransportError::Timeout(Duration::from_secs(1)).is_transport_fault());
        assert!(TransportError::Request("reset".into()).is_transport_fault());
        assert!(TransportError::Body("truncated".into()).is_transport_fault());
        assert!(!TransportError::Internal("bad header".into()).is_transport_fault());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            TransportError::Timeout(Duration::from_secs(15)).to_string(),
            "request timed out after 15s"
        );
        assert_eq!(
            TransportError::Connect("connection refused".into()).to_string(),
            "connection failed: connection refused"
        );
    }
}
