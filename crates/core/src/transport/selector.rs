//! Compression-based transport selection

use std::sync::Arc;

use super::ports::{Transport, TransportProvider};

/// Holds the two pooled transports and hands out the one matching a
/// request's compression preference
///
/// Both transports are built up front; `get` is a plain lookup that returns
/// clones of the same `Arc`, so connection pools are reused across calls.
#[derive(Clone)]
pub struct TransportSelector {
    plain: Arc<dyn Transport>,
    compressed: Arc<dyn Transport>,
}

impl TransportSelector {
    pub fn new(plain: Arc<dyn Transport>, compressed: Arc<dyn Transport>) -> Self {
        Self { plain, compressed }
    }
}

impl TransportProvider for TransportSelector {
    fn get(&self, use_compression: bool) -> Arc<dyn Transport> {
        if use_compression {
            Arc::clone(&self.compressed)
        } else {
            Arc::clone(&self.plain)
        }
    }
}

impl std::fmt::Debug for TransportSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportSelector")
            .field("plain", &self.plain.name())
            .field("compressed", &self.compressed.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::transport::{TransportError, WireRequest, WireResponse};

    struct NamedTransport(&'static str);

    #[async_trait]
    impl Transport for NamedTransport {
        fn name(&self) -> &str {
            self.0
        }

        async fn send(&self, _request: WireRequest) -> Result<WireResponse, TransportError> {
            Ok(WireResponse::new(200, Vec::new()))
        }
    }

    #[test]
    fn test_selection_is_stable_and_distinct() {
        let selector = TransportSelector::new(
            Arc::new(NamedTransport("default")),
            Arc::new(NamedTransport("compressed")),
        );

        let first = selector.get(true);
        let second = selector.get(true);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "compressed");

        let plain = selector.get(false);
        assert!(Arc::ptr_eq(&plain, &selector.get(false)));
        assert_eq!(plain.name(), "default");
        assert!(!Arc::ptr_eq(&first, &plain));
    }
}
