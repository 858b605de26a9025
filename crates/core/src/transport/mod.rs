//! Transport ports, wire-level types and transport selection

pub mod errors;
pub mod ports;
pub mod selector;
pub mod wire;

pub use errors::TransportError;
pub use ports::{Transport, TransportProvider};
pub use selector::TransportSelector;
pub use wire::{WireRequest, WireResponse};
