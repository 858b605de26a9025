//! Conversions from external infrastructure errors

pub mod conversions;

pub use conversions::{classify_reqwest_error, InfraError};
