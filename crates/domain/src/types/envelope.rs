//! Uniform result of one executor invocation
//!
//! Every call yields exactly one [`ResponseEnvelope`], whether the remote
//! answered, the network failed, the call was cancelled or the request could
//! not be built. Callers check [`ResponseEnvelope::is_success_status_code`]
//! and never need to match on failure causes.

use serde::ser::{Serialize, Serializer};

use crate::constants::{
    INTERNAL_ERROR_DESCRIPTION, INTERNAL_ERROR_STATUS, TRANSPORT_FAILURE_DESCRIPTION,
    TRANSPORT_FAILURE_STATUS,
};

/// Success or failure outcome carrying the status and payload or errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseEnvelope<T> {
    Success { status_code: u16, status_description: Option<String>, data: T },
    Failure { status_code: u16, status_description: Option<String>, errors: Vec<String> },
}

impl<T> ResponseEnvelope<T> {
    pub fn success(status_code: u16, status_description: Option<String>, data: T) -> Self {
        Self::Success { status_code, status_description, data }
    }

    /// Single-cause failure. The message is kept even when empty so the
    /// error list always has exactly one entry.
    pub fn failure(
        status_code: u16,
        status_description: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Failure { status_code, status_description, errors: vec![message.into()] }
    }

    /// `500` failure for configuration and internal errors.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::failure(INTERNAL_ERROR_STATUS, Some(INTERNAL_ERROR_DESCRIPTION.to_string()), message)
    }

    /// `400` failure for transport faults, timeouts and cancellation.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::failure(
            TRANSPORT_FAILURE_STATUS,
            Some(TRANSPORT_FAILURE_DESCRIPTION.to_string()),
            message,
        )
    }

    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Success { status_code, .. } | Self::Failure { status_code, .. } => *status_code,
        }
    }

    pub fn status_description(&self) -> Option<&str> {
        match self {
            Self::Success { status_description, .. } | Self::Failure { status_description, .. } => {
                status_description.as_deref()
            }
        }
    }

    pub const fn is_success_status_code(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Payload, present only on success.
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Error messages; empty on success.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { errors, .. } => errors,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Payload on success, error messages on failure.
    pub fn into_result(self) -> Result<T, Vec<String>> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { errors, .. } => Err(errors),
        }
    }

    /// Transform the payload, keeping status and errors.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ResponseEnvelope<U> {
        match self {
            Self::Success { status_code, status_description, data } => {
                ResponseEnvelope::Success { status_code, status_description, data: f(data) }
            }
            Self::Failure { status_code, status_description, errors } => {
                ResponseEnvelope::Failure { status_code, status_description, errors }
            }
        }
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRepr<'a, T> {
    status_code: u16,
    status_description: Option<&'a str>,
    is_success_status_code: bool,
    data: Option<&'a T>,
    errors: &'a [String],
}

/// Flat wire shape: `statusCode`, `statusDescription`,
/// `isSuccessStatusCode`, `data`, `errors`.
impl<T: Serialize> Serialize for ResponseEnvelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EnvelopeRepr {
            status_code: self.status_code(),
            status_description: self.status_description(),
            is_success_status_code: self.is_success_status_code(),
            data: self.data(),
            errors: self.errors(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let envelope = ResponseEnvelope::success(200, Some("OK".into()), 42);
        assert!(envelope.is_success_status_code());
        assert_eq!(envelope.status_code(), 200);
        assert_eq!(envelope.status_description(), Some("OK"));
        assert_eq!(envelope.data(), Some(&42));
        assert!(envelope.errors().is_empty());
    }

    #[test]
    fn test_failure_has_exactly_one_error() {
        let envelope: ResponseEnvelope<String> =
            ResponseEnvelope::failure(404, Some("Not Found".into()), "missing");
        assert!(!envelope.is_success_status_code());
        assert_eq!(envelope.errors(), ["missing".to_string()]);
        assert!(envelope.data().is_none());
    }

    #[test]
    fn test_empty_failure_message_is_kept() {
        let envelope: ResponseEnvelope<()> = ResponseEnvelope::failure(400, None, "");
        assert_eq!(envelope.errors().len(), 1);
        assert_eq!(envelope.errors()[0], "");
    }

    #[test]
    fn test_sentinel_constructors() {
        let internal: ResponseEnvelope<()> = ResponseEnvelope::internal_error("boom");
        assert_eq!(internal.status_code(), 500);

        let transport: ResponseEnvelope<()> = ResponseEnvelope::transport_failure("refused");
        assert_eq!(transport.status_code(), 400);
        assert_eq!(transport.status_description(), Some("Bad Request"));
    }

    #[test]
    fn test_map_and_into_result() {
        let doubled = ResponseEnvelope::success(201, None, 21).map(|v| v * 2);
        assert_eq!(doubled.into_result(), Ok(42));

        let failed: ResponseEnvelope<i32> = ResponseEnvelope::transport_failure("dns");
        assert_eq!(failed.map(|v| v * 2).into_result(), Err(vec!["dns".to_string()]));
    }

    #[test]
    fn test_serializes_flat_camel_case() {
        let envelope: ResponseEnvelope<u8> = ResponseEnvelope::internal_error("no endpoint");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["statusCode"], 500);
        assert_eq!(json["isSuccessStatusCode"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["errors"][0], "no endpoint");
    }
}
