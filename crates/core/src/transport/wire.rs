//! Wire-level request and response values
//!
//! A [`WireRequest`] is rebuilt from the [`RequestSpec`] for every attempt so
//! that no attempt can observe state left behind by a previous one.

use courier_domain::{HttpMethod, RequestSpec};
use url::Url;

use super::errors::TransportError;
use crate::auth::AuthenticationInjector;

/// Request handed to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl WireRequest {
    /// Build the wire request for one attempt.
    ///
    /// Drops headers with empty names and appends the authentication header
    /// when the directive's scheme is recognised.
    ///
    /// # Errors
    /// Returns `TransportError::Internal` if the endpoint is missing, cannot
    /// be parsed, or is not an absolute http(s) URL.
    pub fn from_spec(spec: &RequestSpec) -> Result<Self, TransportError> {
        let endpoint = spec
            .endpoint
            .as_deref()
            .ok_or_else(|| TransportError::Internal("request endpoint is not set".into()))?;

        let url = Url::parse(endpoint).map_err(|e| {
            TransportError::Internal(format!("invalid endpoint '{endpoint}': {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::Internal(format!(
                "unsupported endpoint scheme '{}'",
                url.scheme()
            )));
        }

        let headers: Vec<(String, String)> = spec
            .headers
            .iter()
            .filter(|(name, _)| !name.trim().is_empty())
            .cloned()
            .collect();
        let headers = AuthenticationInjector::apply(&headers, spec.authentication.as_ref());

        Ok(Self { method: spec.method, url, headers, body: spec.body.clone() })
    }

    /// First value of `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Completed HTTP exchange
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    /// Canonical reason phrase, when the status code has one
    pub reason: Option<String>,
    pub body: Vec<u8>,
}

impl WireResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, reason: None, body: body.into() }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// 2xx status class
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use courier_domain::AuthenticationDirective;

    use super::*;

    #[test]
    fn test_from_spec_drops_empty_header_names() {
        let spec = RequestSpec::get("https://api.example.com/items")
            .header("X-Keep", "1")
            .header("", "gone")
            .header("   ", "also gone")
            .build();

        let wire = WireRequest::from_spec(&spec).unwrap();
        assert_eq!(wire.headers, vec![("X-Keep".to_string(), "1".to_string())]);
        assert_eq!(wire.url.as_str(), "https://api.example.com/items");
    }

    #[test]
    fn test_from_spec_injects_auth_without_touching_spec() {
        let spec = RequestSpec::get("https://api.example.com")
            .authentication(AuthenticationDirective::bearer("abc"))
            .build();

        let wire = WireRequest::from_spec(&spec).unwrap();
        assert_eq!(wire.header("authorization"), Some("Bearer abc"));
        assert!(spec.headers.is_empty());
    }

    #[test]
    fn test_from_spec_rejects_relative_endpoint() {
        let spec = RequestSpec::get("/relative/path").build();
        let err = WireRequest::from_spec(&spec).unwrap_err();
        assert!(matches!(err, TransportError::Internal(_)));
    }

    #[test]
    fn test_from_spec_rejects_non_http_scheme() {
        let spec = RequestSpec::get("ftp://files.example.com/a").build();
        assert!(matches!(WireRequest::from_spec(&spec), Err(TransportError::Internal(_))));
    }

    #[test]
    fn test_response_status_class() {
        assert!(WireResponse::new(204, Vec::new()).is_success());
        assert!(!WireResponse::new(301, Vec::new()).is_success());
        assert!(!WireResponse::new(503, Vec::new()).is_success());
    }
}
