//! Authentication directives
//!
//! A directive pairs a scheme with a credential that is copied verbatim into
//! the `Authorization` header. Basic credentials passed to
//! [`AuthenticationDirective::basic`] must already be base64 encoded;
//! [`AuthenticationDirective::basic_credentials`] encodes a user/password pair.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Supported authentication schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum AuthScheme {
    Bearer,
    Basic,
    /// Unrecognised scheme. Injects nothing.
    Unknown,
}

impl AuthScheme {
    /// Header prefix for the scheme, `None` when no header should be sent.
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Bearer => Some("Bearer"),
            Self::Basic => Some("Basic"),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix().unwrap_or("Unknown"))
    }
}

impl std::str::FromStr for AuthScheme {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case("bearer") {
            Self::Bearer
        } else if s.eq_ignore_ascii_case("basic") {
            Self::Basic
        } else {
            Self::Unknown
        })
    }
}

impl From<String> for AuthScheme {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(scheme) => scheme,
            Err(never) => match never {},
        }
    }
}

/// Authentication scheme plus credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationDirective {
    pub scheme: AuthScheme,
    pub credential: String,
}

impl AuthenticationDirective {
    pub fn new(scheme: AuthScheme, credential: impl Into<String>) -> Self {
        Self { scheme, credential: credential.into() }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(AuthScheme::Bearer, token)
    }

    pub fn basic(encoded: impl Into<String>) -> Self {
        Self::new(AuthScheme::Basic, encoded)
    }

    /// Basic directive from a raw `username:password` pair.
    pub fn basic_credentials(username: &str, password: &str) -> Self {
        Self::basic(STANDARD.encode(format!("{username}:{password}")))
    }

    /// Full `Authorization` header value, or `None` for schemes that inject nothing.
    pub fn header_value(&self) -> Option<String> {
        self.scheme.prefix().map(|prefix| format!("{prefix} {}", self.credential))
    }
}

// Credentials never reach logs.
impl std::fmt::Debug for AuthenticationDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationDirective")
            .field("scheme", &self.scheme)
            .field("credential", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_values() {
        assert_eq!(
            AuthenticationDirective::bearer("abc").header_value().as_deref(),
            Some("Bearer abc")
        );
        assert_eq!(
            AuthenticationDirective::basic("dXNlcjpwYXNz").header_value().as_deref(),
            Some("Basic dXNlcjpwYXNz")
        );
        assert_eq!(AuthenticationDirective::new(AuthScheme::Unknown, "x").header_value(), None);
    }

    #[test]
    fn test_basic_credentials_are_encoded() {
        let directive = AuthenticationDirective::basic_credentials("user", "pass");
        assert_eq!(directive.credential, "dXNlcjpwYXNz");
        assert_eq!(directive.scheme, AuthScheme::Basic);
    }

    #[test]
    fn test_scheme_parsing_falls_back_to_unknown() {
        assert_eq!("BEARER".parse::<AuthScheme>().unwrap(), AuthScheme::Bearer);
        assert_eq!("basic".parse::<AuthScheme>().unwrap(), AuthScheme::Basic);
        assert_eq!("Digest".parse::<AuthScheme>().unwrap(), AuthScheme::Unknown);
    }

    #[test]
    fn test_unrecognised_scheme_deserializes_as_unknown() {
        let directive: AuthenticationDirective =
            serde_json::from_str(r#"{"scheme": "Negotiate", "credential": "t"}"#).unwrap();
        assert_eq!(directive.scheme, AuthScheme::Unknown);
    }

    #[test]
    fn test_debug_redacts_credential() {
        let rendered = format!("{:?}", AuthenticationDirective::bearer("secret-token"));
        assert!(!rendered.contains("secret-token"));
    }
}
