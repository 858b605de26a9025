//! Declarative request description
//!
//! A [`RequestSpec`] describes one logical call. It is owned by the caller
//! and only ever borrowed by the executor, so one spec can be executed many
//! times.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::auth::AuthenticationDirective;
use super::retry::RetryPolicy;
use crate::config::RequestDefaults;
use crate::constants::{
    CONTENT_TYPE_HEADER, DEFAULT_ENABLE_COMPRESSION, DEFAULT_TIMEOUT_PER_ATTEMPT_SECS,
    JSON_CONTENT_TYPE,
};
use crate::errors::{CourierError, Result};
use crate::impl_domain_enum_conversions;

/// HTTP verbs the engine accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl_domain_enum_conversions!(HttpMethod {
    Get => "GET",
    Post => "POST",
    Put => "PUT",
    Patch => "PATCH",
    Delete => "DELETE",
});

/// Description of one logical HTTP call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Absolute URI. Checked at execution time, not here.
    pub endpoint: Option<String>,
    pub method: HttpMethod,
    /// Ordered name/value pairs. Empty names are dropped when the wire
    /// request is built.
    pub headers: Vec<(String, String)>,
    pub authentication: Option<AuthenticationDirective>,
    pub body: Option<Vec<u8>>,
    pub enable_compression: bool,
    pub timeout_per_attempt: Duration,
    pub retry_policy: RetryPolicy,
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self {
            endpoint: None,
            method: HttpMethod::Get,
            headers: Vec::new(),
            authentication: None,
            body: None,
            enable_compression: DEFAULT_ENABLE_COMPRESSION,
            timeout_per_attempt: Duration::from_secs(DEFAULT_TIMEOUT_PER_ATTEMPT_SECS),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl RequestSpec {
    /// Start building a spec for `method` against `endpoint`.
    pub fn builder(method: HttpMethod, endpoint: impl Into<String>) -> RequestSpecBuilder {
        RequestSpecBuilder::new(method, endpoint)
    }

    pub fn get(endpoint: impl Into<String>) -> RequestSpecBuilder {
        Self::builder(HttpMethod::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> RequestSpecBuilder {
        Self::builder(HttpMethod::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> RequestSpecBuilder {
        Self::builder(HttpMethod::Put, endpoint)
    }

    pub fn patch(endpoint: impl Into<String>) -> RequestSpecBuilder {
        Self::builder(HttpMethod::Patch, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> RequestSpecBuilder {
        Self::builder(HttpMethod::Delete, endpoint)
    }

    /// Overwrite timeout, compression and retry settings with configured defaults.
    pub fn with_defaults(mut self, defaults: &RequestDefaults) -> Self {
        self.timeout_per_attempt = defaults.timeout_per_attempt();
        self.enable_compression = defaults.enable_compression;
        self.retry_policy = defaults.retry;
        self
    }
}

/// Fluent builder for [`RequestSpec`]
#[derive(Debug, Clone)]
#[must_use]
pub struct RequestSpecBuilder {
    spec: RequestSpec,
}

impl RequestSpecBuilder {
    fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self { spec: RequestSpec { endpoint: Some(endpoint.into()), method, ..Default::default() } }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.headers.push((name.into(), value.into()));
        self
    }

    pub fn authentication(mut self, directive: AuthenticationDirective) -> Self {
        self.spec.authentication = Some(directive);
        self
    }

    pub fn bearer(self, token: impl Into<String>) -> Self {
        self.authentication(AuthenticationDirective::bearer(token))
    }

    pub fn basic(self, encoded: impl Into<String>) -> Self {
        self.authentication(AuthenticationDirective::basic(encoded))
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.spec.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body and set the content type.
    ///
    /// # Errors
    /// Returns `CourierError::InvalidInput` if serialization fails.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| CourierError::InvalidInput(format!("Failed to serialize body: {e}")))?;
        Ok(self.header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE).body(bytes))
    }

    pub fn enable_compression(mut self, enabled: bool) -> Self {
        self.spec.enable_compression = enabled;
        self
    }

    pub fn timeout_per_attempt(mut self, timeout: Duration) -> Self {
        self.spec.timeout_per_attempt = timeout;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.spec.retry_policy = policy;
        self
    }

    pub fn defaults(mut self, defaults: &RequestDefaults) -> Self {
        self.spec = self.spec.with_defaults(defaults);
        self
    }

    pub fn build(self) -> RequestSpec {
        self.spec
    }
}
