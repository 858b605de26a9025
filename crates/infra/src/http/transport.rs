use std::time::Duration;

use async_trait::async_trait;
use courier_core::{Transport, TransportError, WireRequest, WireResponse};
use courier_domain::{CourierError, HttpMethod, Result, TransportConfig};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, Method};
use tracing::debug;

use crate::errors::{classify_reqwest_error, InfraError};

/// [`Transport`] backed by one pooled `reqwest` client.
///
/// The client carries no request timeout of its own; the executor bounds
/// every attempt.
#[derive(Clone)]
pub struct ReqwestTransport {
    name: String,
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Start building a new transport.
    pub fn builder(name: impl Into<String>) -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new(name)
    }

    /// Transport with response decompression disabled.
    pub fn plain(config: &TransportConfig) -> Result<Self> {
        Self::builder(courier_domain::constants::DEFAULT_TRANSPORT_NAME)
            .from_config(config)
            .compression(false)
            .build()
    }

    /// Transport that negotiates and transparently decodes gzip, brotli and
    /// deflate responses.
    pub fn compressed(config: &TransportConfig) -> Result<Self> {
        Self::builder(courier_domain::constants::COMPRESSED_TRANSPORT_NAME)
            .from_config(config)
            .compression(true)
            .build()
    }
}

const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, request: WireRequest) -> std::result::Result<WireResponse, TransportError> {
        let WireRequest { method, url, headers, body } = request;
        debug!(transport = %self.name, %method, %url, "sending HTTP request");

        let mut builder = self.client.request(to_reqwest_method(method), url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|err| classify_reqwest_error(&err))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|err| classify_reqwest_error(&err))?;
        debug!(transport = %self.name, %status, bytes = body.len(), "received HTTP response");

        Ok(WireResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body: body.to_vec(),
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    name: String,
    compression: bool,
    connect_timeout: Option<Duration>,
    pool_idle_timeout: Option<Duration>,
    pool_max_idle_per_host: Option<usize>,
    user_agent: Option<String>,
    default_headers: Vec<(String, String)>,
}

impl ReqwestTransportBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compression: false,
            connect_timeout: None,
            pool_idle_timeout: None,
            pool_max_idle_per_host: None,
            user_agent: None,
            default_headers: Vec::new(),
        }
    }

    /// Apply user agent, connect timeout, pool settings and default headers.
    #[must_use]
    pub fn from_config(self, config: &TransportConfig) -> Self {
        config
            .default_headers
            .iter()
            .fold(self, |builder, (name, value)| builder.default_header(name, value))
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout())
            .pool_idle_timeout(config.pool_idle_timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
    }

    #[must_use]
    pub fn compression(mut self, enabled: bool) -> Self {
        self.compression = enabled;
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = Some(max);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Header sent on every request that does not set it itself.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// # Errors
    /// Returns `CourierError::Config` if a default header is not a valid
    /// HTTP header, or if the TLS backend or client cannot be initialised.
    pub fn build(self) -> Result<ReqwestTransport> {
        let mut builder = ReqwestClient::builder()
            .no_proxy()
            .gzip(self.compression)
            .brotli(self.compression)
            .deflate(self.compression);

        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        if let Some(timeout) = self.pool_idle_timeout {
            builder = builder.pool_idle_timeout(timeout);
        }

        if let Some(max) = self.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(max);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if !self.default_headers.is_empty() {
            builder = builder.default_headers(header_map(&self.default_headers)?);
        }

        let client = builder.build().map_err(InfraError::from)?;

        Ok(ReqwestTransport { name: self.name, client })
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            CourierError::Config(format!("Invalid default header name '{name}': {e}"))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            CourierError::Config(format!("Invalid value for default header '{name}': {e}"))
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
