//! Configuration structures
//!
//! Every field has a default so partial TOML/JSON files are accepted.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENABLE_COMPRESSION, DEFAULT_TIMEOUT_PER_ATTEMPT_SECS};
use crate::impl_domain_enum_conversions;
use crate::types::RetryPolicy;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    pub transport: TransportConfig,
    pub defaults: RequestDefaults,
    pub logging: LoggingConfig,
}

/// Settings shared by both pooled transports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub pool_idle_timeout_secs: u64,
    pub pool_max_idle_per_host: usize,
    /// Sent on every request unless the request sets the same header.
    pub default_headers: BTreeMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("courier/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: 10,
            pool_idle_timeout_secs: 90,
            pool_max_idle_per_host: 8,
            default_headers: BTreeMap::new(),
        }
    }
}

impl TransportConfig {
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub const fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }
}

/// Per-request defaults applied through `RequestSpec::with_defaults`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    pub timeout_per_attempt_secs: u64,
    pub enable_compression: bool,
    pub retry: RetryPolicy,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            timeout_per_attempt_secs: DEFAULT_TIMEOUT_PER_ATTEMPT_SECS,
            enable_compression: DEFAULT_ENABLE_COMPRESSION,
            retry: RetryPolicy::default(),
        }
    }
}

impl RequestDefaults {
    pub const fn timeout_per_attempt(&self) -> Duration {
        Duration::from_secs(self.timeout_per_attempt_secs)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl_domain_enum_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `courier_core=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Pretty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config: CourierConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CourierConfig::default());
        assert_eq!(config.defaults.timeout_per_attempt(), Duration::from_secs(15));
        assert!(config.transport.user_agent.starts_with("courier/"));
        assert!(config.transport.default_headers.is_empty());
    }

    #[test]
    fn test_default_headers_from_table() {
        let config: CourierConfig = serde_json::from_str(
            r#"{"transport": {"default_headers": {"X-Api-Version": "2", "X-Tenant": "acme"}}}"#,
        )
        .unwrap();
        assert_eq!(config.transport.default_headers.len(), 2);
        assert_eq!(config.transport.default_headers["X-Tenant"], "acme");
        assert_eq!(config.transport.pool_max_idle_per_host, 8);
    }

    #[test]
    fn test_log_format_names() {
        let logging: LoggingConfig =
            serde_json::from_str(r#"{"level": "debug", "format": "json"}"#).unwrap();
        assert_eq!(logging.format, LogFormat::Json);
        assert_eq!(logging.level, "debug");
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
