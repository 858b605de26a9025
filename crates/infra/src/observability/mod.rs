//! Tracing subscriber setup
//!
//! The filter is taken from `COURIER_LOG`, then `RUST_LOG`, then the
//! configured level. Output is either human-readable or one JSON object per
//! event.

use courier_domain::{CourierError, LogFormat, LoggingConfig, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Environment variable that overrides the configured filter
pub const LOG_ENV_VAR: &str = "COURIER_LOG";

/// Resolve the `EnvFilter` for `config`.
///
/// # Errors
/// Returns `CourierError::Config` if the selected directive does not parse.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let (source, directive) = match std::env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.trim().is_empty() => (LOG_ENV_VAR, directive),
        _ => match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(directive) if !directive.trim().is_empty() => (EnvFilter::DEFAULT_ENV, directive),
            _ => ("logging.level", config.level.clone()),
        },
    };

    EnvFilter::try_new(&directive).map_err(|e| {
        CourierError::Config(format!("Invalid log filter '{directive}' from {source}: {e}"))
    })
}

/// Install the global tracing subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already installed, so
/// calling this more than once is harmless.
///
/// # Errors
/// Returns `CourierError::Config` if the filter directive is invalid.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = env_filter(config)?;

    let installed = match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_filter(filter))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_current_span(true).with_filter(filter))
            .try_init(),
    };

    Ok(installed.is_ok())
}
