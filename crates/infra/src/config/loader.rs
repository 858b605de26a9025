//! Configuration loader
//!
//! Loads Courier configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If none are set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. With no file either, built-in defaults apply
//!
//! ## Environment Variables
//! Every variable is optional; unset ones keep their default.
//! - `COURIER_USER_AGENT`: User agent sent by both transports
//! - `COURIER_CONNECT_TIMEOUT_SECS`: TCP/TLS connect timeout
//! - `COURIER_POOL_IDLE_TIMEOUT_SECS`: Idle connection lifetime
//! - `COURIER_POOL_MAX_IDLE_PER_HOST`: Idle connections kept per host
//! - `COURIER_TIMEOUT_PER_ATTEMPT_SECS`: Default per-attempt timeout
//! - `COURIER_ENABLE_COMPRESSION`: Default compression preference
//!   (true/false)
//! - `COURIER_MAX_ATTEMPTS`: Default retry count after the first attempt
//! - `COURIER_DELAY_MULTIPLIER_SECS`: Default linear backoff multiplier
//! - `COURIER_LOG_LEVEL`: `EnvFilter` directive
//! - `COURIER_LOG_FORMAT`: `pretty` or `json`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./courier.toml` or `./courier.json` (current working directory)
//! 2. `./config/courier.toml` or `./config/courier.json`
//! 3. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use courier_domain::{CourierConfig, CourierError, LogFormat, Result};

const ENV_VARS: [&str; 10] = [
    "COURIER_USER_AGENT",
    "COURIER_CONNECT_TIMEOUT_SECS",
    "COURIER_POOL_IDLE_TIMEOUT_SECS",
    "COURIER_POOL_MAX_IDLE_PER_HOST",
    "COURIER_TIMEOUT_PER_ATTEMPT_SECS",
    "COURIER_ENABLE_COMPRESSION",
    "COURIER_MAX_ATTEMPTS",
    "COURIER_DELAY_MULTIPLIER_SECS",
    "COURIER_LOG_LEVEL",
    "COURIER_LOG_FORMAT",
];
const CONFIG_FILE_NAMES: [&str; 4] =
    ["courier.toml", "courier.json", "config/courier.toml", "config/courier.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If none of the
/// variables is set, falls back to a config file, then to defaults.
///
/// # Errors
/// Returns `CourierError::Config` if:
/// - An environment variable has an invalid value
/// - A config file exists but cannot be read or parsed
pub fn load() -> Result<CourierConfig> {
    if !has_env_overrides() {
        return match probe_config_paths() {
            Some(path) => load_from_file(Some(path)),
            None => {
                tracing::info!("No configuration found, using defaults");
                Ok(CourierConfig::default())
            }
        };
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Starts from [`CourierConfig::default`] and overrides every field whose
/// variable is set. See module documentation for the complete list.
///
/// # Errors
/// Returns `CourierError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<CourierConfig> {
    let mut config = CourierConfig::default();

    if let Some(agent) = env_var("COURIER_USER_AGENT") {
        config.transport.user_agent = agent;
    }
    if let Some(secs) = env_parse("COURIER_CONNECT_TIMEOUT_SECS")? {
        config.transport.connect_timeout_secs = secs;
    }
    if let Some(secs) = env_parse("COURIER_POOL_IDLE_TIMEOUT_SECS")? {
        config.transport.pool_idle_timeout_secs = secs;
    }
    if let Some(max) = env_parse("COURIER_POOL_MAX_IDLE_PER_HOST")? {
        config.transport.pool_max_idle_per_host = max;
    }

    if let Some(secs) = env_parse("COURIER_TIMEOUT_PER_ATTEMPT_SECS")? {
        config.defaults.timeout_per_attempt_secs = secs;
    }
    config.defaults.enable_compression =
        env_bool("COURIER_ENABLE_COMPRESSION", config.defaults.enable_compression);
    if let Some(attempts) = env_parse("COURIER_MAX_ATTEMPTS")? {
        config.defaults.retry.max_attempts = attempts;
    }
    if let Some(secs) = env_parse("COURIER_DELAY_MULTIPLIER_SECS")? {
        config.defaults.retry.delay_multiplier_seconds = secs;
    }

    if let Some(level) = env_var("COURIER_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = env_var("COURIER_LOG_FORMAT") {
        config.logging.format = format.parse::<LogFormat>().map_err(CourierError::Config)?;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CourierError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<CourierConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CourierError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CourierError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CourierError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `CourierError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<CourierConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CourierError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CourierError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(CourierError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory first, then the directory of the
/// running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Whether any configuration variable is set
fn has_env_overrides() -> bool {
    ENV_VARS.iter().any(|key| env_var(key).is_some())
}

/// Non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `CourierError::Config` if the variable is set but invalid.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| CourierError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    env_var(key)
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
