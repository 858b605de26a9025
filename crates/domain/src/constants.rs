//! Domain constants
//!
//! Sentinel status codes and request defaults shared by every crate.

// Sentinel status codes for failures that never produced an HTTP response
pub const INTERNAL_ERROR_STATUS: u16 = 500;
pub const INTERNAL_ERROR_DESCRIPTION: &str = "Internal Server Error";
pub const TRANSPORT_FAILURE_STATUS: u16 = 400;
pub const TRANSPORT_FAILURE_DESCRIPTION: &str = "Bad Request";

// Request defaults
pub const DEFAULT_TIMEOUT_PER_ATTEMPT_SECS: u64 = 15;
pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;
pub const DEFAULT_DELAY_MULTIPLIER_SECS: u64 = 5;
pub const DEFAULT_ENABLE_COMPRESSION: bool = true;

// Transport names
pub const DEFAULT_TRANSPORT_NAME: &str = "default";
pub const COMPRESSED_TRANSPORT_NAME: &str = "compressed";

// Header names
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";
