//! Retry policy for transport-level failures
//!
//! Backoff is linear: the pause that follows failed attempt `a` (0-based) is
//! `a × delay_multiplier_seconds`, so the first retry is immediate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DELAY_MULTIPLIER_SECS, DEFAULT_MAX_ATTEMPTS};

/// Maximum retry count and linear delay multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Non-positive values mean no retry.
    pub max_attempts: i32,
    /// Seconds multiplied by the failed attempt index to get the pause.
    pub delay_multiplier_seconds: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay_multiplier_seconds: DEFAULT_DELAY_MULTIPLIER_SECS,
        }
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: i32, delay_multiplier_seconds: u64) -> Self {
        Self { max_attempts, delay_multiplier_seconds }
    }

    /// Single attempt, no retry.
    pub const fn none() -> Self {
        Self::new(0, 0)
    }

    /// Number of retries after the first attempt, negative values clamped to zero.
    pub fn retries(&self) -> u32 {
        u32::try_from(self.max_attempts).unwrap_or(0)
    }

    /// Total attempts including the first one.
    pub fn total_attempts(&self) -> u32 {
        self.retries().saturating_add(1)
    }

    /// Pause inserted after failed attempt `attempt` (0-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        Duration::from_secs(u64::from(attempt).saturating_mul(self.delay_multiplier_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_multiplier_seconds, 5);
        assert_eq!(policy.total_attempts(), 4);
    }

    #[test]
    fn test_negative_attempts_clamp_to_zero() {
        let policy = RetryPolicy::new(-2, 5);
        assert_eq!(policy.retries(), 0);
        assert_eq!(policy.total_attempts(), 1);
    }

    #[test]
    fn test_linear_delay() {
        let policy = RetryPolicy::new(3, 5);
        assert_eq!(policy.delay_after(0), Duration::ZERO);
        assert_eq!(policy.delay_after(1), Duration::from_secs(5));
        assert_eq!(policy.delay_after(2), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_multiplier_never_waits() {
        let policy = RetryPolicy::new(5, 0);
        assert!(policy.delay_after(4).is_zero());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let policy: RetryPolicy = serde_json::from_str(r#"{"max_attempts": 1}"#).unwrap();
        assert_eq!(policy, RetryPolicy::new(1, 5));
    }
}
