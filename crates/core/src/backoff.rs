//! Linear backoff between retries
//!
//! The pause after failed attempt `a` is `a × delay_multiplier_seconds`.
//! Waiting is cancellable so a caller never sits out a backoff it no longer
//! wants.

use std::time::Duration;

use courier_domain::RetryPolicy;
use tokio_util::sync::CancellationToken;

/// The wait was interrupted by the cancellation token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Backoff timing derived from a [`RetryPolicy`]
#[derive(Debug, Clone, Copy)]
pub struct BackoffSchedule {
    policy: RetryPolicy,
}

impl BackoffSchedule {
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Whether another attempt is allowed after attempt `attempt` (0-based).
    pub fn has_remaining(&self, attempt: u32) -> bool {
        attempt < self.policy.retries()
    }

    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.policy.delay_after(attempt)
    }

    /// Sleep for the backoff following `attempt`, returning early on cancellation.
    ///
    /// # Errors
    /// Returns [`Cancelled`] if `cancel` fires before or during the pause.
    pub async fn wait(&self, attempt: u32, cancel: &CancellationToken) -> Result<(), Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }

        let delay = self.delay_after(attempt);
        if delay.is_zero() {
            return Ok(());
        }

        tokio::select! {
            () = cancel.cancelled() => Err(Cancelled),
            () = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[test]
    fn test_has_remaining() {
        let schedule = BackoffSchedule::new(RetryPolicy::new(2, 1));
        assert!(schedule.has_remaining(0));
        assert!(schedule.has_remaining(1));
        assert!(!schedule.has_remaining(2));

        let negative = BackoffSchedule::new(RetryPolicy::new(-1, 1));
        assert!(!negative.has_remaining(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_linear_delay() {
        let schedule = BackoffSchedule::new(RetryPolicy::new(3, 5));
        let cancel = CancellationToken::new();

        let start = Instant::now();
        schedule.wait(2, &cancel).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(11));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_retry_is_immediate() {
        let schedule = BackoffSchedule::new(RetryPolicy::new(3, 5));
        let start = Instant::now();
        schedule.wait(0, &CancellationToken::new()).await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_observes_cancellation() {
        let schedule = BackoffSchedule::new(RetryPolicy::new(3, 60));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        assert_eq!(schedule.wait(1, &cancel).await, Err(Cancelled));
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_already_cancelled_fails_even_without_delay() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let schedule = BackoffSchedule::new(RetryPolicy::new(1, 0));
        assert_eq!(schedule.wait(0, &cancel).await, Err(Cancelled));
    }
}
