//! Retry tuning for the transport executor.
//!
//! Transport failures and 5xx responses are retried with exponential
//! backoff: the wait before retry `n` (zero-based) is `min_wait * 2^n`,
//! capped at `max_wait`. Any other non-matching status is returned to the
//! caller immediately.

use std::time::Duration;

/// Default lower bound of the backoff window.
pub const DEFAULT_RETRY_WAIT_MIN: Duration = Duration::from_millis(10);

/// Default upper bound of the backoff window.
pub const DEFAULT_RETRY_WAIT_MAX: Duration = Duration::from_millis(50);

/// Default number of attempts, the first one included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Backoff bounds and attempt limit.
///
/// Zero values fall back to the defaults, so `RetryPolicy::new(Duration::ZERO,
/// Duration::ZERO, 0)` equals `RetryPolicy::default()`.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::clients::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default()
///     .with_min_wait(Duration::from_millis(100))
///     .with_max_wait(Duration::from_millis(400))
///     .with_max_attempts(3);
///
/// assert_eq!(policy.backoff(0), Duration::from_millis(100));
/// assert_eq!(policy.backoff(1), Duration::from_millis(200));
/// assert_eq!(policy.backoff(5), Duration::from_millis(400));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    min_wait: Duration,
    max_wait: Duration,
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_wait: DEFAULT_RETRY_WAIT_MIN,
            max_wait: DEFAULT_RETRY_WAIT_MAX,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy, substituting defaults for zero values.
    #[must_use]
    pub fn new(min_wait: Duration, max_wait: Duration, max_attempts: u32) -> Self {
        Self::default()
            .with_min_wait(min_wait)
            .with_max_wait(max_wait)
            .with_max_attempts(max_attempts)
    }

    /// A policy that sends each request exactly once.
    #[must_use]
    pub fn no_retry() -> Self {
        Self::default().with_max_attempts(1)
    }

    /// Sets the first backoff interval.
    #[must_use]
    pub fn with_min_wait(mut self, wait: Duration) -> Self {
        self.min_wait = if wait.is_zero() {
            DEFAULT_RETRY_WAIT_MIN
        } else {
            wait
        };
        self
    }

    /// Sets the cap on any single backoff interval.
    #[must_use]
    pub fn with_max_wait(mut self, wait: Duration) -> Self {
        self.max_wait = if wait.is_zero() {
            DEFAULT_RETRY_WAIT_MAX
        } else {
            wait
        };
        self
    }

    /// Sets the total number of attempts.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = if attempts == 0 {
            DEFAULT_MAX_ATTEMPTS
        } else {
            attempts
        };
        self
    }

    /// Returns the first backoff interval.
    #[must_use]
    pub const fn min_wait(&self) -> Duration {
        self.min_wait
    }

    /// Returns the backoff cap.
    #[must_use]
    pub const fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Returns the total number of attempts.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the wait before retry number `retry` (zero-based).
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.min_wait
            .checked_mul(factor)
            .map_or(self.max_wait, |wait| wait.min(self.max_wait))
    }

    /// Returns `true` if a response with this status should be retried.
    #[must_use]
    pub const fn is_retryable_status(status: u16) -> bool {
        status >= 500 && status <= 599
    }
}
