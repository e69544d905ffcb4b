//! Opt-in bounded retry for calls that never reached the server.

use rand::Rng;
use std::time::Duration;

use crate::traits::{HttpError, Method};

/// Retry policy applied to transport failures.
///
/// Disabled by default (`max_retries == 0`). When enabled, only GET and HEAD
/// requests that received no response at all are retried, and only when the
/// failure is transient; any HTTP status, including 5xx, is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Upper bound for any single delay, before jitter
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Set the number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the delay cap.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Whether a request with `method` that failed with `error` on its
    /// `attempt`-th try (zero-based) may be sent again.
    pub fn should_retry(&self, method: Method, error: &HttpError, attempt: u32) -> bool {
        method.is_idempotent_read() && error.is_transient() && attempt < self.max_retries
    }

    /// Delay before retry number `retry` (one-based): exponential from
    /// `base_delay`, capped at `max_delay`, plus up to 10% jitter.
    pub fn delay_for(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }

        let base_ms = self.base_delay.as_millis() as u64;
        let max_ms = self.max_delay.as_millis() as u64;
        let factor = 2u64.saturating_pow(retry - 1);
        let capped = base_ms.saturating_mul(factor).min(max_ms);

        let jitter_range = capped / 10;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        Duration::from_millis(capped + jitter)
    }
}
