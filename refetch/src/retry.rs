//! Retry policies for queries and mutations.
//!
//! A [`RetryPolicy`] pairs a bounded retry limit with a [`Backoff`] curve.
//! Engines distinguish read-style *queries* from write-style *mutations*;
//! the two built-in defaults reflect that split: queries back off
//! aggressively and retry more, mutations retry fewer times at a fixed
//! cadence.

use std::time::Duration;

use bounded_integer::bounded_integer;
use serde::{Deserialize, Serialize};

use crate::backoff::Backoff;

bounded_integer! {
    /// Maximum retry attempts for a single request (0-32).
    /// A value of 0 disables retries entirely.
    #[repr(u8)]
    pub struct RetryLimit { 0..=32 }
}

const QUERY_RETRY_LIMIT: RetryLimit = RetryLimit::new_saturating(3);
const MUTATION_RETRY_LIMIT: RetryLimit = RetryLimit::new_saturating(2);

const QUERY_BACKOFF_BASE: Duration = Duration::from_millis(1000);
const QUERY_BACKOFF_CAP: Duration = Duration::from_secs(30);
const MUTATION_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Retry behavior for one request class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt fails.
    pub limit: RetryLimit,
    /// Delay curve between attempts.
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Default policy for read-style requests: up to 3 retries with
    /// doubling backoff from 1s, capped at 30s.
    pub fn query_default() -> Self {
        Self {
            limit: QUERY_RETRY_LIMIT,
            backoff: Backoff::exponential(QUERY_BACKOFF_BASE, QUERY_BACKOFF_CAP),
        }
    }

    /// Default policy for write-style requests: up to 2 retries spaced a
    /// fixed 1s apart.
    pub fn mutation_default() -> Self {
        Self {
            limit: MUTATION_RETRY_LIMIT,
            backoff: Backoff::fixed(MUTATION_RETRY_DELAY),
        }
    }

    /// Whether another attempt is allowed after `failed_attempts` failures.
    pub fn should_retry(&self, failed_attempts: u32) -> bool {
        failed_attempts < u32::from(self.limit.get())
    }

    /// Delay before retry `attempt` (0-based), or `None` once the limit is
    /// exhausted.
    pub fn delay_before(&self, attempt: u32) -> Option<Duration> {
        self.should_retry(attempt)
            .then(|| self.backoff.delay(attempt))
    }
}
