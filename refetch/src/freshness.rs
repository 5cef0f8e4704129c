//! Freshness and retention windows.
//!
//! Fetched data moves through three time-based states:
//!
//! - [`Freshness::Fresh`] - within the freshness window, servable as-is
//! - [`Freshness::Stale`] - past the freshness window, still servable but
//!   eligible for background refresh
//! - [`Freshness::Evictable`] - past the retention window, an unobserved
//!   entry should be dropped from cache
//!
//! [`FreshnessPolicy`] owns the two windows and classifies entries either
//! relatively (by age) or absolutely (by stamping deadlines at fetch time
//! and comparing against a clock instant later). The store that acts on the
//! classification is the engine's concern.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_FRESH_FOR: Duration = Duration::from_secs(300);
const DEFAULT_RETAIN_FOR: Duration = Duration::from_secs(600);

/// Time-based classification of a cached entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Freshness {
    /// Within the freshness window; servable as-is.
    Fresh,
    /// Past the freshness window; servable, eligible for background refresh.
    Stale,
    /// Past the retention window; unobserved entries should be evicted.
    Evictable,
}

/// Freshness and retention windows for fetched data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreshnessPolicy {
    /// How long fetched data counts as fresh (e.g. "5m", "30s").
    #[serde(with = "humantime_serde")]
    pub fresh_for: Duration,
    /// How long unobserved data stays cached before eviction.
    #[serde(with = "humantime_serde")]
    pub retain_for: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            fresh_for: DEFAULT_FRESH_FOR,
            retain_for: DEFAULT_RETAIN_FOR,
        }
    }
}

impl FreshnessPolicy {
    /// Classifies an entry by its age.
    ///
    /// Boundaries are half-open: an entry exactly `fresh_for` old is already
    /// stale, one exactly `retain_for` old is already evictable.
    pub fn classify(&self, age: Duration) -> Freshness {
        if age < self.fresh_for {
            Freshness::Fresh
        } else if age < self.retain_for {
            Freshness::Stale
        } else {
            Freshness::Evictable
        }
    }

    /// Absolute deadlines for an entry fetched at `fetched_at`.
    pub fn deadlines(&self, fetched_at: DateTime<Utc>) -> FreshnessDeadlines {
        FreshnessDeadlines {
            stale_at: fetched_at + self.fresh_for,
            evict_at: fetched_at + self.retain_for,
        }
    }

    /// Whether the retention window outlasts the freshness window.
    ///
    /// [`FetchPolicy::validate`](crate::FetchPolicy::validate) turns a
    /// violation into a [`PolicyError`](crate::PolicyError).
    pub fn is_consistent(&self) -> bool {
        self.retain_for > self.fresh_for
    }
}

/// Absolute staleness and eviction deadlines derived from a fetch timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessDeadlines {
    /// Instant the entry becomes stale.
    pub stale_at: DateTime<Utc>,
    /// Instant an unobserved entry becomes evictable.
    pub evict_at: DateTime<Utc>,
}

impl FreshnessDeadlines {
    /// Classifies the entry at the clock instant `now`.
    pub fn classify_at(&self, now: DateTime<Utc>) -> Freshness {
        if now < self.stale_at {
            Freshness::Fresh
        } else if now < self.evict_at {
            Freshness::Stale
        } else {
            Freshness::Evictable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_windows() {
        let policy = FreshnessPolicy::default();

        assert_eq!(policy.fresh_for, Duration::from_millis(300_000));
        assert_eq!(policy.retain_for, Duration::from_millis(600_000));
        assert!(policy.is_consistent());
    }

    #[test]
    fn classify_boundaries() {
        let policy = FreshnessPolicy::default();

        assert_eq!(policy.classify(Duration::ZERO), Freshness::Fresh);
        assert_eq!(policy.classify(Duration::from_secs(299)), Freshness::Fresh);
        assert_eq!(policy.classify(Duration::from_secs(300)), Freshness::Stale);
        assert_eq!(policy.classify(Duration::from_secs(599)), Freshness::Stale);
        assert_eq!(
            policy.classify(Duration::from_secs(600)),
            Freshness::Evictable
        );
        assert_eq!(
            policy.classify(Duration::from_secs(3600)),
            Freshness::Evictable
        );
    }

    #[test]
    fn deadlines_stamp_both_windows() {
        let policy = FreshnessPolicy::default();
        let fetched_at = DateTime::UNIX_EPOCH;

        let deadlines = policy.deadlines(fetched_at);

        assert_eq!(deadlines.stale_at, fetched_at + Duration::from_secs(300));
        assert_eq!(deadlines.evict_at, fetched_at + Duration::from_secs(600));
    }

    #[test]
    fn classify_at_agrees_with_classify() {
        let policy = FreshnessPolicy::default();
        let fetched_at = DateTime::UNIX_EPOCH;
        let deadlines = policy.deadlines(fetched_at);

        for seconds in [0u64, 299, 300, 599, 600, 86_400] {
            let age = Duration::from_secs(seconds);
            assert_eq!(deadlines.classify_at(fetched_at + age), policy.classify(age));
        }
    }

    #[test]
    fn inverted_windows_are_inconsistent() {
        let policy = FreshnessPolicy {
            fresh_for: Duration::from_secs(600),
            retain_for: Duration::from_secs(300),
        };
        assert!(!policy.is_consistent());

        // Equal windows leave no stale interval at all.
        let collapsed = FreshnessPolicy {
            fresh_for: Duration::from_secs(300),
            retain_for: Duration::from_secs(300),
        };
        assert!(!collapsed.is_consistent());
    }
}
