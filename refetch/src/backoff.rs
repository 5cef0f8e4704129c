//! Retry delay curves.
//!
//! A [`Backoff`] maps a 0-based attempt index to the delay an engine should
//! wait before issuing that retry. Curves are pure values: nothing here
//! sleeps or schedules, the engine executing retries owns that.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Delay curve applied between retry attempts.
///
/// Tagged in serde so policy documents stay readable:
///
/// ```yaml
/// backoff:
///   type: Exponential
///   base: 1s
///   factor: 2
///   cap: 30s
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Backoff {
    /// Retry immediately, with no delay between attempts.
    None,
    /// Constant delay between attempts.
    Fixed {
        /// Delay before every retry.
        #[serde(with = "humantime_serde")]
        delay: Duration,
    },
    /// Exponentially growing delay, saturating at `cap`.
    Exponential {
        /// Delay before the first retry.
        #[serde(with = "humantime_serde")]
        base: Duration,
        /// Growth factor between consecutive attempts.
        factor: u32,
        /// Upper bound for any delay the curve yields.
        #[serde(with = "humantime_serde")]
        cap: Duration,
    },
}

impl Backoff {
    /// Exponential curve with the conventional doubling factor.
    pub const fn exponential(base: Duration, cap: Duration) -> Self {
        Self::Exponential {
            base,
            factor: 2,
            cap,
        }
    }

    /// Constant delay between attempts.
    pub const fn fixed(delay: Duration) -> Self {
        Self::Fixed { delay }
    }

    /// Delay before retry `attempt` (0-based).
    ///
    /// Pure and total: exponential growth uses saturating arithmetic, so
    /// arbitrarily large attempt indices settle at `cap` instead of
    /// overflowing.
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed { delay } => delay,
            Backoff::Exponential { base, factor, cap } => {
                let scaled =
                    millis(base).saturating_mul(u64::from(factor).saturating_pow(attempt));
                Duration::from_millis(scaled.min(millis(cap)))
            }
        }
    }

    /// Infinite sequence of delays, one per attempt index.
    ///
    /// Engines that walk attempts iterator-style can zip this against their
    /// attempt stream instead of calling [`Backoff::delay`] by index.
    pub fn schedule(&self) -> Schedule {
        Schedule {
            backoff: self.clone(),
            attempt: 0,
        }
    }

    /// Checks curve invariants: the growth factor must be at least 1 and the
    /// cap at or above the base delay. `None` and `Fixed` curves have no
    /// invariants to violate.
    pub fn validate(&self) -> Result<(), PolicyError> {
        match *self {
            Backoff::Exponential { factor, .. } if factor < 1 => {
                Err(PolicyError::DegenerateBackoffFactor { factor })
            }
            Backoff::Exponential { base, cap, .. } if cap < base => {
                Err(PolicyError::BackoffCapBelowBase { base, cap })
            }
            _ => Ok(()),
        }
    }
}

// Whole-millisecond conversion, saturating at the u64 end.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Infinite iterator over the delays of a [`Backoff`] curve.
#[derive(Debug, Clone)]
pub struct Schedule {
    backoff: Backoff,
    attempt: u32,
}

impl Iterator for Schedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        let delay = self.backoff.delay(self.attempt);
        self.attempt = self.attempt.saturating_add(1);
        Some(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doubling_curve() -> Backoff {
        Backoff::exponential(Duration::from_millis(1000), Duration::from_secs(30))
    }

    #[test]
    fn exponential_delay_follows_curve() {
        let backoff = doubling_curve();

        assert_eq!(backoff.delay(0), Duration::from_millis(1000));
        assert_eq!(backoff.delay(1), Duration::from_millis(2000));
        assert_eq!(backoff.delay(2), Duration::from_millis(4000));
        assert_eq!(backoff.delay(4), Duration::from_millis(16000));
        // 1000 * 2^5 = 32000 exceeds the 30s cap
        assert_eq!(backoff.delay(5), Duration::from_millis(30000));
        assert_eq!(backoff.delay(10), Duration::from_millis(30000));
    }

    #[test]
    fn exponential_delay_is_monotone() {
        let backoff = doubling_curve();

        for attempt in 0..64 {
            assert!(backoff.delay(attempt) <= backoff.delay(attempt + 1));
        }
    }

    #[test]
    fn exponential_delay_never_exceeds_cap() {
        let backoff = doubling_curve();
        let cap = Duration::from_secs(30);

        for attempt in [0, 1, 5, 31, 32, 63, 64, 1000, u32::MAX] {
            assert!(backoff.delay(attempt) <= cap);
        }
    }

    #[test]
    fn schedule_matches_indexed_delays() {
        let backoff = doubling_curve();
        let scheduled: Vec<_> = backoff.schedule().take(8).collect();
        let indexed: Vec<_> = (0..8).map(|attempt| backoff.delay(attempt)).collect();

        assert_eq!(scheduled, indexed);
    }

    #[test]
    fn fixed_curve_is_constant() {
        let backoff = Backoff::fixed(Duration::from_millis(1000));

        for attempt in [0, 1, 7, 100] {
            assert_eq!(backoff.delay(attempt), Duration::from_millis(1000));
        }
    }

    #[test]
    fn none_curve_yields_zero() {
        assert_eq!(Backoff::None.delay(0), Duration::ZERO);
        assert_eq!(Backoff::None.delay(42), Duration::ZERO);
    }

    #[test]
    fn validate_rejects_degenerate_curves() {
        let zero_factor = Backoff::Exponential {
            base: Duration::from_millis(100),
            factor: 0,
            cap: Duration::from_secs(1),
        };
        assert_eq!(
            zero_factor.validate(),
            Err(PolicyError::DegenerateBackoffFactor { factor: 0 })
        );

        let inverted_cap = Backoff::Exponential {
            base: Duration::from_secs(5),
            factor: 2,
            cap: Duration::from_secs(1),
        };
        assert!(matches!(
            inverted_cap.validate(),
            Err(PolicyError::BackoffCapBelowBase { .. })
        ));

        assert!(doubling_curve().validate().is_ok());
        assert!(Backoff::None.validate().is_ok());
    }
}
