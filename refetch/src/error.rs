//! Error types for policy validation.

use std::time::Duration;

use thiserror::Error;

/// Structural invariant violations in a fetch policy.
///
/// Hand-built policies are screened with
/// [`FetchPolicy::validate`](crate::FetchPolicy::validate); file-loaded
/// policies are screened by the configuration layer before they reach an
/// engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Exponential curve whose delays could shrink between attempts.
    #[error("exponential backoff factor must be at least 1, got {factor}")]
    DegenerateBackoffFactor {
        /// The offending growth factor.
        factor: u32,
    },
    /// Exponential curve whose cap undercuts its base delay.
    #[error("exponential backoff cap {cap:?} is below the base delay {base:?}")]
    BackoffCapBelowBase {
        /// Delay before the first retry.
        base: Duration,
        /// Configured upper bound.
        cap: Duration,
    },
    /// Retention window does not outlast the freshness window.
    #[error("retention window {retain_for:?} must exceed the freshness window {fresh_for:?}")]
    RetentionWithinFreshness {
        /// How long data counts as fresh.
        fresh_for: Duration,
        /// How long idle data stays cached.
        retain_for: Duration,
    },
}
