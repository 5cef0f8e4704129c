#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Retry delay curves.
///
/// Defines [`Backoff`] (none, fixed, exponential-with-cap) and the
/// [`Schedule`] iterator over its delays. Curves are pure values; the
/// engine executing retries owns the sleeping.
pub mod backoff;

/// Error types for policy validation.
///
/// Defines [`PolicyError`] which covers:
/// - Degenerate exponential curves (shrinking delays, cap below base)
/// - Retention windows that do not outlast the freshness window
pub mod error;

/// Freshness and retention windows.
///
/// Defines [`FreshnessPolicy`] with:
/// - **Freshness window** - how long fetched data is served as-is
/// - **Retention window** - how long unobserved data stays cached
/// - [`Freshness`] classification (fresh, stale, evictable) by age or
///   against stamped [`FreshnessDeadlines`]
pub mod freshness;

/// The aggregate fetch policy and its builder.
///
/// [`FetchPolicy`] bundles query retries, mutation retries, freshness
/// windows, and refetch triggers into the single immutable value a
/// request-caching engine consumes.
pub mod policy;

/// Retry policies for queries and mutations.
///
/// Defines [`RetryPolicy`] (bounded [`RetryLimit`] plus a backoff curve)
/// with separate built-in defaults for read-style and write-style
/// requests.
pub mod retry;

/// Environmental refetch triggers.
///
/// Defines [`RefetchTrigger`] events (focus regained, connectivity
/// restored) and the [`RefetchTriggers`] toggles an engine consults when
/// one fires.
pub mod trigger;

pub use backoff::{Backoff, Schedule};
pub use error::PolicyError;
pub use freshness::{Freshness, FreshnessDeadlines, FreshnessPolicy};
pub use policy::{FetchPolicy, FetchPolicyBuilder};
pub use retry::{RetryLimit, RetryPolicy};
pub use trigger::{RefetchTrigger, RefetchTriggers};
