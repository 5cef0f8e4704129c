//! The aggregate fetch policy and its builder.

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::freshness::FreshnessPolicy;
use crate::retry::RetryPolicy;
use crate::trigger::RefetchTriggers;

/// Process-wide fetch policy consumed by a request-caching engine.
///
/// Covers the four behaviors an engine parameterizes per request: query
/// retries, mutation retries, freshness/retention windows, and refetch
/// triggers. Construct it once at startup and share it by reference (or
/// `Arc`) for the process lifetime; every field is a plain immutable value.
///
/// # Example
///
/// ```
/// use refetch::{FetchPolicy, RetryLimit, RetryPolicy, Backoff};
/// use std::time::Duration;
///
/// let policy = FetchPolicy::builder()
///     .mutation(RetryPolicy {
///         limit: RetryLimit::new_saturating(5),
///         backoff: Backoff::fixed(Duration::from_secs(2)),
///     })
///     .build();
///
/// assert_eq!(policy.query.limit.get(), 3); // unset fields keep defaults
/// policy.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchPolicy {
    /// Retry behavior for read-style requests.
    pub query: RetryPolicy,
    /// Retry behavior for write-style requests.
    pub mutation: RetryPolicy,
    /// Freshness and retention windows for fetched data.
    pub freshness: FreshnessPolicy,
    /// Environmental refetch triggers.
    pub triggers: RefetchTriggers,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            query: RetryPolicy::query_default(),
            mutation: RetryPolicy::mutation_default(),
            freshness: FreshnessPolicy::default(),
            triggers: RefetchTriggers::default(),
        }
    }
}

impl FetchPolicy {
    /// Create a new builder for FetchPolicy.
    pub fn builder() -> FetchPolicyBuilder {
        FetchPolicyBuilder::new()
    }

    /// Checks the structural invariants: both backoff curves must be
    /// well-formed and the retention window must exceed the freshness
    /// window.
    ///
    /// The built-in defaults always pass.
    pub fn validate(&self) -> Result<(), PolicyError> {
        self.query.backoff.validate()?;
        self.mutation.backoff.validate()?;
        if !self.freshness.is_consistent() {
            return Err(PolicyError::RetentionWithinFreshness {
                fresh_for: self.freshness.fresh_for,
                retain_for: self.freshness.retain_for,
            });
        }
        Ok(())
    }
}

/// Builder for [`FetchPolicy`].
#[derive(Debug, Clone, Default)]
pub struct FetchPolicyBuilder {
    query: Option<RetryPolicy>,
    mutation: Option<RetryPolicy>,
    freshness: Option<FreshnessPolicy>,
    triggers: Option<RefetchTriggers>,
}

impl FetchPolicyBuilder {
    /// Create a new builder with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query retry policy.
    pub fn query(self, policy: RetryPolicy) -> Self {
        Self {
            query: Some(policy),
            ..self
        }
    }

    /// Set the mutation retry policy.
    pub fn mutation(self, policy: RetryPolicy) -> Self {
        Self {
            mutation: Some(policy),
            ..self
        }
    }

    /// Set the freshness policy.
    pub fn freshness(self, policy: FreshnessPolicy) -> Self {
        Self {
            freshness: Some(policy),
            ..self
        }
    }

    /// Set the refetch triggers.
    pub fn triggers(self, triggers: RefetchTriggers) -> Self {
        Self {
            triggers: Some(triggers),
            ..self
        }
    }

    /// Build the FetchPolicy, using defaults for any unset fields.
    pub fn build(self) -> FetchPolicy {
        FetchPolicy {
            query: self.query.unwrap_or_else(RetryPolicy::query_default),
            mutation: self.mutation.unwrap_or_else(RetryPolicy::mutation_default),
            freshness: self.freshness.unwrap_or_default(),
            triggers: self.triggers.unwrap_or_default(),
        }
    }
}
