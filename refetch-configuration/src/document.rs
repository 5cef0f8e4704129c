//! Policy document model.
//!
//! A policy document is YAML with a `default` section and an optional
//! `operations` map of named partial overrides:
//!
//! ```yaml
//! default:
//!   freshness:
//!     fresh_for: 5m
//!     retain_for: 10m
//! operations:
//!   generate-summary:
//!     mutation:
//!       limit: 4
//! ```
//!
//! The `default` section is applied over the built-in [`FetchPolicy`]
//! default, and each `operations` entry over the resolved default. Unset
//! fields inherit at every level.

use std::time::Duration;

use indexmap::IndexMap;
use refetch::backoff::Backoff;
use refetch::freshness::FreshnessPolicy;
use refetch::policy::FetchPolicy;
use refetch::retry::{RetryLimit, RetryPolicy};
use refetch::trigger::RefetchTriggers;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Root of a policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PolicyDocument {
    /// Overrides applied over the built-in policy to form the default.
    #[serde(default)]
    pub default: PolicyOverride,
    /// Named per-operation overrides, applied over the default policy.
    #[serde(default)]
    pub operations: IndexMap<String, PolicyOverride>,
}

impl PolicyDocument {
    /// Parses a YAML policy document.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(source).map_err(|err| ConfigError::Parse(Box::new(err)))
    }

    /// Resolves the document into validated per-operation policies.
    ///
    /// Every resolved policy is checked with
    /// [`FetchPolicy::validate`]; the first violation aborts resolution.
    pub fn into_policies(self) -> Result<Policies, ConfigError> {
        let default = self.default.apply_to(FetchPolicy::default());
        default.validate().map_err(ConfigError::InvalidDefault)?;

        let mut operations = IndexMap::with_capacity(self.operations.len());
        for (name, patch) in self.operations {
            let policy = patch.apply_to(default.clone());
            policy
                .validate()
                .map_err(|source| ConfigError::InvalidOperation {
                    operation: name.clone(),
                    source,
                })?;
            operations.insert(name, policy);
        }

        debug!(overrides = operations.len(), "resolved policy document");
        Ok(Policies {
            default,
            operations,
        })
    }
}

/// Partial policy; any unset field inherits from the policy it is applied
/// to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PolicyOverride {
    /// Read-request retry overrides.
    #[serde(default)]
    pub query: Option<RetryOverride>,
    /// Write-request retry overrides.
    #[serde(default)]
    pub mutation: Option<RetryOverride>,
    /// Freshness window overrides.
    #[serde(default)]
    pub freshness: Option<FreshnessOverride>,
    /// Refetch trigger overrides.
    #[serde(default)]
    pub triggers: Option<TriggersOverride>,
}

impl PolicyOverride {
    /// Applies this override on top of `base`.
    pub fn apply_to(&self, base: FetchPolicy) -> FetchPolicy {
        let FetchPolicy {
            query,
            mutation,
            freshness,
            triggers,
        } = base;
        FetchPolicy {
            query: apply_retry(self.query.as_ref(), query),
            mutation: apply_retry(self.mutation.as_ref(), mutation),
            freshness: apply_freshness(self.freshness.as_ref(), freshness),
            triggers: apply_triggers(self.triggers.as_ref(), triggers),
        }
    }
}

/// Partial retry policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RetryOverride {
    /// Maximum number of retries.
    #[serde(default)]
    pub limit: Option<RetryLimit>,
    /// Delay curve between attempts.
    #[serde(default)]
    pub backoff: Option<Backoff>,
}

/// Partial freshness policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FreshnessOverride {
    /// How long fetched data counts as fresh (e.g. "5m", "30s").
    #[serde(default, with = "humantime_serde")]
    pub fresh_for: Option<Duration>,
    /// How long unobserved data stays cached before eviction.
    #[serde(default, with = "humantime_serde")]
    pub retain_for: Option<Duration>,
}

/// Partial refetch triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TriggersOverride {
    /// Refetch when the client UI regains focus.
    #[serde(default)]
    pub on_focus_regain: Option<bool>,
    /// Refetch when network connectivity is restored.
    #[serde(default)]
    pub on_connectivity_restore: Option<bool>,
}

fn apply_retry(patch: Option<&RetryOverride>, base: RetryPolicy) -> RetryPolicy {
    match patch {
        Some(patch) => RetryPolicy {
            limit: patch.limit.unwrap_or(base.limit),
            backoff: patch.backoff.clone().unwrap_or(base.backoff),
        },
        None => base,
    }
}

fn apply_freshness(patch: Option<&FreshnessOverride>, base: FreshnessPolicy) -> FreshnessPolicy {
    match patch {
        Some(patch) => FreshnessPolicy {
            fresh_for: patch.fresh_for.unwrap_or(base.fresh_for),
            retain_for: patch.retain_for.unwrap_or(base.retain_for),
        },
        None => base,
    }
}

fn apply_triggers(patch: Option<&TriggersOverride>, base: RefetchTriggers) -> RefetchTriggers {
    match patch {
        Some(patch) => RefetchTriggers {
            on_focus_regain: patch.on_focus_regain.unwrap_or(base.on_focus_regain),
            on_connectivity_restore: patch
                .on_connectivity_restore
                .unwrap_or(base.on_connectivity_restore),
        },
        None => base,
    }
}

/// Validated policies resolved from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policies {
    default: FetchPolicy,
    operations: IndexMap<String, FetchPolicy>,
}

impl Policies {
    /// The policy for operations without a named override.
    pub fn default_policy(&self) -> &FetchPolicy {
        &self.default
    }

    /// Policy for a named operation, falling back to the default.
    pub fn for_operation(&self, name: &str) -> &FetchPolicy {
        self.operations.get(name).unwrap_or(&self.default)
    }

    /// Iterates named overrides in document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &FetchPolicy)> {
        self.operations
            .iter()
            .map(|(name, policy)| (name.as_str(), policy))
    }
}
