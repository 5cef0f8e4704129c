//! Error types for policy document loading and resolution.

use refetch::PolicyError;
use thiserror::Error;

/// Error type for policy document loading and resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Document is not valid YAML or does not match the document shape.
    #[error(transparent)]
    Parse(Box<dyn std::error::Error + Send + Sync>),

    /// The resolved default policy violates a structural invariant.
    #[error("default policy is invalid")]
    InvalidDefault(#[source] PolicyError),

    /// A resolved per-operation policy violates a structural invariant.
    #[error("policy override `{operation}` is invalid")]
    InvalidOperation {
        /// Name of the offending `operations` entry.
        operation: String,
        /// The violated invariant.
        #[source]
        source: PolicyError,
    },
}
