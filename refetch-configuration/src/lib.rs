#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Policy document model and resolution.
///
/// Defines [`PolicyDocument`] (a `default` section plus named
/// per-operation overrides), the partial `*Override` mirrors, and
/// [`Policies`], the validated result of resolving a document.
pub mod document;

/// Error types for policy document loading and resolution.
pub mod error;

pub use document::{
    FreshnessOverride, Policies, PolicyDocument, PolicyOverride, RetryOverride, TriggersOverride,
};
pub use error::ConfigError;
