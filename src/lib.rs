//! gitstats crate
//!
//! Polls the GitHub API and turns repository, account and issue-label information into a
//! flat set of timestamped metrics addressed by hierarchical namespaces.
//!
//! # Module Organization
//!
//! - [`config`]: Per-invocation configuration (access token, pinned user and repository)
//! - [`metrics`]: Namespaces, the metric catalog, and metric records
//! - [`facts`]: Remote lookups, per-cycle caching, and namespace resolution
//! - [`plugin`]: The surface exposed to a host collection framework

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod config;
pub mod facts;
pub mod metrics;
pub mod plugin;

pub use facts::CollectError;
pub use plugin::collect_metrics;
