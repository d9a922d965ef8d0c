//! Remote lookups, per-cycle caching, and namespace resolution
//!
//! This module turns [`MetricRequest`](crate::metrics::MetricRequest)s into
//! [`MetricRecord`](crate::metrics::MetricRecord)s by querying a [`Source`].
//!
//! # Implementation Model
//!
//! The [`Collector`] drives one collection cycle. For each request it:
//! - **Classifies** the namespace into a repository counter, an issue-label count, or an
//!   account counter; anything else is an [`CollectError::UnsupportedNamespace`]
//! - **Resolves wildcards** through the [`IdentityResolver`]: a wildcard owner becomes the
//!   authenticated caller (or the pinned user), a wildcard repository becomes every repository
//!   the owner has (or the pinned repository)
//! - **Fetches or reuses** entity data through the [`EntityCache`], so each account,
//!   repository and label set is requested at most once per cycle
//! - **Extracts** counters with [`repository_stats`], [`account_stats`] and
//!   [`issue_labels::aggregate`], substituting zero for counters the source did not report
//!
//! [`GitHubSource`] is the production [`Source`]. Any remote failure aborts the cycle with
//! [`CollectError::RemoteLookup`].

mod cache;
mod collector;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod github;
mod identity;
pub mod issue_labels;
pub mod slug;
mod source;
mod stats;

pub use cache::{EntityCache, Login, RepoKey};
pub use collector::Collector;
pub use error::CollectError;
pub use github::{DEFAULT_API_URL, GitHubSource};
pub use identity::IdentityResolver;
pub use issue_labels::{LabelCounts, LabelStatKey, NO_LABEL};
pub use source::{AccountKind, Identity, Issue, IssueState, Label, OrganizationDetail, Plan, Repository, Source};
pub use stats::{StatMapping, account_stats, fetch_account_stats, repository_stats};
