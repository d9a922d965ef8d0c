//! Metric namespaces, the metric catalog, and metric records
//!
//! Every metric produced by this crate is addressed by a [`Namespace`]: a `/`-separated path
//! rooted at the fixed `raintank/apps/gitstats` prefix. The segment right after the prefix
//! names the metric family (`repo` or `user`); the remaining segments identify the target
//! entity and the stat.
//!
//! # Implementation Model
//!
//! A caller asks for metrics with [`MetricRequest`]s whose namespaces may contain wildcard
//! segments (`*`). [`RequestShape`] classifies a request against the templates declared in
//! `metric_def.rs`, and the collector resolves wildcards against live data. Each resolved
//! value becomes a [`MetricRecord`] built by a [`MetricEmitter`], which stamps every record
//! of one collection cycle with the same timestamp.

mod metric;
mod metric_def;
mod namespace;
mod request;

pub use metric::{MetricEmitter, MetricRecord};
pub use metric_def::{
    COUNT, Family, ISSUES_BY_LABEL, MetricTemplate, REPO_STATS, TemplateSegment, USER_STATS, metric_templates, repo_stat_key,
    user_stat_key,
};
pub use namespace::{NAMESPACE_PREFIX, Namespace, Segment, WILDCARD};
pub use request::{MetricRequest, RequestShape};
