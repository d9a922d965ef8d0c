//! The surface offered to a host collection framework
//!
//! A host discovers what this crate can collect through [`metric_templates`] and
//! [`config_policy`], then calls [`collect_metrics`] once per collection cycle.

use crate::config::Config;
use crate::facts::{CollectError, Collector, GitHubSource};
use crate::metrics::{MetricRecord, MetricRequest};
use chrono::Utc;

pub use crate::metrics::metric_templates;

const LOG_TARGET: &str = "    plugin";

/// Name under which the collector registers with a host.
pub const PLUGIN_NAME: &str = "rt-gitstats";

/// Schema version of the declared metrics.
pub const PLUGIN_VERSION: u32 = 1;

/// One configuration option a host must collect before calling [`collect_metrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRule {
    pub key: &'static str,
    pub required: bool,
    pub default: &'static str,
}

static CONFIG_POLICY: &[ConfigRule] = &[
    ConfigRule {
        key: "access_token",
        required: true,
        default: "",
    },
    ConfigRule {
        key: "user",
        required: false,
        default: "",
    },
    ConfigRule {
        key: "repo",
        required: false,
        default: "",
    },
];

/// The configuration options this collector accepts. All are strings.
#[must_use]
pub fn config_policy() -> &'static [ConfigRule] {
    CONFIG_POLICY
}

/// Run one collection cycle against GitHub.
///
/// The configuration is checked before any remote call; every returned record shares the
/// timestamp taken when the cycle starts.
///
/// # Errors
///
/// Returns the first error hit while resolving `requests`; no partial results are returned
pub async fn collect_metrics(requests: &[MetricRequest], config: &Config) -> Result<Vec<MetricRecord>, CollectError> {
    config.validate()?;

    let now = Utc::now();
    if requests.is_empty() {
        return Ok(Vec::new());
    }

    log::debug!(target: LOG_TARGET, "Starting collection cycle at {now}");
    let source = GitHubSource::new(config.access_token(), config.api_url())
        .map_err(|e| CollectError::Configuration(format!("{e:#}")))?;

    Collector::new(&source, config, now).collect(requests).await
}
