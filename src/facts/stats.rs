//! Flattening of repository and account payloads into named counters

use super::CollectError;
use super::source::{Identity, OrganizationDetail, Repository, Source};
use std::collections::BTreeMap;

const LOG_TARGET: &str = "     stats";

/// Named integer counters extracted from one entity. Absent source fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatMapping(BTreeMap<&'static str, i64>);

impl StatMapping {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<i64> {
        self.0.get(key).copied()
    }

    /// Look up `key`, substituting zero when the source did not report it.
    #[must_use]
    pub fn get_or_zero(&self, key: &str) -> i64 {
        self.get(key).unwrap_or_else(|| {
            log::debug!(target: LOG_TARGET, "No value reported for '{key}', using 0");
            0
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    fn set(&mut self, key: &'static str, value: Option<i64>) {
        if let Some(value) = value {
            let _ = self.0.insert(key, value);
        }
    }
}

#[must_use]
pub fn repository_stats(repo: &Repository) -> StatMapping {
    let mut stats = StatMapping::default();
    stats.set("forks", repo.forks_count);
    stats.set("issues", repo.open_issues_count);
    stats.set("network", repo.network_count);
    stats.set("stars", repo.stargazers_count);
    stats.set("subscribers", repo.subscribers_count);
    stats.set("watchers", repo.watchers_count);
    stats.set("size", repo.size);
    stats
}

/// Counters for an account, including organization-only counters when `detail` is given.
#[must_use]
pub fn account_stats(identity: &Identity, detail: Option<&OrganizationDetail>) -> StatMapping {
    let mut stats = StatMapping::default();
    stats.set("public_repos", identity.public_repos);
    stats.set("public_gists", identity.public_gists);
    stats.set("followers", identity.followers);
    stats.set("following", identity.following);

    if let Some(detail) = detail {
        stats.set("private_gists", detail.private_gists);
        stats.set("private_repos", detail.total_private_repos);
        stats.set("disk_usage", detail.disk_usage);

        if let Some(plan) = &detail.plan {
            stats.set("plan_private_repos", plan.private_repos);
            stats.set("plan_seats", plan.seats);
            stats.set("plan_filled_seats", plan.filled_seats);
        }
    }

    stats
}

/// Extract the counters for `identity`, fetching organization details only when it is an organization.
pub async fn fetch_account_stats<S: Source>(source: &S, identity: &Identity) -> Result<StatMapping, CollectError> {
    if !identity.is_organization() {
        return Ok(account_stats(identity, None));
    }

    log::debug!(target: LOG_TARGET, "Fetching organization details for '{}'", identity.login);
    let detail = source
        .organization_detail(&identity.login)
        .await
        .map_err(CollectError::remote(format!("fetch organization details for '{}'", identity.login)))?;

    Ok(account_stats(identity, Some(&detail)))
}
