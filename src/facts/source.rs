//! Remote data source abstraction and the payloads it returns

use crate::Result;
use serde::Deserialize;
use serde::de::IgnoredAny;
use strum::{Display, EnumIter, IntoStaticStr};

/// Account kind reported by the remote API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum AccountKind {
    #[default]
    User,
    Organization,
    Bot,
    #[serde(other)]
    Other,
}

/// A user or organization account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Identity {
    pub login: String,
    #[serde(rename = "type", default)]
    pub kind: AccountKind,
    pub public_repos: Option<i64>,
    pub public_gists: Option<i64>,
    pub followers: Option<i64>,
    pub following: Option<i64>,
}

impl Identity {
    #[must_use]
    pub fn is_organization(&self) -> bool {
        self.kind == AccountKind::Organization
    }
}

/// Billing plan of an organization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Plan {
    pub private_repos: Option<i64>,
    pub seats: Option<i64>,
    pub filled_seats: Option<i64>,
}

/// Organization-only details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationDetail {
    pub private_gists: Option<i64>,
    pub total_private_repos: Option<i64>,
    pub disk_usage: Option<i64>,
    pub plan: Option<Plan>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[expect(clippy::struct_field_names, reason = "field names match GitHub API exactly")]
pub struct Repository {
    pub name: String,
    pub forks_count: Option<i64>,
    pub open_issues_count: Option<i64>,
    pub network_count: Option<i64>,
    pub stargazers_count: Option<i64>,
    pub subscribers_count: Option<i64>,
    pub watchers_count: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Issue state: open or closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Display, EnumIter, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Minimal issue info with only the fields we need
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub state: IssueState,
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Present when the issue is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<IgnoredAny>,
}

impl Issue {
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// The remote lookups needed to resolve metrics.
pub trait Source {
    /// The account the access token belongs to.
    fn authenticated_identity(&self) -> impl Future<Output = Result<Identity>> + Send;

    fn identity(&self, login: &str) -> impl Future<Output = Result<Identity>> + Send;

    fn organization_detail(&self, login: &str) -> impl Future<Output = Result<OrganizationDetail>> + Send;

    /// All repositories owned by `owner`, in listing order.
    fn owned_repositories(&self, owner: &str) -> impl Future<Output = Result<Vec<Repository>>> + Send;

    fn repository(&self, owner: &str, name: &str) -> impl Future<Output = Result<Repository>> + Send;

    /// The full label set and issue set of one repository. Pull requests are not included.
    fn labels_and_issues(&self, owner: &str, repo: &str) -> impl Future<Output = Result<(Vec<Label>, Vec<Issue>)>> + Send;
}
