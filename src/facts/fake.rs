//! In-memory [`Source`] for unit tests

use super::source::{Identity, Issue, Label, OrganizationDetail, Repository, Source};
use crate::Result;
use ohno::app_err;
use std::collections::HashMap;
use std::sync::Mutex;

/// Number of calls made to each [`Source`] operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub authenticated_identity: usize,
    pub identity: usize,
    pub organization_detail: usize,
    pub owned_repositories: usize,
    pub repository: usize,
    pub labels_and_issues: usize,
}

impl CallCounts {
    pub const fn total(&self) -> usize {
        self.authenticated_identity
            + self.identity
            + self.organization_detail
            + self.owned_repositories
            + self.repository
            + self.labels_and_issues
    }
}

/// Answers lookups from canned data; anything not registered fails.
#[derive(Debug, Default)]
pub struct FakeSource {
    me: Option<Identity>,
    identities: HashMap<String, Identity>,
    org_details: HashMap<String, OrganizationDetail>,
    repos: HashMap<String, Vec<Repository>>,
    issues: HashMap<(String, String), (Vec<Label>, Vec<Issue>)>,
    calls: Mutex<CallCounts>,
}

impl FakeSource {
    /// Set the authenticated account. It is also reachable by login.
    pub fn with_me(mut self, identity: Identity) -> Self {
        self.me = Some(identity.clone());
        self.with_identity(identity)
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        let _ = self.identities.insert(identity.login.clone(), identity);
        self
    }

    pub fn with_org_detail(mut self, login: &str, detail: OrganizationDetail) -> Self {
        let _ = self.org_details.insert(login.to_owned(), detail);
        self
    }

    pub fn with_repository(mut self, owner: &str, repo: Repository) -> Self {
        self.repos.entry(owner.to_owned()).or_default().push(repo);
        self
    }

    pub fn with_issues(mut self, owner: &str, repo: &str, labels: Vec<Label>, issues: Vec<Issue>) -> Self {
        let _ = self.issues.insert((owner.to_owned(), repo.to_owned()), (labels, issues));
        self
    }

    pub fn calls(&self) -> CallCounts {
        *self.calls.lock().unwrap()
    }

    fn record(&self, op: impl FnOnce(&mut CallCounts) -> &mut usize) {
        let mut calls = self.calls.lock().unwrap();
        *op(&mut *calls) += 1;
    }
}

impl Source for FakeSource {
    async fn authenticated_identity(&self) -> Result<Identity> {
        self.record(|c| &mut c.authenticated_identity);
        self.me.clone().ok_or_else(|| app_err!("401 Bad credentials"))
    }

    async fn identity(&self, login: &str) -> Result<Identity> {
        self.record(|c| &mut c.identity);
        self.identities
            .get(login)
            .cloned()
            .ok_or_else(|| app_err!("user '{login}' not found"))
    }

    async fn organization_detail(&self, login: &str) -> Result<OrganizationDetail> {
        self.record(|c| &mut c.organization_detail);
        self.org_details
            .get(login)
            .cloned()
            .ok_or_else(|| app_err!("organization '{login}' not found"))
    }

    async fn owned_repositories(&self, owner: &str) -> Result<Vec<Repository>> {
        self.record(|c| &mut c.owned_repositories);
        Ok(self.repos.get(owner).cloned().unwrap_or_default())
    }

    async fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        self.record(|c| &mut c.repository);
        self.repos
            .get(owner)
            .and_then(|repos| repos.iter().find(|r| r.name == name))
            .cloned()
            .ok_or_else(|| app_err!("repository '{owner}/{name}' not found"))
    }

    async fn labels_and_issues(&self, owner: &str, repo: &str) -> Result<(Vec<Label>, Vec<Issue>)> {
        self.record(|c| &mut c.labels_and_issues);
        self.issues
            .get(&(owner.to_owned(), repo.to_owned()))
            .cloned()
            .ok_or_else(|| app_err!("repository '{owner}/{repo}' not found"))
    }
}
