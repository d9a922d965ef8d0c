//! [`Source`] backed by the GitHub REST API

use super::source::{Identity, Issue, Label, OrganizationDetail, Repository, Source};
use crate::Result;
use octocrab::{Octocrab, Page};
use ohno::IntoAppError;
use serde::Serialize;
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "    github";

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PAGE_SIZE: u8 = 100;

#[derive(Debug, Serialize)]
struct ListParams<'a> {
    per_page: u8,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
}

impl ListParams<'_> {
    const fn new() -> Self {
        Self {
            per_page: PAGE_SIZE,
            kind: None,
            state: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitHubSource {
    octocrab: Octocrab,
}

impl GitHubSource {
    /// Create a client authenticated with `token`, talking to `api_url` or [`DEFAULT_API_URL`].
    pub fn new(token: &str, api_url: Option<&str>) -> Result<Self> {
        let api_url = api_url.unwrap_or(DEFAULT_API_URL);

        let octocrab = Octocrab::builder()
            .personal_token(token)
            .base_uri(api_url)
            .into_app_err_with(|| format!("invalid GitHub API URL '{api_url}'"))?
            .build()
            .into_app_err("unable to create GitHub client")?;

        log::debug!(target: LOG_TARGET, "Using GitHub API at '{api_url}'");
        Ok(Self { octocrab })
    }

    async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<T> {
        log::debug!(target: LOG_TARGET, "GET {route}");
        Ok(self.octocrab.get::<T, _, _>(route, None::<&()>).await?)
    }

    async fn get_all<T: DeserializeOwned>(&self, route: &str, params: &ListParams<'_>) -> Result<Vec<T>> {
        log::debug!(target: LOG_TARGET, "GET {route} (all pages)");
        let first: Page<T> = self.octocrab.get(route, Some(params)).await?;
        let items = self.octocrab.all_pages(first).await?;

        log::debug!(target: LOG_TARGET, "Fetched {} item(s) from {route}", items.len());
        Ok(items)
    }
}

impl Source for GitHubSource {
    async fn authenticated_identity(&self) -> Result<Identity> {
        self.get("/user").await
    }

    async fn identity(&self, login: &str) -> Result<Identity> {
        self.get(&format!("/users/{login}")).await
    }

    async fn organization_detail(&self, login: &str) -> Result<OrganizationDetail> {
        self.get(&format!("/orgs/{login}")).await
    }

    async fn owned_repositories(&self, owner: &str) -> Result<Vec<Repository>> {
        let params = ListParams {
            kind: Some("owner"),
            ..ListParams::new()
        };
        self.get_all(&format!("/users/{owner}/repos"), &params).await
    }

    async fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        self.get(&format!("/repos/{owner}/{name}")).await
    }

    async fn labels_and_issues(&self, owner: &str, repo: &str) -> Result<(Vec<Label>, Vec<Issue>)> {
        let labels = self.get_all(&format!("/repos/{owner}/{repo}/labels"), &ListParams::new()).await?;

        let params = ListParams {
            state: Some("all"),
            ..ListParams::new()
        };
        let mut issues: Vec<Issue> = self.get_all(&format!("/repos/{owner}/{repo}/issues"), &params).await?;
        issues.retain(|issue| !issue.is_pull_request());

        Ok((labels, issues))
    }
}
