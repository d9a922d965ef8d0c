use super::CollectError;
use super::cache::EntityCache;
use super::identity::IdentityResolver;
use super::issue_labels::aggregate;
use super::slug;
use super::source::{Repository, Source};
use super::stats::{fetch_account_stats, repository_stats};
use crate::config::Config;
use crate::metrics::{COUNT, Family, ISSUES_BY_LABEL, MetricEmitter, MetricRecord, MetricRequest, RequestShape, Segment};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

const LOG_TARGET: &str = " collector";

/// Resolves batches of metric requests against a [`Source`].
///
/// A collector lives for one collection cycle: every remote entity is fetched at most once, and
/// every record it emits carries the same timestamp.
pub struct Collector<'a, S> {
    source: &'a S,
    pinned_repo: Option<String>,
    emitter: MetricEmitter,
    identity: IdentityResolver,
    cache: EntityCache,
}

impl<S> core::fmt::Debug for Collector<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collector")
            .field("pinned_repo", &self.pinned_repo)
            .field("emitter", &self.emitter)
            .field("identity", &self.identity)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<'a, S: Source> Collector<'a, S> {
    #[must_use]
    pub fn new(source: &'a S, config: &Config, now: DateTime<Utc>) -> Self {
        Self {
            source,
            pinned_repo: config.pinned_repo().map(str::to_owned),
            emitter: MetricEmitter::new(now),
            identity: IdentityResolver::new(config.pinned_user()),
            cache: EntityCache::new(),
        }
    }

    /// Resolve `requests` in order.
    ///
    /// Wildcard requests expand to one record per matching entity. The first failure aborts the
    /// whole batch.
    pub async fn collect(&mut self, requests: &[MetricRequest]) -> Result<Vec<MetricRecord>, CollectError> {
        log::info!(target: LOG_TARGET, "Collecting {} metric request(s)", requests.len());

        let mut records = Vec::with_capacity(requests.len());
        for request in requests {
            log::debug!(target: LOG_TARGET, "Resolving '{}'", request.namespace);

            match RequestShape::classify(&request.namespace)? {
                RequestShape::RepoCounter { owner, repo, stat, key } => {
                    self.repo_counter(owner, repo, stat, key, request.version, &mut records).await?;
                }
                RequestShape::IssuesByLabel { owner, repo } => {
                    self.issues_by_label(owner, repo, request.version, &mut records).await?;
                }
                RequestShape::UserCounter { user, stat, key } => {
                    self.user_counter(user, stat, key, request.version, &mut records).await?;
                }
            }
        }

        log::info!(target: LOG_TARGET, "Collected {} metric(s)", records.len());
        Ok(records)
    }

    async fn repo_counter(
        &mut self,
        owner: &Segment,
        repo: &Segment,
        stat: &str,
        key: &'static str,
        version: u32,
        out: &mut Vec<MetricRecord>,
    ) -> Result<(), CollectError> {
        let owner = self.resolve_owner(owner).await?;
        let source = self.source;

        for name in self.resolve_repositories(&owner, repo).await? {
            let repo_slug = slug::make(&name);
            let (owner_ref, name_ref) = (&owner, &name);

            let stats = self
                .cache
                .repo_stats(&owner, &repo_slug, move || async move {
                    let repo = source
                        .repository(owner_ref, name_ref)
                        .await
                        .map_err(CollectError::remote(format!("fetch repository '{owner_ref}/{name_ref}'")))?;
                    Ok::<_, CollectError>(repository_stats(&repo))
                })
                .await?;

            out.push(
                self.emitter
                    .emit([Family::Repo.as_str(), owner.as_str(), repo_slug.as_str(), stat], stats.get_or_zero(key), version),
            );
        }

        Ok(())
    }

    async fn issues_by_label(
        &mut self,
        owner: &Segment,
        repo: &Segment,
        version: u32,
        out: &mut Vec<MetricRecord>,
    ) -> Result<(), CollectError> {
        let owner = self.resolve_owner(owner).await?;
        let source = self.source;

        for name in self.resolve_repositories(&owner, repo).await? {
            let repo_slug = slug::make(&name);
            let (owner_ref, name_ref) = (&owner, &name);

            let counts = self
                .cache
                .label_counts(&owner, &repo_slug, move || async move {
                    let (labels, issues) = source
                        .labels_and_issues(owner_ref, name_ref)
                        .await
                        .map_err(CollectError::remote(format!("fetch labels and issues of '{owner_ref}/{name_ref}'")))?;
                    Ok::<_, CollectError>(aggregate(&labels, &issues))
                })
                .await?;

            for (label_key, value) in counts.iter() {
                out.push(self.emitter.emit(
                    [
                        Family::Repo.as_str(),
                        owner.as_str(),
                        repo_slug.as_str(),
                        ISSUES_BY_LABEL,
                        label_key.label.as_str(),
                        label_key.state.as_str(),
                        COUNT,
                    ],
                    value,
                    version,
                ));
            }
        }

        Ok(())
    }

    async fn user_counter(
        &mut self,
        user: &Segment,
        stat: &str,
        key: &'static str,
        version: u32,
        out: &mut Vec<MetricRecord>,
    ) -> Result<(), CollectError> {
        let login = self.resolve_owner(user).await?;
        let source = self.source;
        let login_ref = &login;

        let stats = self
            .cache
            .user_stats(&login, move || async move {
                let identity = source
                    .identity(login_ref)
                    .await
                    .map_err(CollectError::remote(format!("fetch account '{login_ref}'")))?;
                fetch_account_stats(source, &identity).await
            })
            .await?;

        out.push(self.emitter.emit([Family::User.as_str(), login.as_str(), stat], stats.get_or_zero(key), version));
        Ok(())
    }

    async fn resolve_owner(&mut self, owner: &Segment) -> Result<String, CollectError> {
        match owner {
            Segment::Literal(login) => Ok(login.clone()),
            Segment::Wildcard => self.identity.resolve_self(self.source, &mut self.cache).await,
        }
    }

    /// Names of the repositories a repository segment stands for, in listing order.
    ///
    /// Listed repositories whose names slug to the same segment are collapsed into the first one.
    async fn resolve_repositories(&mut self, owner: &str, repo: &Segment) -> Result<Vec<String>, CollectError> {
        if let Segment::Literal(name) = repo {
            return Ok(vec![name.clone()]);
        }

        if let Some(pinned) = &self.pinned_repo {
            return Ok(vec![pinned.clone()]);
        }

        let listed: &[Repository] = self.identity.resolve_owned_repositories(self.source, owner).await?;
        let mut seen = HashSet::with_capacity(listed.len());
        let mut names = Vec::with_capacity(listed.len());
        for repo in listed {
            let repo_slug = slug::make(&repo.name);
            if seen.contains(&repo_slug) {
                log::warn!(target: LOG_TARGET, "Skipping '{owner}/{}': its namespace segment '{repo_slug}' is already taken", repo.name);
                continue;
            }

            let _ = self.cache.prime_repo(owner, &repo_slug, repository_stats(repo));
            let _ = seen.insert(repo_slug);
            names.push(repo.name.clone());
        }

        Ok(names)
    }
}
