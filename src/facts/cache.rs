//! Per-cycle memoization of remote entities
//!
//! Every collection cycle starts from an empty [`EntityCache`], so the values it holds are never
//! older than the cycle itself. A fetch closure runs at most once per key; failed fetches are not
//! remembered.

use super::CollectError;
use super::issue_labels::LabelCounts;
use super::stats::StatMapping;
use core::fmt::{Display, Formatter};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

const LOG_TARGET: &str = "     cache";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    #[must_use]
    pub fn new(login: impl Into<String>) -> Self {
        Self(login.into())
    }
}

impl Display for Login {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A repository, addressed by its owner and slugged name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoKey {
    pub owner: String,
    pub repo: String,
}

impl RepoKey {
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl Display for RepoKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Default)]
pub struct EntityCache {
    users: HashMap<Login, StatMapping>,
    repos: HashMap<RepoKey, StatMapping>,
    labels: HashMap<RepoKey, LabelCounts>,
}

impl EntityCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_stats<F, Fut>(&mut self, login: &str, fetch: F) -> Result<&StatMapping, CollectError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<StatMapping, CollectError>>,
    {
        get_or_fetch(&mut self.users, Login::new(login), fetch).await
    }

    pub async fn repo_stats<F, Fut>(&mut self, owner: &str, repo: &str, fetch: F) -> Result<&StatMapping, CollectError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<StatMapping, CollectError>>,
    {
        get_or_fetch(&mut self.repos, RepoKey::new(owner, repo), fetch).await
    }

    pub async fn label_counts<F, Fut>(&mut self, owner: &str, repo: &str, fetch: F) -> Result<&LabelCounts, CollectError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<LabelCounts, CollectError>>,
    {
        get_or_fetch(&mut self.labels, RepoKey::new(owner, repo), fetch).await
    }

    /// Store account counters obtained as a by-product of another lookup.
    pub fn insert_user(&mut self, login: &str, stats: StatMapping) {
        let _ = self.users.insert(Login::new(login), stats);
    }

    /// Store repository counters from a listing, keeping any entry already cached.
    ///
    /// Returns `true` when the entry was added.
    pub fn prime_repo(&mut self, owner: &str, repo: &str, stats: StatMapping) -> bool {
        match self.repos.entry(RepoKey::new(owner, repo)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                let _ = entry.insert(stats);
                true
            }
        }
    }

    #[must_use]
    pub fn cached_user(&self, login: &str) -> Option<&StatMapping> {
        self.users.get(&Login::new(login))
    }

    #[must_use]
    pub fn cached_repo(&self, owner: &str, repo: &str) -> Option<&StatMapping> {
        self.repos.get(&RepoKey::new(owner, repo))
    }
}

async fn get_or_fetch<K, V, F, Fut>(map: &mut HashMap<K, V>, key: K, fetch: F) -> Result<&V, CollectError>
where
    K: Eq + core::hash::Hash + Display,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, CollectError>>,
{
    match map.entry(key) {
        Entry::Occupied(entry) => {
            log::trace!(target: LOG_TARGET, "Cache hit for '{}'", entry.key());
            Ok(&*entry.into_mut())
        }
        Entry::Vacant(entry) => {
            log::debug!(target: LOG_TARGET, "Cache miss for '{}'", entry.key());
            let value = fetch().await?;
            Ok(&*entry.insert(value))
        }
    }
}
