use super::CollectError;
use super::cache::EntityCache;
use super::source::{Repository, Source};
use super::stats::fetch_account_stats;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

const LOG_TARGET: &str = "  identity";

/// Resolves wildcard owners and wildcard repositories, once per collection cycle.
#[derive(Debug, Default)]
pub struct IdentityResolver {
    pinned: Option<String>,
    resolved: Option<String>,
    owned: HashMap<String, Vec<Repository>>,
}

impl IdentityResolver {
    /// A pinned user stands in for the caller identity, so no remote lookup is ever made for it.
    #[must_use]
    pub fn new(pinned_user: Option<&str>) -> Self {
        Self {
            pinned: pinned_user.map(str::to_owned),
            ..Self::default()
        }
    }

    /// The login that a wildcard owner stands for.
    ///
    /// Without a pinned user, the first call asks the source who the caller is and stores the
    /// caller's account counters in `cache`; later calls reuse that answer.
    pub async fn resolve_self<S: Source>(&mut self, source: &S, cache: &mut EntityCache) -> Result<String, CollectError> {
        if let Some(user) = &self.pinned {
            return Ok(user.clone());
        }

        if let Some(login) = &self.resolved {
            return Ok(login.clone());
        }

        log::debug!(target: LOG_TARGET, "Resolving the authenticated user");
        let identity = source
            .authenticated_identity()
            .await
            .map_err(CollectError::remote("resolve the authenticated user"))?;

        let stats = fetch_account_stats(source, &identity).await?;
        cache.insert_user(&identity.login, stats);

        log::info!(target: LOG_TARGET, "Authenticated as '{}'", identity.login);
        self.resolved = Some(identity.login.clone());
        Ok(identity.login)
    }

    /// Repositories owned by `owner`, in listing order. The list is fetched once per owner.
    pub async fn resolve_owned_repositories<S: Source>(&mut self, source: &S, owner: &str) -> Result<&[Repository], CollectError> {
        match self.owned.entry(owner.to_owned()) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_slice()),
            Entry::Vacant(entry) => {
                log::debug!(target: LOG_TARGET, "Listing repositories owned by '{owner}'");
                let repos = source
                    .owned_repositories(owner)
                    .await
                    .map_err(CollectError::remote(format!("list repositories owned by '{owner}'")))?;

                log::debug!(target: LOG_TARGET, "'{owner}' owns {} repositories", repos.len());
                Ok(entry.insert(repos).as_slice())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::fake::FakeSource;
    use crate::facts::source::Identity;

    fn octocat() -> Identity {
        Identity {
            login: "octocat".into(),
            followers: Some(12),
            ..Identity::default()
        }
    }

    #[tokio::test]
    async fn test_resolve_self_once() {
        let source = FakeSource::default().with_me(octocat());
        let mut cache = EntityCache::new();
        let mut resolver = IdentityResolver::new(None);

        assert_eq!(resolver.resolve_self(&source, &mut cache).await.unwrap(), "octocat");
        assert_eq!(resolver.resolve_self(&source, &mut cache).await.unwrap(), "octocat");

        assert_eq!(source.calls().authenticated_identity, 1);
        assert_eq!(cache.cached_user("octocat").unwrap().get("followers"), Some(12));
    }

    #[tokio::test]
    async fn test_pinned_user_skips_lookup() {
        let source = FakeSource::default().with_me(octocat());
        let mut cache = EntityCache::new();
        let mut resolver = IdentityResolver::new(Some("acme"));

        assert_eq!(resolver.resolve_self(&source, &mut cache).await.unwrap(), "acme");
        assert_eq!(source.calls().authenticated_identity, 0);
        assert!(cache.cached_user("acme").is_none());
    }

    #[tokio::test]
    async fn test_resolve_self_failure() {
        let source = FakeSource::default();
        let mut cache = EntityCache::new();
        let mut resolver = IdentityResolver::new(None);

        let err = resolver.resolve_self(&source, &mut cache).await.unwrap_err();
        assert!(matches!(err, CollectError::RemoteLookup { .. }), "{err}");
    }

    #[tokio::test]
    async fn test_owned_repositories_listed_once_per_owner() {
        let source = FakeSource::default()
            .with_repository("acme", Repository {
                name: "widget".into(),
                ..Repository::default()
            })
            .with_repository("acme", Repository {
                name: "gizmo".into(),
                ..Repository::default()
            })
            .with_repository("octocat", Repository {
                name: "hello-world".into(),
                ..Repository::default()
            });
        let mut resolver = IdentityResolver::new(None);

        let names: Vec<_> = resolver
            .resolve_owned_repositories(&source, "acme")
            .await
            .unwrap()
            .iter()
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(names, ["widget", "gizmo"]);

        let _ = resolver.resolve_owned_repositories(&source, "acme").await.unwrap();
        let other = resolver.resolve_owned_repositories(&source, "octocat").await.unwrap();
        assert_eq!(other.len(), 1);

        assert_eq!(source.calls().owned_repositories, 2);
    }
}
