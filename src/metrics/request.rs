use super::metric_def::{COUNT, Family, ISSUES_BY_LABEL, repo_stat_key, user_stat_key};
use super::namespace::{Namespace, Segment};
use crate::Result;
use crate::facts::CollectError;
use core::str::FromStr;

/// A namespace the caller wants resolved, together with the schema version it was declared under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRequest {
    pub namespace: Namespace,
    pub version: u32,
}

impl MetricRequest {
    #[must_use]
    pub const fn new(namespace: Namespace, version: u32) -> Self {
        Self { namespace, version }
    }

    /// Parse `path` with [`Namespace::parse`].
    pub fn parse(path: &str, version: u32) -> Result<Self> {
        Ok(Self::new(Namespace::parse(path)?, version))
    }
}

/// What a request asks for, with borrowed views into its namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape<'a> {
    /// `repo/{owner}/{repo}/{stat}`
    RepoCounter {
        owner: &'a Segment,
        repo: &'a Segment,
        stat: &'a str,
        key: &'static str,
    },

    /// `repo/{owner}/{repo}/issuesbylabel/{label}/{status}/count`
    IssuesByLabel { owner: &'a Segment, repo: &'a Segment },

    /// `user/{user}/{stat}`
    UserCounter {
        user: &'a Segment,
        stat: &'a str,
        key: &'static str,
    },
}

impl<'a> RequestShape<'a> {
    /// Match a namespace against the declared metric templates.
    pub fn classify(namespace: &'a Namespace) -> Result<Self, CollectError> {
        let unsupported = |reason| CollectError::unsupported(namespace, reason);

        let dynamic = namespace
            .dynamic()
            .ok_or_else(|| unsupported("missing the raintank/apps/gitstats prefix"))?;

        let (family, rest) = dynamic.split_first().ok_or_else(|| unsupported("no metric family"))?;
        let family = family
            .as_literal()
            .and_then(|f| Family::from_str(f).ok())
            .ok_or_else(|| unsupported("unknown metric family"))?;

        match family {
            Family::Repo => match rest {
                [owner, repo, stat] => {
                    let stat = stat.as_literal().ok_or_else(|| unsupported("the stat segment cannot be a wildcard"))?;
                    if stat == ISSUES_BY_LABEL {
                        return Err(unsupported("issue label counts need label, status and count segments"));
                    }
                    let key = repo_stat_key(stat).ok_or_else(|| unsupported("unknown repository stat"))?;
                    Ok(Self::RepoCounter { owner, repo, stat, key })
                }
                [owner, repo, stat, _label, _status, count] => {
                    if stat.as_literal() != Some(ISSUES_BY_LABEL) {
                        return Err(unsupported("unknown repository stat"));
                    }
                    if count.as_literal() != Some(COUNT) {
                        return Err(unsupported("issue label counts must end with 'count'"));
                    }
                    Ok(Self::IssuesByLabel { owner, repo })
                }
                _ => Err(unsupported("wrong number of segments for a repository metric")),
            },
            Family::User => match rest {
                [user, stat] => {
                    let stat = stat.as_literal().ok_or_else(|| unsupported("the stat segment cannot be a wildcard"))?;
                    let key = user_stat_key(stat).ok_or_else(|| unsupported("unknown account stat"))?;
                    Ok(Self::UserCounter { user, stat, key })
                }
                _ => Err(unsupported("wrong number of segments for an account metric")),
            },
        }
    }
}
