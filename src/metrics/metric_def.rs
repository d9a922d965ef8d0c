use super::namespace::{NAMESPACE_PREFIX, Namespace, Segment};
use core::fmt::{Display, Formatter};
use strum::{EnumString, IntoStaticStr};

/// Stat segment that switches a `repo` request to issue-label aggregation.
pub const ISSUES_BY_LABEL: &str = "issuesbylabel";

/// Trailing segment of every issue-label namespace.
pub const COUNT: &str = "count";

/// Metric families, named by the segment right after the namespace prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Family {
    Repo,
    User,
}

impl Family {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Repository counters, as named in namespaces.
pub static REPO_STATS: &[&str] = &["forks", "issues", "network", "stars", "subscribers", "watches", "size"];

/// Account counters, as named in namespaces.
pub static USER_STATS: &[&str] = &[
    "public_repos",
    "public_gists",
    "followers",
    "following",
    "private_repos",
    "private_gists",
    "plan_private_repos",
    "plan_seats",
    "plan_filled_seats",
    "disk_usage",
];

/// Map a requested repository stat name to the key produced by the stats extractor.
///
/// `watches` is the declared name while the extractor stores `watchers`; both are accepted.
#[must_use]
pub fn repo_stat_key(name: &str) -> Option<&'static str> {
    match name {
        "watches" | "watchers" => Some("watchers"),
        _ => REPO_STATS.iter().copied().find(|stat| *stat == name),
    }
}

/// Map a requested account stat name to the key produced by the stats extractor.
#[must_use]
pub fn user_stat_key(name: &str) -> Option<&'static str> {
    USER_STATS.iter().copied().find(|stat| *stat == name)
}

/// One element of a [`MetricTemplate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSegment {
    Static(&'static str),
    Dynamic { name: &'static str, description: &'static str },
}

const OWNER: TemplateSegment = TemplateSegment::Dynamic {
    name: "owner",
    description: "repository owner",
};

const REPO: TemplateSegment = TemplateSegment::Dynamic {
    name: "repo",
    description: "repository name",
};

const USER: TemplateSegment = TemplateSegment::Dynamic {
    name: "user",
    description: "user or organization name",
};

const LABEL: TemplateSegment = TemplateSegment::Dynamic {
    name: "label",
    description: "issue label",
};

const STATUS: TemplateSegment = TemplateSegment::Dynamic {
    name: "status",
    description: "issue status",
};

/// A declared metric namespace with named dynamic elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTemplate {
    segments: Vec<TemplateSegment>,
}

impl MetricTemplate {
    fn new(segments: impl IntoIterator<Item = TemplateSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// The segments after the namespace prefix.
    #[must_use]
    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    /// Names of the dynamic elements, in order.
    pub fn dynamic_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            TemplateSegment::Dynamic { name, .. } => Some(*name),
            TemplateSegment::Static(_) => None,
        })
    }

    /// Fill the dynamic elements with `values`, in order.
    ///
    /// Returns `None` when the number of values does not match the number of dynamic elements.
    #[must_use]
    pub fn instantiate(&self, values: &[&str]) -> Option<Namespace> {
        if values.len() != self.dynamic_names().count() {
            return None;
        }

        let mut values = values.iter();
        let segments: Vec<Segment> = self
            .segments
            .iter()
            .map(|segment| match segment {
                TemplateSegment::Static(value) => Segment::from(*value),
                TemplateSegment::Dynamic { .. } => values.next().map_or(Segment::Wildcard, |v| Segment::from(*v)),
            })
            .collect();

        Some(Namespace::new(segments))
    }
}

impl Display for MetricTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", NAMESPACE_PREFIX.join("/"))?;
        for segment in &self.segments {
            match segment {
                TemplateSegment::Static(value) => write!(f, "/{value}")?,
                TemplateSegment::Dynamic { name, .. } => write!(f, "/{{{name}}}")?,
            }
        }
        Ok(())
    }
}

/// All metric namespaces this crate can resolve.
#[must_use]
pub fn metric_templates() -> Vec<MetricTemplate> {
    let repo = TemplateSegment::Static(Family::Repo.as_str());
    let user = TemplateSegment::Static(Family::User.as_str());

    let mut templates: Vec<MetricTemplate> = REPO_STATS
        .iter()
        .map(|stat| MetricTemplate::new([repo, OWNER, REPO, TemplateSegment::Static(*stat)]))
        .collect();

    templates.push(MetricTemplate::new([
        repo,
        OWNER,
        REPO,
        TemplateSegment::Static(ISSUES_BY_LABEL),
        LABEL,
        STATUS,
        TemplateSegment::Static(COUNT),
    ]));

    templates.extend(
        USER_STATS
            .iter()
            .map(|stat| MetricTemplate::new([user, USER, TemplateSegment::Static(*stat)])),
    );

    templates
}
