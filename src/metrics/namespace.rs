use crate::Result;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::bail;
use serde::{Serialize, Serializer};

/// Fixed leading segments shared by every namespace this crate produces.
pub const NAMESPACE_PREFIX: [&str; 3] = ["raintank", "apps", "gitstats"];

/// Textual form of a wildcard segment.
pub const WILDCARD: &str = "*";

const SEPARATOR: char = '/';

/// One position in a [`Namespace`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A concrete value.
    Literal(String),

    /// A position that must be expanded against live data.
    Wildcard,
}

impl Segment {
    /// Returns the literal value, or `None` for a wildcard.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Wildcard => None,
        }
    }

    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        if value == WILDCARD {
            Self::Wildcard
        } else {
            Self::Literal(value.to_owned())
        }
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        if value == WILDCARD { Self::Wildcard } else { Self::Literal(value) }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Wildcard => f.write_str(WILDCARD),
        }
    }
}

/// A hierarchical metric path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    segments: Vec<Segment>,
}

impl Namespace {
    /// Build a namespace from the segments that follow [`NAMESPACE_PREFIX`].
    pub fn new<I, S>(dynamic: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        let segments = NAMESPACE_PREFIX
            .iter()
            .map(|s| Segment::Literal((*s).to_owned()))
            .chain(dynamic.into_iter().map(Into::into))
            .collect();

        Self { segments }
    }

    /// Parse a `/`-separated path.
    ///
    /// The path may be given in full (`raintank/apps/gitstats/repo/acme/widget/stars`) or
    /// relative to the prefix (`repo/acme/widget/stars`).
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim().trim_matches(SEPARATOR);
        if trimmed.is_empty() {
            bail!("empty metric namespace");
        }

        let parts: Vec<&str> = trimmed.split(SEPARATOR).collect();
        if parts.iter().any(|p| p.is_empty()) {
            bail!("metric namespace '{path}' contains an empty segment");
        }

        if parts.starts_with(&NAMESPACE_PREFIX) {
            Ok(Self {
                segments: parts.into_iter().map(Segment::from).collect(),
            })
        } else {
            Ok(Self::new(parts))
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The segments after [`NAMESPACE_PREFIX`], or `None` when the prefix does not match.
    #[must_use]
    pub fn dynamic(&self) -> Option<&[Segment]> {
        let prefix_len = NAMESPACE_PREFIX.len();
        if self.segments.len() < prefix_len {
            return None;
        }

        let (prefix, rest) = self.segments.split_at(prefix_len);
        prefix
            .iter()
            .zip(NAMESPACE_PREFIX)
            .all(|(segment, expected)| segment.as_literal() == Some(expected))
            .then_some(rest)
    }

    /// Returns `true` when no segment is a wildcard.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        !self.segments.iter().any(Segment::is_wildcard)
    }
}

impl FromStr for Namespace {
    type Err = ohno::AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
