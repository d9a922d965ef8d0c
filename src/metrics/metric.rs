use super::namespace::{Namespace, Segment};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A resolved metric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricRecord {
    pub namespace: Namespace,
    pub value: i64,
    pub timestamp: DateTime<Utc>,
    pub version: u32,
}

/// Builds [`MetricRecord`]s that all carry the timestamp of one collection cycle.
#[derive(Debug, Clone, Copy)]
pub struct MetricEmitter {
    timestamp: DateTime<Utc>,
}

impl MetricEmitter {
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Build a record whose namespace is the prefix followed by `dynamic`.
    pub fn emit<'a>(&self, dynamic: impl IntoIterator<Item = &'a str>, value: i64, version: u32) -> MetricRecord {
        MetricRecord {
            namespace: Namespace::new(dynamic.into_iter().map(|s| Segment::Literal(s.to_owned()))),
            value,
            timestamp: self.timestamp,
            version,
        }
    }
}
