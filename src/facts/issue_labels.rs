//! Per-label issue counts for one repository

use super::slug;
use super::source::{Issue, IssueState, Label};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Bucket for issues that carry no label.
pub const NO_LABEL: &str = "NoLabel";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelStatKey {
    pub label: String,
    pub state: IssueState,
}

/// Open and closed issue counts for every label of a repository, plus [`NO_LABEL`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCounts(BTreeMap<LabelStatKey, i64>);

impl LabelCounts {
    #[must_use]
    pub fn get(&self, label: &str, state: IssueState) -> Option<i64> {
        self.0
            .get(&LabelStatKey {
                label: label.to_owned(),
                state,
            })
            .copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All counters, sorted by label then state.
    pub fn iter(&self) -> impl Iterator<Item = (&LabelStatKey, i64)> + '_ {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    fn register(&mut self, label: &str) {
        for state in IssueState::iter() {
            let _ = self.0.entry(LabelStatKey {
                label: label.to_owned(),
                state,
            })
            .or_insert(0);
        }
    }

    fn increment(&mut self, label: &str, state: IssueState) {
        self.register(label);
        if let Some(count) = self.0.get_mut(&LabelStatKey {
            label: label.to_owned(),
            state,
        }) {
            *count += 1;
        }
    }
}

/// Count issues per slugged label and state.
///
/// Every known label gets an open and a closed counter even when no issue carries it.
/// Unlabeled issues count toward [`NO_LABEL`]; a labeled issue counts once for each of its labels.
/// A label carried by an issue but missing from `labels` gets its own counters.
#[must_use]
pub fn aggregate(labels: &[Label], issues: &[Issue]) -> LabelCounts {
    let mut counts = LabelCounts::default();
    for label in labels {
        counts.register(&slug::make(&label.name));
    }
    counts.register(NO_LABEL);

    for issue in issues.iter().filter(|issue| !issue.is_pull_request()) {
        if issue.labels.is_empty() {
            counts.increment(NO_LABEL, issue.state);
        } else {
            for label in &issue.labels {
                counts.increment(&slug::make(&label.name), issue.state);
            }
        }
    }

    counts
}
