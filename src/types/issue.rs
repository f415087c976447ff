//! Issue domain types
//!
//! Contains the minimal issue shape the changelog needs (number, title,
//! canonical URL) and the collection that deduplicates issues across search
//! pages. Everything else the search payload carries is dropped at decode
//! time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Wrapper type for issue numbers providing type safety
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
pub struct IssueNumber(pub u64);

impl IssueNumber {
    /// Create a new issue number
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    /// Get the inner value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issue URL wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueUrl(pub String);

impl IssueUrl {
    pub fn new<T: Into<String>>(url: T) -> Self {
        Self(url.into())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssueUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One closed issue as it appears in a changelog entry.
///
/// Decoded directly from a search result item; the payload carries far more
/// fields, all of which are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: IssueNumber,
    pub title: String,
    pub html_url: IssueUrl,
}

/// Issues accumulated across search pages, keyed by issue number.
///
/// A number uniquely identifies an issue within a repository, so an issue
/// reappearing on a later page replaces the earlier entry instead of
/// inflating the count. Iteration order is ascending by number.
#[derive(Debug, Default, Clone)]
pub struct IssueCollection {
    issues: BTreeMap<IssueNumber, Issue>,
}

impl IssueCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an issue, replacing any previous entry with the same number.
    pub fn upsert(&mut self, issue: Issue) {
        self.issues.insert(issue.number, issue);
    }

    /// Number of distinct issues collected
    pub fn count(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Iterate issues in ascending issue-number order
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.values()
    }
}

impl FromIterator<Issue> for IssueCollection {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        let mut collection = Self::new();
        for issue in iter {
            collection.upsert(issue);
        }
        collection
    }
}
