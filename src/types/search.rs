//! Search query types
//!
//! Wraps the search text handed to the issue search endpoint. The only query
//! this tool ever builds is the closed-issues-in-milestone one, constructed
//! here so the clause layout lives next to the type.

use serde::{Deserialize, Serialize};

use super::{MilestoneTitle, RepositoryId};

/// Represents a search text string.
///
/// Wraps the search text for type safety. Callers URL-encode it when
/// embedding it into a request URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery(pub String);

impl SearchQuery {
    pub fn new<T: Into<String>>(query: T) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Query matching every closed issue assigned to the given milestone.
    ///
    /// The search syntax matches milestones by title, which is why the
    /// numeric milestone id has to be resolved to a title first.
    pub fn closed_issues_in_milestone(
        repository_id: &RepositoryId,
        milestone_title: &MilestoneTitle,
    ) -> Self {
        Self(format!(
            "milestone:{} repo:{} state:closed",
            milestone_title, repository_id
        ))
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
