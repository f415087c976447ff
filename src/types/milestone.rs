//! Milestone domain types
//!
//! A milestone is identified by a numeric id but the issue search endpoint
//! matches on its title, so both representations appear here. The full
//! `Milestone` record is decoded straight from the REST payload and is also
//! used for the diagnostic listing when a lookup fails.

use serde::{Deserialize, Serialize};

/// Wrapper type for milestone numbers providing type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MilestoneNumber(pub u64);

impl MilestoneNumber {
    /// Create a new milestone number
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    /// Get the inner value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MilestoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milestone title wrapper for type safety
///
/// The search endpoint matches milestones by title, not by number, so the
/// title is the only milestone field flowing into the query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MilestoneTitle(pub String);

impl MilestoneTitle {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self(title.into())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MilestoneTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A repository milestone as returned by the REST API.
///
/// The payload identifies milestones by a `number` field; the description
/// may be null for milestones created without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(rename = "number")]
    pub id: MilestoneNumber,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}
