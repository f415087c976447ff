//! Milestone resolution service
//!
//! Translates the numeric milestone id from the configuration into the
//! milestone title the issue search matches on. When the id does not exist
//! the service gathers the repository's actual milestones so the entry point
//! can show the user what ids are valid.

use serde::Deserialize;
use tracing::{info, warn};

use crate::github::{ApiError, GitHubClient};
use crate::types::{Milestone, MilestoneNumber, MilestoneTitle, RepositoryId};

/// Failure modes of a milestone lookup
#[derive(Debug, Clone, PartialEq)]
pub enum MilestoneLookupError {
    /// The milestone id is unknown to the repository. Carries the raw
    /// response for the diagnostic and the repository's milestones so a
    /// valid id can be suggested.
    NotFound {
        milestone: MilestoneNumber,
        raw_response: String,
        available: Vec<Milestone>,
    },
    /// The lookup itself failed at the API layer
    Api(ApiError),
}

impl std::fmt::Display for MilestoneLookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound {
                milestone,
                raw_response,
                ..
            } => write!(
                f,
                "Provided milestone ID [{}] does not exist: {}",
                milestone, raw_response
            ),
            Self::Api(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for MilestoneLookupError {}

impl From<ApiError> for MilestoneLookupError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

/// Minimal shape of the milestone-by-id payload. Only the title matters;
/// its absence is how a nonexistent milestone manifests (the API answers
/// with an error object instead of a milestone record).
#[derive(Debug, Deserialize)]
struct MilestonePayload {
    title: Option<String>,
}

/// Resolve a milestone id to its title.
///
/// A body that is not an object with a `title` field means the milestone
/// does not exist; in that case the repository's milestone list is fetched
/// for the diagnostic before returning `NotFound`.
pub async fn resolve_milestone_title(
    client: &GitHubClient,
    repository_id: &RepositoryId,
    milestone: MilestoneNumber,
) -> Result<MilestoneTitle, MilestoneLookupError> {
    let url = client.milestone_url(repository_id, milestone);
    let response = client.get(&url).await?;

    let title = serde_json::from_str::<MilestonePayload>(&response.body)
        .ok()
        .and_then(|payload| payload.title);

    match title {
        Some(title) => {
            info!(%milestone, %title, "milestone resolved");
            Ok(MilestoneTitle::new(title))
        }
        None => {
            let available = match list_milestones(client, repository_id).await {
                Ok(milestones) => milestones,
                Err(err) => {
                    warn!(%err, "failed to list milestones for the not-found diagnostic");
                    Vec::new()
                }
            };
            Err(MilestoneLookupError::NotFound {
                milestone,
                raw_response: response.body,
                available,
            })
        }
    }
}

/// Fetch every milestone of the repository (open and closed ids alike are
/// relevant for the diagnostic listing).
pub async fn list_milestones(
    client: &GitHubClient,
    repository_id: &RepositoryId,
) -> Result<Vec<Milestone>, ApiError> {
    let response = client.get(&client.milestones_url(repository_id)).await?;
    if !response.is_success() {
        return Err(ApiError::Payload(api_message(&response.body)));
    }
    serde_json::from_str(&response.body).map_err(|_| ApiError::Payload(api_message(&response.body)))
}

/// Error envelope the API wraps failures in
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// The API's `message` field when the body carries one, otherwise the raw
/// body itself.
pub(crate) fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| body.to_string())
}
