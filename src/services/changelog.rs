//! Closed-issue collection across the paginated search endpoint
//!
//! The core of the tool: one search request per page, following the
//! `rel="next"` Link cursor until the result set is exhausted. Requests are
//! strictly sequential; the only state is the accumulating issue collection.
//!
//! Termination is guaranteed by a page cap. The cursor comes from the
//! server, so an endpoint that kept advertising a `next` link would
//! otherwise loop forever.

use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::github::pagination::RelationLinks;
use crate::github::{ApiError, GitHubClient};
use crate::services::milestone::api_message;
use crate::types::{Issue, IssueCollection, MilestoneTitle, RepositoryId, SearchQuery};

/// Default pagination safety cap, overridable via configuration
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Shape of one search result page. A payload without an `items` array is
/// an API error, reported through the error envelope instead.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    incomplete_results: bool,
    items: Vec<Issue>,
}

/// Collect every closed issue of the milestone, deduplicated by number.
///
/// Nothing is rendered or emitted until the whole collection is complete;
/// any failure discards the partial state.
pub async fn collect_closed_issues(
    client: &GitHubClient,
    repository_id: &RepositoryId,
    milestone_title: &MilestoneTitle,
    page_limit: usize,
) -> Result<IssueCollection, ApiError> {
    let query = SearchQuery::closed_issues_in_milestone(repository_id, milestone_title);
    let mut page_url = client.search_issues_url(&query);
    let mut issues = IssueCollection::new();
    let mut pages_fetched = 0usize;

    loop {
        if pages_fetched >= page_limit {
            return Err(ApiError::PageLimitExceeded { limit: page_limit });
        }

        let response = client.get(&page_url).await?;
        pages_fetched += 1;

        if !response.is_success() {
            return Err(ApiError::Payload(api_message(&response.body)));
        }

        let page: SearchPage = serde_json::from_str(&response.body)
            .map_err(|_| ApiError::Payload(api_message(&response.body)))?;

        if page.incomplete_results {
            return Err(ApiError::IncompleteResults(response.body));
        }

        for issue in page.items {
            issues.upsert(issue);
        }
        debug!(page = pages_fetched, collected = issues.count(), "search page processed");

        let next = response
            .link
            .as_deref()
            .map(RelationLinks::parse)
            .and_then(|links| links.next().map(str::to_string));

        match next {
            Some(cursor) => {
                // The cursor is opaque but must at least be a URL we can request.
                let target = Url::parse(&cursor).map_err(|e| ApiError::MalformedPageCursor {
                    cursor,
                    reason: e.to_string(),
                })?;
                page_url = target.into();
            }
            None => break,
        }
    }

    info!(
        total = issues.count(),
        pages = pages_fetched,
        milestone = %milestone_title,
        "issue collection complete"
    );
    Ok(issues)
}
