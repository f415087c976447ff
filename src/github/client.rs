//! Authenticated GitHub REST client
//!
//! Thin wrapper over `reqwest` that attaches the authorization header and
//! hands the status, `Link` header, and raw body back to the caller. Retry
//! and pagination policy belong to the services driving the client, not
//! here.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK, USER_AGENT};
use tokio::time::Duration;
use tracing::debug;

use crate::github::error::ApiError;
use crate::types::{MilestoneNumber, RepositoryId, SearchQuery};

/// Default request timeout applied when the caller does not supply one
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Production API endpoint; tests point the client at a local mock server
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";

const ACCEPT_HEADER_VALUE: &str = "application/vnd.github.v3+json";
const USER_AGENT_VALUE: &str = concat!("milestone-changelog/", env!("CARGO_PKG_VERSION"));

/// One GET result, exposed raw so callers decide how to interpret it.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Raw `Link` header value, when the endpoint paginates
    pub link: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_base_url: String,
}

impl GitHubClient {
    /// Build a client authenticated against the production API.
    pub fn new(token: &str, timeout: Option<Duration>) -> Result<Self> {
        Self::with_api_base_url(token, timeout, GITHUB_API_BASE_URL)
    }

    /// Build a client against an alternative API base URL.
    pub fn with_api_base_url(
        token: &str,
        timeout: Option<Duration>,
        api_base_url: impl Into<String>,
    ) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("token {}", token))
            .context("GitHub token contains characters not permitted in a header value")?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER_VALUE));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let timeout = timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let connect_timeout = std::cmp::min(timeout, Duration::from_secs(10));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .context("Failed to build GitHub client")?;

        Ok(Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Issue a single authenticated GET.
    ///
    /// Non-2xx statuses are not errors at this layer; the response is
    /// returned as-is and the caller applies endpoint-specific policy.
    pub async fn get(&self, url: &str) -> Result<ApiResponse, ApiError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("reading body of {} failed: {}", url, e)))?;

        debug!(%status, bytes = body.len(), has_link = link.is_some(), "response received");
        Ok(ApiResponse { status, link, body })
    }

    /// Endpoint for one milestone of a repository
    pub fn milestone_url(&self, repository_id: &RepositoryId, milestone: MilestoneNumber) -> String {
        format!(
            "{}/repos/{}/milestones/{}",
            self.api_base_url, repository_id, milestone
        )
    }

    /// Endpoint listing every milestone of a repository
    pub fn milestones_url(&self, repository_id: &RepositoryId) -> String {
        format!("{}/repos/{}/milestones", self.api_base_url, repository_id)
    }

    /// Search endpoint with the query already URL-encoded
    pub fn search_issues_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/search/issues?q={}",
            self.api_base_url,
            urlencoding::encode(query.as_str())
        )
    }
}
