/// API interaction failures surfaced to the entry point.
///
/// Every variant is terminal for a single-shot run: nothing at this layer is
/// retried. Pagination continuation is normal flow control, not recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure (connection, TLS, timeout)
    Transport(String),
    /// Response did not carry the shape the endpoint promises; holds the
    /// API's `message` field when present, otherwise the raw body
    Payload(String),
    /// The search reported `incomplete_results`; partial result sets are
    /// not trustworthy enough to render a changelog from
    IncompleteResults(String),
    /// A next-page cursor was not a usable URL
    MalformedPageCursor { cursor: String, reason: String },
    /// The pagination safety cap was reached before the result set was
    /// exhausted
    PageLimitExceeded { limit: usize },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "GitHub API request failed: {}", msg),
            Self::Payload(msg) => write!(f, "GitHub API returned error message [{}]", msg),
            Self::IncompleteResults(body) => {
                write!(f, "GitHub API returned incomplete results [{}]", body)
            }
            Self::MalformedPageCursor { cursor, reason } => {
                write!(f, "Malformed next-page link [{}]: {}", cursor, reason)
            }
            Self::PageLimitExceeded { limit } => {
                write!(
                    f,
                    "Pagination did not terminate within {} pages; raise --max-pages if the result set is genuinely this large",
                    limit
                )
            }
        }
    }
}

impl std::error::Error for ApiError {}
