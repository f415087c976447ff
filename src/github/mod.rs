pub mod client;
pub mod error;
pub mod pagination;

pub use client::{ApiResponse, GitHubClient};
pub use error::ApiError;
