//! GitHub API error types.

use chrono::Utc;
use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    #[error("Invalid repository {0:?}, expected owner/name")]
    InvalidRepository(String),

    /// A listed commit carried neither author nor committer.
    #[error("Commit {0} has no author or committer")]
    IncompleteCommit(String),
}

// Re-export the shared short_error_message function from platform module
pub use crate::platform::short_error_message;

/// Map a GitHub HTTP status to a platform error.
///
/// GitHub signals secondary rate limits with 403 as well as 429.
pub fn classify_status(status: u16, message: impl Into<String>) -> PlatformError {
    match status {
        403 | 429 => PlatformError::RateLimited {
            reset_at: Utc::now() + chrono::Duration::minutes(1),
        },
        status => PlatformError::from_status(status, message),
    }
}

fn classify_octocrab(err: octocrab::Error) -> PlatformError {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            classify_status(source.status_code.as_u16(), source.message.clone())
        }
        // Empty response body (EOF) often indicates rate limiting
        octocrab::Error::Json { source, .. } => PlatformError::network(source.to_string()),
        e @ (octocrab::Error::Hyper { .. } | octocrab::Error::Service { .. }) => {
            PlatformError::network(short_error_message(&e))
        }
        other => PlatformError::api(short_error_message(&other)),
    }
}

impl From<GitHubError> for PlatformError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Api(e) => classify_octocrab(e),
            GitHubError::InvalidRepository(repo) => {
                PlatformError::internal(format!("invalid repository: {}", repo))
            }
            e @ GitHubError::IncompleteCommit(_) => PlatformError::api(e.to_string()),
        }
    }
}
