//! Error types for LeetCode API operations.

use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that can occur when interacting with the LeetCode API.
#[derive(Debug, Error)]
pub enum LeetCodeError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The session cookie was rejected (LeetCode answers with an HTML login page).
    #[error("LeetCode session expired or invalid")]
    SessionExpired,

    /// The requested content is not available to this account.
    #[error("Locked content: {0}")]
    Locked(String),

    /// GraphQL returned errors without data.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<LeetCodeError> for PlatformError {
    fn from(err: LeetCodeError) -> Self {
        match err {
            LeetCodeError::Http(message) => PlatformError::Network { message },
            LeetCodeError::Json(e) => PlatformError::Internal {
                message: format!("JSON parse error: {}", e),
            },
            LeetCodeError::Api { status, message } => PlatformError::from_status(status, message),
            LeetCodeError::SessionExpired => PlatformError::AuthRequired,
            LeetCodeError::Locked(resource) => PlatformError::Forbidden { resource },
            LeetCodeError::GraphQl(message) => PlatformError::Api { message },
            LeetCodeError::Config(message) => PlatformError::Internal { message },
        }
    }
}
