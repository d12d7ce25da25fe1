use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when talking to the submission source or the repository host.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// API error from the platform.
    #[error("API error: {message}")]
    Api { message: String },

    /// The platform answered with a 5xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Content is locked (premium problem, foreign submission, ...).
    #[error("Forbidden: {resource}")]
    Forbidden { resource: String },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    /// Authentication required or failed.
    #[error("Authentication required")]
    AuthRequired,

    /// Resource not found (repo, branch, question, ...).
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Network or connection error.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Unexpected/internal error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlatformError {
    /// Create an API error.
    #[inline]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a forbidden error.
    #[inline]
    pub fn forbidden(resource: impl Into<String>) -> Self {
        Self::Forbidden {
            resource: resource.into(),
        }
    }

    /// Create a not found error.
    #[inline]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a network error.
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Map an HTTP status and body to the matching error variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::AuthRequired,
            403 => Self::Forbidden { resource: message },
            404 => Self::NotFound { resource: message },
            429 => Self::RateLimited {
                reset_at: Utc::now() + chrono::Duration::minutes(1),
            },
            500..=599 => Self::Server { status, message },
            _ => Self::Api { message },
        }
    }

    /// Check if this error marks locked content.
    #[inline]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    /// Whether retrying the same request may succeed.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Server { .. } | Self::RateLimited { .. }
        )
    }
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which is useful for errors
/// that include backtraces or multi-line details.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
