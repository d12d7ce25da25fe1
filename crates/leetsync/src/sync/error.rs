use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A remote call failed after any retries it was allowed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The target branch has no commit to build on.
    #[error("Repository has no commits; create an initial commit on the default branch first")]
    EmptyHistory,

    /// No file extension is registered for the submission's language.
    #[error("Language {lang} does not have a registered extension (submission \"{title}\")")]
    UnmappedLanguage { lang: String, title: String },
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
