//! Submission sync: watermark, feed filtering, enrichment and commit writing.
//!
//! # Module Structure
//!
//! - [`types`] - Core types: `SyncOptions`, `SyncResult`, constants
//! - [`progress`] - Progress reporting: `SyncProgress`, `ProgressCallback`, `emit()`
//! - [`error`] - `SyncError`
//! - [`engine`] - The sync engine: `sync_submissions()` and its stages
//!
//! # Example
//!
//! ```ignore
//! use leetsync::github::GitHubClient;
//! use leetsync::leetcode::LeetCodeClient;
//! use leetsync::sync::{SyncOptions, sync_submissions};
//!
//! let source = LeetCodeClient::new(&session, &csrf_token)?;
//! let repo = GitHubClient::new(&token, "octocat/leetcode-solutions")?;
//! let result = sync_submissions(&source, &repo, &SyncOptions::default(), None).await?;
//! ```

pub mod engine;
mod error;
mod progress;
mod types;

// Re-export types
pub use types::{
    ChainState, EnrichedSubmission, SubmissionStats, SyncOptions, SyncResult, Watermark,
};

// Re-export constants
pub use types::{
    BACKOFF_FACTOR, DEFAULT_COMMIT_HEADER, DEFAULT_FILTER_DUPLICATE_SECS, HISTORY_WINDOW,
    INITIAL_BACKOFF_MS, MAX_RETRIES, PAGE_DELAY_MS, PAGE_SIZE,
};

pub use error::{Result, SyncError};

// Re-export progress types
pub use progress::{ProgressCallback, SyncProgress, emit};

// Re-export engine functions for convenience
pub use engine::{DedupFilter, resolve_watermark, sync_submissions};
