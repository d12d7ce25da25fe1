//! Sync types and constants.

use std::time::Duration;

use crate::platform::{Identity, Submission};
use crate::retry::RetryConfig;

/// How many commits the watermark resolver inspects.
///
/// A sync commit older than this window is not found and the run starts
/// over from cutoff 0.
pub const HISTORY_WINDOW: u32 = 100;

/// Submissions requested per feed page.
pub const PAGE_SIZE: u32 = 20;

/// Pause before every feed page after the first (rate limit courtesy).
pub const PAGE_DELAY_MS: u64 = 1_000;

/// Default window in which resubmissions of the same problem+language are dropped.
pub const DEFAULT_FILTER_DUPLICATE_SECS: i64 = 86_400;

/// Default commit message header, also the signature the watermark looks for.
pub const DEFAULT_COMMIT_HEADER: &str = "Sync LeetCode submission";

/// First backoff delay in milliseconds.
pub const INITIAL_BACKOFF_MS: u64 = 1_000;

/// Growth factor between consecutive backoff delays.
pub const BACKOFF_FACTOR: f32 = 3.0;

/// Retries after the first attempt for every retried remote call.
pub const MAX_RETRIES: usize = 5;

/// Options for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Drop an accepted submission if a newer kept one for the same
    /// problem+language is less than this many seconds away.
    pub filter_duplicate_secs: i64,
    /// Folder in the repository that receives the problem directories.
    pub destination_folder: Option<String>,
    /// Fetch percentiles, canonical code and question id per submission.
    pub enrich: bool,
    /// Commit message header; doubles as the sync commit signature.
    pub commit_header: String,
    /// Submissions requested per page.
    pub page_size: u32,
    /// Delay before each page after the first.
    pub page_delay: Duration,
    /// Backoff for retried remote calls.
    pub retry: RetryConfig,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            filter_duplicate_secs: DEFAULT_FILTER_DUPLICATE_SECS,
            destination_folder: None,
            enrich: true,
            commit_header: DEFAULT_COMMIT_HEADER.to_string(),
            page_size: PAGE_SIZE,
            page_delay: Duration::from_millis(PAGE_DELAY_MS),
            retry: RetryConfig::default(),
        }
    }
}

/// Result of a sync run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncResult {
    /// Submissions read from the feed, including the ones dropped by the filter.
    pub fetched: usize,
    /// Submissions that passed the watermark and dedup filter.
    pub kept: usize,
    /// Commits written.
    pub synced: usize,
    /// Kept submissions skipped because their content is locked.
    pub skipped: usize,
    /// Cutoff this run started from.
    pub cutoff: i64,
    /// Branch head after the run, if any commit was written.
    pub head: Option<String>,
}

/// Last synced point recovered from repository history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    /// Submissions at or before this epoch second are already synced.
    pub cutoff: i64,
    /// Author and committer for new commits.
    pub identity: Identity,
    /// Whether a sync commit was found in the inspected history.
    pub found_sync_commit: bool,
}

/// Tree and commit the next write builds on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainState {
    pub tree_sha: String,
    pub commit_sha: String,
}

/// Formatted percentiles for the commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionStats {
    pub runtime_percentile: String,
    pub memory_percentile: String,
}

/// A kept submission with everything the commit writer needs.
#[derive(Debug, Clone)]
pub struct EnrichedSubmission {
    pub submission: Submission,
    /// Present only when enrichment ran.
    pub stats: Option<SubmissionStats>,
    /// Zero-padded question id, when resolved.
    pub question_id: Option<String>,
    /// Code body to write.
    pub code: String,
    /// Problem statement for README.md.
    pub question_content: Option<String>,
}
