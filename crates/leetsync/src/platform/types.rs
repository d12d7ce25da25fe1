use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::Result;

/// Status string the feed uses for solutions that passed every test.
pub const ACCEPTED_STATUS: &str = "Accepted";

/// A single submission from the remote feed (platform-agnostic representation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Platform-specific numeric ID.
    pub id: i64,
    /// Human readable problem title.
    pub title: String,
    /// URL-safe problem identifier used for detail lookups.
    pub title_slug: String,
    /// Language tag (`python3`, `golang`, ...).
    pub lang: String,
    /// Judge verdict, e.g. `Accepted`.
    pub status_display: String,
    /// Submission time in seconds since the epoch.
    pub timestamp: i64,
    /// Runtime display string, e.g. `52 ms`.
    pub runtime: String,
    /// Memory display string, e.g. `16.4 MB`.
    pub memory: String,
    /// Code body as returned by the listing. May be empty.
    pub code: String,
}

impl Submission {
    /// Whether the judge accepted this submission.
    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.status_display == ACCEPTED_STATUS
    }
}

/// Request for one page of the submission feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based offset into the feed.
    pub offset: u32,
    /// Page size.
    pub limit: u32,
    /// Paging token returned with the previous page.
    pub last_key: Option<String>,
}

/// One page of the submission feed, newest first.
#[derive(Debug, Clone, Default)]
pub struct SubmissionPage {
    pub submissions: Vec<Submission>,
    /// Whether the feed has further pages.
    pub has_more: bool,
    /// Paging token to pass with the next request.
    pub next_key: Option<String>,
}

/// Secondary details about a submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionDetail {
    pub runtime_percentile: Option<f64>,
    pub memory_percentile: Option<f64>,
    /// Canonical code body.
    pub code: Option<String>,
    /// Frontend question id, unpadded.
    pub question_id: Option<String>,
}

/// Name and email used for commit authorship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// A commit as listed from the repository history.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub sha: String,
    pub tree_sha: String,
    pub message: String,
    pub author: Identity,
    pub committed_at: DateTime<Utc>,
}

/// A file to place in a new tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    /// Git file mode, e.g. `100644`.
    pub mode: String,
    pub content: String,
}

impl TreeEntry {
    /// Regular (non-executable) file entry.
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: "100644".to_string(),
            content: content.into(),
        }
    }
}

/// Everything needed to create a single-parent commit.
///
/// Author and committer share the identity and date.
#[derive(Debug, Clone)]
pub struct NewCommit {
    pub message: String,
    pub tree_sha: String,
    pub parent_sha: String,
    pub identity: Identity,
    pub date: DateTime<Utc>,
}

/// The repository side: a git host that exposes low-level git data operations.
///
/// Implementors target one repository; the branch name is always passed in.
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// List the most recent commits on the default branch, newest first.
    async fn list_recent_commits(&self, limit: u32) -> Result<Vec<CommitInfo>>;

    /// Name of the repository's default branch.
    async fn default_branch(&self) -> Result<String>;

    /// Create a tree from `entries` layered over `base_tree`. Returns the tree SHA.
    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> Result<String>;

    /// Create a commit object. Returns the commit SHA.
    async fn create_commit(&self, commit: &NewCommit) -> Result<String>;

    /// Point `refs/heads/{branch}` at `sha`.
    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> Result<()>;
}

/// The judge side: a paginated feed of submissions plus detail lookups.
///
/// Locked content must be reported as [`PlatformError::Forbidden`](super::PlatformError::Forbidden).
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    /// Fetch one page of the submission feed.
    async fn fetch_submissions_page(&self, request: &PageRequest) -> Result<SubmissionPage>;

    /// Fetch percentiles, code and question id for one submission.
    async fn fetch_submission_detail(&self, id: i64) -> Result<SubmissionDetail>;

    /// Fetch the problem statement for a question.
    async fn fetch_question_content(&self, title_slug: &str) -> Result<Option<String>>;
}
