//! leetsync - mirror accepted LeetCode submissions into a GitHub repository.
//!
//! Every accepted submission becomes one commit, authored at the submission's
//! own timestamp. The repository history is the only state: the newest sync
//! commit marks how far previous runs got.
//!
//! # Features
//!
//! - `github` - [`github::GitHubClient`], the repository side.
//! - `leetcode` - [`leetcode::LeetCodeClient`], the submission side.
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
//!
//! let result = sync_submissions(&source, &repo, &SyncOptions::default(), None).await?;
//! println!("{} commits written", result.synced);
//! ```

pub mod naming;
pub mod platform;
pub mod retry;
pub mod sync;

#[cfg(feature = "leetcode")]
pub mod http;

#[cfg(feature = "github")]
pub mod github;

#[cfg(feature = "leetcode")]
pub mod leetcode;

pub use platform::{PlatformError, RepoHost, SubmissionSource};
pub use sync::{SyncError, SyncOptions, SyncResult, sync_submissions};
