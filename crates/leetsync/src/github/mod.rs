//! GitHub API client for the repository that receives synced solutions.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Request and response payloads
//! - [`client`] - Client creation and the [`RepoHost`](crate::platform::RepoHost) implementation
//! - [`convert`] - Conversion between payloads and platform types
//!
//! ```ignore
//! use leetsync::github::GitHubClient;
//!
//! let client = GitHubClient::new(&token, "octocat/leetcode-solutions")?;
//! ```

mod client;
mod convert;
mod error;
mod types;

pub use error::{GitHubError, classify_status};

pub use client::{GitHubClient, create_client, parse_repository};
