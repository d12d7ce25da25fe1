//! LeetCode client for the submission feed and problem details.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for LeetCode API operations
//! - [`types`] - Wire types for the REST listing and the GraphQL queries
//! - [`client`] - HTTP client implementing [`SubmissionSource`](crate::platform::SubmissionSource)
//! - [`convert`] - Conversion to platform types
//!
//! ```ignore
//! use leetsync::leetcode::LeetCodeClient;
//!
//! let client = LeetCodeClient::new(&session, &csrf_token)?;
//! ```

mod client;
mod convert;
mod error;
mod types;

pub use client::{LEETCODE_HOST, LeetCodeClient};
pub use error::LeetCodeError;
pub use types::{LeetCodeSubmission, SubmissionsDump};
