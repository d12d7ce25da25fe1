//! Platform-agnostic traits for the two remote sides of a sync.
//!
//! A sync reads from a [`SubmissionSource`] (the judge) and writes to a
//! [`RepoHost`] (the git forge). Both are treated as opaque capabilities so
//! the engine in [`crate::sync`] never sees HTTP or JSON.
//!
//! # Example
//!
//! ```ignore
//! use leetsync::platform::{PageRequest, SubmissionSource};
//!
//! async fn first_page<S: SubmissionSource>(source: &S) -> leetsync::platform::Result<usize> {
//!     let page = source
//!         .fetch_submissions_page(&PageRequest { offset: 0, limit: 20, last_key: None })
//!         .await?;
//!     Ok(page.submissions.len())
//! }
//! ```

mod errors;
mod types;

#[cfg(test)]
pub(crate) mod fakes;

pub use errors::{PlatformError, Result, short_error_message};
pub use types::{
    ACCEPTED_STATUS, CommitInfo, Identity, NewCommit, PageRequest, RepoHost, Submission,
    SubmissionDetail, SubmissionPage, SubmissionSource, TreeEntry,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_error_api() {
        let err = PlatformError::api("Something went wrong");
        assert!(err.to_string().contains("API error"));
        assert!(err.to_string().contains("Something went wrong"));
    }

    #[test]
    fn test_platform_error_forbidden() {
        let err = PlatformError::forbidden("question two-sum");
        assert!(err.to_string().contains("Forbidden"));
        assert!(err.is_forbidden());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_platform_error_is_transient() {
        assert!(PlatformError::network("connection reset").is_transient());
        assert!(
            PlatformError::Server {
                status: 502,
                message: "bad gateway".to_string()
            }
            .is_transient()
        );
        assert!(
            PlatformError::RateLimited {
                reset_at: chrono::Utc::now()
            }
            .is_transient()
        );
        assert!(!PlatformError::AuthRequired.is_transient());
        assert!(!PlatformError::not_found("repo").is_transient());
        assert!(!PlatformError::api("bad request").is_transient());
    }

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            PlatformError::from_status(401, ""),
            PlatformError::AuthRequired
        ));
        assert!(PlatformError::from_status(403, "locked").is_forbidden());
        assert!(matches!(
            PlatformError::from_status(404, "missing"),
            PlatformError::NotFound { .. }
        ));
        assert!(matches!(
            PlatformError::from_status(429, ""),
            PlatformError::RateLimited { .. }
        ));
        assert!(matches!(
            PlatformError::from_status(503, "unavailable"),
            PlatformError::Server { status: 503, .. }
        ));
        assert!(matches!(
            PlatformError::from_status(422, "invalid"),
            PlatformError::Api { .. }
        ));
    }

    #[test]
    fn test_short_error_message_multiline() {
        let err = std::io::Error::other("first line\nsecond line\nthird line");
        assert_eq!(short_error_message(&err), "first line");
    }

    #[test]
    fn test_submission_is_accepted() {
        let mut submission = Submission {
            id: 1,
            title: "Two Sum".to_string(),
            title_slug: "two-sum".to_string(),
            lang: "python3".to_string(),
            status_display: ACCEPTED_STATUS.to_string(),
            timestamp: 1000,
            runtime: "52 ms".to_string(),
            memory: "16.4 MB".to_string(),
            code: String::new(),
        };
        assert!(submission.is_accepted());

        submission.status_display = "Wrong Answer".to_string();
        assert!(!submission.is_accepted());
    }

    #[test]
    fn test_tree_entry_file_mode() {
        let entry = TreeEntry::file("two-sum/solution.py", "print(1)\n");
        assert_eq!(entry.mode, "100644");
        assert_eq!(entry.path, "two-sum/solution.py");
    }
}
