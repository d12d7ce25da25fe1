//! Progress reporting types for sync operations.
//!
//! The engine reports what it is doing through [`SyncProgress`] events so the
//! CLI can decide how to present them.

/// Progress events emitted during a sync run.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SyncProgress {
    /// Watermark recovered from repository history.
    WatermarkResolved {
        /// Submissions at or before this epoch second are already synced.
        cutoff: i64,
        /// Name used as author/committer.
        author: String,
        /// Whether a previous sync commit was found.
        found_sync_commit: bool,
    },

    /// Requesting a page of the submission feed.
    FetchingPage {
        /// Offset of the page.
        offset: u32,
    },

    /// Fetched and filtered a page.
    FetchedPage {
        /// Offset of the page.
        offset: u32,
        /// Submissions on this page.
        count: usize,
        /// Running count of kept submissions.
        kept_so_far: usize,
    },

    /// A submission at or before the cutoff was seen; pagination stops.
    ReachedWatermark {
        /// Offset of the page that contained it.
        offset: u32,
    },

    /// Pagination finished.
    FetchComplete {
        /// Submissions read.
        fetched: usize,
        /// Submissions kept by the filter.
        kept: usize,
    },

    /// Branch the commits will land on.
    TargetBranch {
        /// Branch name.
        branch: String,
    },

    /// A remote call failed transiently and will be retried.
    RetryBackoff {
        /// What was being attempted.
        operation: String,
        /// Time to wait before retry (ms).
        retry_after_ms: u64,
        /// Current attempt number.
        attempt: u32,
    },

    /// Fetched details for a submission.
    Enriched {
        /// Submission id.
        id: i64,
        /// Problem title.
        title: String,
    },

    /// A submission was skipped because its content is locked.
    SkippedLocked {
        /// Submission id.
        id: i64,
        /// Problem title.
        title: String,
        /// Error message.
        reason: String,
    },

    /// Wrote a commit for a submission.
    Committed {
        /// Problem title.
        title: String,
        /// New commit SHA.
        sha: String,
        /// Submission time (epoch seconds).
        timestamp: i64,
    },

    /// Run finished.
    SyncComplete {
        /// Commits written.
        synced: usize,
        /// Submissions skipped.
        skipped: usize,
    },
}

/// Callback for progress updates during sync operations.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_with_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);

        let callback: ProgressCallback = Box::new(move |_event| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        emit(Some(&callback), SyncProgress::FetchingPage { offset: 0 });
        emit(
            Some(&callback),
            SyncProgress::FetchComplete {
                fetched: 20,
                kept: 3,
            },
        );

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_emit_without_callback() {
        emit(None, SyncProgress::FetchingPage { offset: 20 });
    }

    #[test]
    fn test_sync_progress_debug() {
        let event = SyncProgress::Committed {
            title: "Two Sum".to_string(),
            sha: "abc123".to_string(),
            timestamp: 1_700_000_000,
        };

        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("Committed"));
        assert!(debug_str.contains("Two Sum"));
    }
}
