use leetsync::sync::SyncProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: SyncProgress) {
        match event {
            SyncProgress::WatermarkResolved {
                cutoff,
                author,
                found_sync_commit,
            } => {
                if found_sync_commit {
                    tracing::info!(cutoff, author = %author, "Resuming after last sync commit");
                } else {
                    tracing::info!(author = %author, "No sync commit found, syncing full history");
                }
            }

            SyncProgress::FetchingPage { offset } => {
                tracing::debug!(offset, "Fetching submissions");
            }

            SyncProgress::FetchedPage {
                offset,
                count,
                kept_so_far,
            } => {
                tracing::debug!(offset, count, kept_so_far, "Fetched page");
            }

            SyncProgress::ReachedWatermark { offset } => {
                tracing::debug!(offset, "Reached previously synced submissions");
            }

            SyncProgress::FetchComplete { fetched, kept } => {
                tracing::info!(fetched, kept, "Fetch complete");
            }

            SyncProgress::TargetBranch { branch } => {
                tracing::info!(branch = %branch, "Writing commits");
            }

            SyncProgress::RetryBackoff {
                operation,
                retry_after_ms,
                attempt,
            } => {
                tracing::warn!(
                    operation = %operation,
                    retry_after_ms,
                    attempt,
                    "Transient failure, retrying"
                );
            }

            SyncProgress::Enriched { id, title } => {
                tracing::debug!(id, title = %title, "Fetched submission details");
            }

            SyncProgress::SkippedLocked { id, title, reason } => {
                tracing::warn!(id, title = %title, reason = %reason, "Skipped locked submission");
            }

            SyncProgress::Committed {
                title,
                sha,
                timestamp,
            } => {
                tracing::info!(title = %title, sha = %sha, timestamp, "Committed");
            }

            SyncProgress::SyncComplete { synced, skipped } => {
                tracing::info!(synced, skipped, "Sync complete");
            }

            _ => {}
        }
    }
}
