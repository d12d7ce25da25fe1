//! Sync engine: mirrors accepted submissions into repository history.
//!
//! A run is a single sequential task:
//!
//! 1. list recent commits and [`resolve_watermark`]
//! 2. page through the feed with a [`DedupFilter`] until the watermark
//! 3. reverse the kept submissions so the oldest is committed first
//! 4. [`enrich`] each one and [`write_commit`] it on top of the previous commit
//!
//! Each commit moves the branch head, so a run that aborts halfway leaves a
//! valid watermark behind and the next run resumes from there.
//!
//! # Example
//!
//! ```ignore
//! use leetsync::sync::{SyncOptions, sync_submissions};
//!
//! let result = sync_submissions(&leetcode, &github, &SyncOptions::default(), None).await?;
//! println!("Synced {} submissions", result.synced);
//! ```

mod commit;
mod enrich;
mod fetch;
mod filter;
mod watermark;

pub use commit::{commit_message, tree_entries, write_commit};
pub use enrich::{enrich, format_percentile};
pub use fetch::{FetchOutcome, fetch_new_submissions};
pub use filter::{DedupFilter, FilterOutcome};
pub use watermark::resolve_watermark;

use super::error::{Result, SyncError};
use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{ChainState, HISTORY_WINDOW, SyncOptions, SyncResult};
use crate::platform::{RepoHost, SubmissionSource};

/// Sync new accepted submissions from `source` into `repo`.
///
/// Fatal errors abort the remaining submissions; commits already written
/// stay on the branch.
#[tracing::instrument(skip_all)]
pub async fn sync_submissions<S, R>(
    source: &S,
    repo: &R,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncResult>
where
    S: SubmissionSource + ?Sized,
    R: RepoHost + ?Sized,
{
    let history = repo.list_recent_commits(HISTORY_WINDOW).await?;
    let watermark = resolve_watermark(&history, &options.commit_header)?;
    let head = history.first().ok_or(SyncError::EmptyHistory)?;

    tracing::info!(
        cutoff = watermark.cutoff,
        author = %watermark.identity.name,
        "Resolved watermark"
    );
    emit(
        on_progress,
        SyncProgress::WatermarkResolved {
            cutoff: watermark.cutoff,
            author: watermark.identity.name.clone(),
            found_sync_commit: watermark.found_sync_commit,
        },
    );

    let mut result = SyncResult {
        cutoff: watermark.cutoff,
        ..SyncResult::default()
    };

    let mut filter = DedupFilter::new(watermark.cutoff, options.filter_duplicate_secs);
    let fetched = fetch_new_submissions(source, &mut filter, options, on_progress).await?;
    result.fetched = fetched.fetched;
    result.kept = fetched.kept.len();

    let mut kept = fetched.kept;
    kept.reverse();

    if kept.is_empty() {
        tracing::info!("No new submissions to sync");
        emit(
            on_progress,
            SyncProgress::SyncComplete {
                synced: 0,
                skipped: 0,
            },
        );
        return Ok(result);
    }

    let branch = repo.default_branch().await?;
    emit(
        on_progress,
        SyncProgress::TargetBranch {
            branch: branch.clone(),
        },
    );

    let mut chain = ChainState {
        tree_sha: head.tree_sha.clone(),
        commit_sha: head.sha.clone(),
    };

    tracing::info!(count = kept.len(), branch = %branch, "Syncing submissions");
    for submission in kept {
        let Some(enriched) = enrich(source, submission, options, on_progress).await? else {
            result.skipped += 1;
            continue;
        };

        chain = write_commit(
            repo,
            &chain,
            &enriched,
            &watermark.identity,
            &branch,
            options,
            on_progress,
        )
        .await?;
        result.synced += 1;
        result.head = Some(chain.commit_sha.clone());
    }

    emit(
        on_progress,
        SyncProgress::SyncComplete {
            synced: result.synced,
            skipped: result.skipped,
        },
    );

    Ok(result)
}
