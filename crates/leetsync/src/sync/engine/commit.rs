use chrono::DateTime;

use crate::naming::{extension_for, slug, solution_dir};
use crate::platform::{Identity, NewCommit, PlatformError, RepoHost, TreeEntry};
use crate::retry::with_retry;
use crate::sync::error::{Result, SyncError};
use crate::sync::progress::{ProgressCallback, SyncProgress, emit};
use crate::sync::types::{ChainState, EnrichedSubmission, SyncOptions};

/// Commit message for a submission.
pub fn commit_message(header: &str, enriched: &EnrichedSubmission) -> String {
    let submission = &enriched.submission;
    match &enriched.stats {
        Some(stats) => format!(
            "{} - {} - Runtime - {} ({}), Memory - {} ({})",
            header,
            submission.title,
            submission.runtime,
            stats.runtime_percentile,
            submission.memory,
            stats.memory_percentile
        ),
        None => format!(
            "{} - {} - Runtime - {}, Memory - {}",
            header, submission.title, submission.runtime, submission.memory
        ),
    }
}

/// Files to layer over the current tree for a submission.
pub fn tree_entries(
    enriched: &EnrichedSubmission,
    destination_folder: Option<&str>,
) -> Result<Vec<TreeEntry>> {
    let submission = &enriched.submission;
    let extension =
        extension_for(&submission.lang).ok_or_else(|| SyncError::UnmappedLanguage {
            lang: submission.lang.clone(),
            title: submission.title.clone(),
        })?;

    let dir = solution_dir(
        destination_folder,
        enriched.question_id.as_deref(),
        &slug(&submission.title),
    );

    let mut entries = Vec::with_capacity(2);
    if let Some(content) = &enriched.question_content {
        entries.push(TreeEntry::file(format!("{}/README.md", dir), content.clone()));
    }
    entries.push(TreeEntry::file(
        format!("{}/solution.{}", dir, extension),
        format!("{}\n", enriched.code),
    ));

    Ok(entries)
}

/// Write one commit on top of `chain` and move `branch` to it.
pub async fn write_commit<R: RepoHost + ?Sized>(
    repo: &R,
    chain: &ChainState,
    enriched: &EnrichedSubmission,
    identity: &Identity,
    branch: &str,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<ChainState> {
    let submission = &enriched.submission;
    let entries = tree_entries(enriched, options.destination_folder.as_deref())?;
    let date = DateTime::from_timestamp(submission.timestamp, 0).ok_or_else(|| {
        PlatformError::internal(format!(
            "submission {} has an out-of-range timestamp {}",
            submission.id, submission.timestamp
        ))
    })?;

    let tree_sha = with_retry(
        || repo.create_tree(&chain.tree_sha, &entries),
        &options.retry,
        PlatformError::is_transient,
        "create tree",
        on_progress,
    )
    .await?;

    let new_commit = NewCommit {
        message: commit_message(&options.commit_header, enriched),
        tree_sha,
        parent_sha: chain.commit_sha.clone(),
        identity: identity.clone(),
        date,
    };

    let commit_sha = with_retry(
        || repo.create_commit(&new_commit),
        &options.retry,
        PlatformError::is_transient,
        "create commit",
        on_progress,
    )
    .await?;

    // The chain always descends from the previous head.
    with_retry(
        || repo.update_ref(branch, &commit_sha, true),
        &options.retry,
        PlatformError::is_transient,
        "update branch",
        on_progress,
    )
    .await?;

    tracing::info!(
        id = submission.id,
        sha = %commit_sha,
        "Committed {}",
        submission.title
    );
    emit(
        on_progress,
        SyncProgress::Committed {
            title: submission.title.clone(),
            sha: commit_sha.clone(),
            timestamp: submission.timestamp,
        },
    );

    Ok(ChainState {
        tree_sha: new_commit.tree_sha,
        commit_sha,
    })
}
