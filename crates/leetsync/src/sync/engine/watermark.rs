use crate::platform::CommitInfo;
use crate::sync::error::{Result, SyncError};
use crate::sync::types::Watermark;

/// Recover the last synced point from branch history (newest first).
///
/// The first commit whose message starts with `signature` supplies the cutoff
/// (its committer date) and the identity for new commits. Without one, the
/// cutoff is 0 and the author of the oldest listed commit is used.
pub fn resolve_watermark(history: &[CommitInfo], signature: &str) -> Result<Watermark> {
    let oldest = history.last().ok_or(SyncError::EmptyHistory)?;

    let watermark = match history.iter().find(|c| c.message.starts_with(signature)) {
        Some(sync_commit) => Watermark {
            cutoff: sync_commit.committed_at.timestamp(),
            identity: sync_commit.author.clone(),
            found_sync_commit: true,
        },
        None => Watermark {
            cutoff: 0,
            identity: oldest.author.clone(),
            found_sync_commit: false,
        },
    };

    Ok(watermark)
}
