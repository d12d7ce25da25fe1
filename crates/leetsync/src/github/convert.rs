//! Conversion between GitHub payloads and platform types.

use chrono::{DateTime, SecondsFormat, Utc};

use super::error::GitHubError;
use super::types::{CommitListItem, Signature, TreeItem};
use crate::platform::{CommitInfo, Identity, TreeEntry};

/// Convert a listed commit to the platform commit record.
///
/// Identity comes from the author; the timestamp is the committer date,
/// falling back to the author date when the committer is missing. A commit
/// with neither is an error: dropping it could hide the branch head.
pub fn to_commit_info(item: CommitListItem) -> Result<CommitInfo, GitHubError> {
    let CommitListItem { sha, commit } = item;
    let Some(author) = commit.author.or_else(|| commit.committer.clone()) else {
        return Err(GitHubError::IncompleteCommit(sha));
    };
    let committed_at = commit
        .committer
        .as_ref()
        .map(|c| c.date)
        .unwrap_or(author.date);

    Ok(CommitInfo {
        sha,
        tree_sha: commit.tree.sha,
        message: commit.message,
        author: Identity {
            name: author.name,
            email: author.email,
        },
        committed_at,
    })
}

pub fn to_tree_item(entry: &TreeEntry) -> TreeItem<'_> {
    TreeItem {
        path: &entry.path,
        mode: &entry.mode,
        kind: "blob",
        content: &entry.content,
    }
}

pub fn to_signature(identity: &Identity, date: DateTime<Utc>) -> Signature<'_> {
    Signature {
        name: &identity.name,
        email: &identity.email,
        date: date.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}
