//! GitHub REST payloads for the commit and git-data endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entry of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitListItem {
    pub sha: String,
    pub commit: CommitData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitData {
    pub message: String,
    pub author: Option<GitUser>,
    pub committer: Option<GitUser>,
    pub tree: ShaRef,
}

/// Git author or committer as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct GitUser {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShaRef {
    pub sha: String,
}

/// Subset of `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoMeta {
    pub default_branch: String,
}

/// Body of `POST /repos/{owner}/{repo}/git/trees`.
#[derive(Debug, Serialize)]
pub struct CreateTreeRequest<'a> {
    pub base_tree: &'a str,
    pub tree: Vec<TreeItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TreeItem<'a> {
    pub path: &'a str,
    pub mode: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub content: &'a str,
}

/// Body of `POST /repos/{owner}/{repo}/git/commits`.
#[derive(Debug, Serialize)]
pub struct CreateCommitRequest<'a> {
    pub message: &'a str,
    pub tree: &'a str,
    pub parents: Vec<&'a str>,
    pub author: Signature<'a>,
    pub committer: Signature<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Signature<'a> {
    pub name: &'a str,
    pub email: &'a str,
    /// ISO 8601 timestamp.
    pub date: String,
}

/// Body of `PATCH /repos/{owner}/{repo}/git/refs/heads/{branch}`.
#[derive(Debug, Serialize)]
pub struct UpdateRefRequest<'a> {
    pub sha: &'a str,
    pub force: bool,
}

/// Response carrying only the created object's SHA.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedObject {
    pub sha: String,
}
