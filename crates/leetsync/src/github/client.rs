//! GitHub API client for the target repository.

use std::sync::Arc;

use async_trait::async_trait;
use octocrab::Octocrab;

use super::convert::{to_commit_info, to_signature, to_tree_item};
use super::error::GitHubError;
use super::types::{
    CommitListItem, CreateCommitRequest, CreateTreeRequest, CreatedObject, RepoMeta,
    UpdateRefRequest,
};
use crate::platform::{self, CommitInfo, NewCommit, PlatformError, RepoHost, TreeEntry};

/// Create an authenticated Octocrab instance from a GitHub token.
pub fn create_client(token: &str) -> Result<Octocrab, GitHubError> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(GitHubError::Api)
}

/// Split `owner/name` into its parts.
pub fn parse_repository(repository: &str) -> Result<(String, String), GitHubError> {
    let trimmed = repository.trim().trim_end_matches(".git");
    match trimmed.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(GitHubError::InvalidRepository(repository.to_string())),
    }
}

/// GitHub client bound to a single repository, implementing [`RepoHost`].
///
/// Writes go through the git data API (trees, commits, refs), so no local
/// checkout is involved.
#[derive(Clone)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a client for `owner/name` from an authentication token.
    pub fn new(token: &str, repository: &str) -> Result<Self, GitHubError> {
        let (owner, repo) = parse_repository(repository)?;
        let client = create_client(token)?;
        Ok(Self {
            inner: Arc::new(client),
            owner,
            repo,
        })
    }

    /// Create a client from an existing Octocrab instance.
    pub fn from_octocrab(client: Octocrab, owner: &str, repo: &str) -> Self {
        Self {
            inner: Arc::new(client),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    /// `owner/name` of the target repository.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn route(&self, path: &str) -> String {
        format!("/repos/{}/{}{}", self.owner, self.repo, path)
    }

    async fn list_commits(&self, limit: u32) -> Result<Vec<CommitInfo>, GitHubError> {
        let route = self.route(&format!("/commits?per_page={}", limit.clamp(1, 100)));
        let items: Vec<CommitListItem> = self.inner.get(route, None::<&()>).await?;

        tracing::debug!(count = items.len(), repo = %self.full_name(), "Listed recent commits");
        items.into_iter().map(to_commit_info).collect()
    }

    async fn get_default_branch(&self) -> Result<String, GitHubError> {
        let meta: RepoMeta = self.inner.get(self.route(""), None::<&()>).await?;
        Ok(meta.default_branch)
    }
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn list_recent_commits(&self, limit: u32) -> platform::Result<Vec<CommitInfo>> {
        self.list_commits(limit).await.map_err(PlatformError::from)
    }

    async fn default_branch(&self) -> platform::Result<String> {
        self.get_default_branch()
            .await
            .map_err(PlatformError::from)
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> platform::Result<String> {
        let body = CreateTreeRequest {
            base_tree,
            tree: entries.iter().map(to_tree_item).collect(),
        };

        let created: CreatedObject = self
            .inner
            .post(self.route("/git/trees"), Some(&body))
            .await
            .map_err(|e| PlatformError::from(GitHubError::Api(e)))?;
        Ok(created.sha)
    }

    async fn create_commit(&self, commit: &NewCommit) -> platform::Result<String> {
        let signature = to_signature(&commit.identity, commit.date);
        let body = CreateCommitRequest {
            message: &commit.message,
            tree: &commit.tree_sha,
            parents: vec![commit.parent_sha.as_str()],
            author: signature.clone(),
            committer: signature,
        };

        let created: CreatedObject = self
            .inner
            .post(self.route("/git/commits"), Some(&body))
            .await
            .map_err(|e| PlatformError::from(GitHubError::Api(e)))?;
        Ok(created.sha)
    }

    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> platform::Result<()> {
        let body = UpdateRefRequest { sha, force };

        let _: serde_json::Value = self
            .inner
            .patch(self.route(&format!("/git/refs/heads/{}", branch)), Some(&body))
            .await
            .map_err(|e| PlatformError::from(GitHubError::Api(e)))?;

        tracing::debug!(branch, sha, "Updated branch ref");
        Ok(())
    }
}
