//! In-memory `RepoHost` and `SubmissionSource` implementations for tests.
//!
//! No sockets: the fake repository keeps its history in a `Vec` and moves the
//! branch head on `update_ref`, so consecutive syncs observe each other.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::{PlatformError, Result};
use super::types::{
    ACCEPTED_STATUS, CommitInfo, Identity, NewCommit, PageRequest, RepoHost, Submission,
    SubmissionDetail, SubmissionPage, SubmissionSource, TreeEntry,
};

/// A commit written through the fake, with the tree entries that produced it.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCommit {
    pub(crate) sha: String,
    pub(crate) tree_sha: String,
    pub(crate) parent_sha: String,
    pub(crate) message: String,
    pub(crate) identity: Identity,
    pub(crate) date: DateTime<Utc>,
    pub(crate) base_tree: String,
    pub(crate) entries: Vec<TreeEntry>,
}

#[derive(Default)]
struct FakeRepoInner {
    /// Branch history, newest first.
    history: Vec<CommitInfo>,
    trees: HashMap<String, (String, Vec<TreeEntry>)>,
    pending: HashMap<String, RecordedCommit>,
    written: Vec<RecordedCommit>,
    next_object: u64,
    /// Fail `create_commit` once this many commits have been created.
    fail_commits_after: Option<usize>,
    /// Transient failures to return from `create_tree` before succeeding.
    tree_failures: usize,
    forced_updates: Vec<bool>,
}

pub(crate) struct FakeRepo {
    branch: String,
    inner: Mutex<FakeRepoInner>,
}

impl FakeRepo {
    /// A repository whose only commit was made by `author` at epoch second `at`.
    pub(crate) fn with_initial_commit(author: Identity, at: i64) -> Self {
        let initial = CommitInfo {
            sha: "commit-root".to_string(),
            tree_sha: "tree-root".to_string(),
            message: "Initial commit".to_string(),
            author,
            committed_at: DateTime::from_timestamp(at, 0).unwrap_or_default(),
        };
        Self {
            branch: "main".to_string(),
            inner: Mutex::new(FakeRepoInner {
                history: vec![initial],
                ..FakeRepoInner::default()
            }),
        }
    }

    /// A repository without any commit.
    pub(crate) fn empty() -> Self {
        Self {
            branch: "main".to_string(),
            inner: Mutex::new(FakeRepoInner::default()),
        }
    }

    /// Prepend an existing commit to the branch history.
    pub(crate) fn push_existing(&self, commit: CommitInfo) {
        self.lock().history.insert(0, commit);
    }

    pub(crate) fn fail_commits_after(&self, count: usize) {
        self.lock().fail_commits_after = Some(count);
    }

    pub(crate) fn fail_next_trees(&self, count: usize) {
        self.lock().tree_failures = count;
    }

    /// Commits that reached the branch, oldest first.
    pub(crate) fn written(&self) -> Vec<RecordedCommit> {
        self.lock().written.clone()
    }

    pub(crate) fn head(&self) -> Option<CommitInfo> {
        self.lock().history.first().cloned()
    }

    pub(crate) fn forced_updates(&self) -> Vec<bool> {
        self.lock().forced_updates.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeRepoInner> {
        self.inner
            .lock()
            .expect("fake repo lock should not be poisoned")
    }
}

#[async_trait]
impl RepoHost for FakeRepo {
    async fn list_recent_commits(&self, limit: u32) -> Result<Vec<CommitInfo>> {
        let inner = self.lock();
        Ok(inner.history.iter().take(limit as usize).cloned().collect())
    }

    async fn default_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> Result<String> {
        let mut inner = self.lock();
        if inner.tree_failures > 0 {
            inner.tree_failures -= 1;
            return Err(PlatformError::Server {
                status: 502,
                message: "bad gateway".to_string(),
            });
        }
        inner.next_object += 1;
        let sha = format!("tree-{}", inner.next_object);
        inner
            .trees
            .insert(sha.clone(), (base_tree.to_string(), entries.to_vec()));
        Ok(sha)
    }

    async fn create_commit(&self, commit: &NewCommit) -> Result<String> {
        let mut inner = self.lock();
        let created = inner.pending.len() + inner.written.len();
        if inner.fail_commits_after.is_some_and(|limit| created >= limit) {
            return Err(PlatformError::api("commit rejected"));
        }
        let (base_tree, entries) = inner
            .trees
            .get(&commit.tree_sha)
            .cloned()
            .ok_or_else(|| PlatformError::not_found(commit.tree_sha.clone()))?;
        inner.next_object += 1;
        let sha = format!("commit-{}", inner.next_object);
        inner.pending.insert(
            sha.clone(),
            RecordedCommit {
                sha: sha.clone(),
                tree_sha: commit.tree_sha.clone(),
                parent_sha: commit.parent_sha.clone(),
                message: commit.message.clone(),
                identity: commit.identity.clone(),
                date: commit.date,
                base_tree,
                entries,
            },
        );
        Ok(sha)
    }

    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> Result<()> {
        if branch != self.branch {
            return Err(PlatformError::not_found(format!("branch {}", branch)));
        }
        let mut inner = self.lock();
        let recorded = inner
            .pending
            .remove(sha)
            .ok_or_else(|| PlatformError::not_found(sha.to_string()))?;
        inner.history.insert(
            0,
            CommitInfo {
                sha: recorded.sha.clone(),
                tree_sha: recorded.tree_sha.clone(),
                message: recorded.message.clone(),
                author: recorded.identity.clone(),
                committed_at: recorded.date,
            },
        );
        inner.written.push(recorded);
        inner.forced_updates.push(force);
        Ok(())
    }
}

#[derive(Default)]
struct FakeSourceInner {
    /// Pages in feed order.
    pages: Vec<SubmissionPage>,
    details: HashMap<i64, SubmissionDetail>,
    questions: HashMap<String, String>,
    locked_submissions: HashSet<i64>,
    locked_questions: HashSet<String>,
    /// Errors returned before serving the page at this index.
    page_failures: HashMap<usize, VecDeque<PlatformError>>,
    /// Errors returned by the next detail lookups, in order.
    detail_failures: VecDeque<PlatformError>,
    /// Errors returned by the next question lookups, in order.
    question_failures: VecDeque<PlatformError>,
    requests: Vec<PageRequest>,
    detail_calls: Vec<i64>,
    question_calls: Vec<String>,
}

#[derive(Default)]
pub(crate) struct FakeSource {
    inner: Mutex<FakeSourceInner>,
}

impl FakeSource {
    /// A feed with the given pages; page `i` is served for offset `i * limit`.
    pub(crate) fn with_pages(pages: Vec<Vec<Submission>>) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, submissions)| SubmissionPage {
                submissions,
                has_more: i + 1 < count,
                next_key: Some(format!("key-{}", i + 1)),
            })
            .collect();
        Self {
            inner: Mutex::new(FakeSourceInner {
                pages,
                ..FakeSourceInner::default()
            }),
        }
    }

    pub(crate) fn set_detail(&self, id: i64, detail: SubmissionDetail) {
        self.lock().details.insert(id, detail);
    }

    pub(crate) fn set_question(&self, slug: &str, content: &str) {
        self.lock()
            .questions
            .insert(slug.to_string(), content.to_string());
    }

    pub(crate) fn lock_submission(&self, id: i64) {
        self.lock().locked_submissions.insert(id);
    }

    pub(crate) fn lock_question(&self, slug: &str) {
        self.lock().locked_questions.insert(slug.to_string());
    }

    pub(crate) fn fail_page(&self, index: usize, error: PlatformError) {
        self.lock()
            .page_failures
            .entry(index)
            .or_default()
            .push_back(error);
    }

    pub(crate) fn fail_detail(&self, error: PlatformError) {
        self.lock().detail_failures.push_back(error);
    }

    pub(crate) fn fail_question(&self, error: PlatformError) {
        self.lock().question_failures.push_back(error);
    }

    pub(crate) fn requests(&self) -> Vec<PageRequest> {
        self.lock().requests.clone()
    }

    pub(crate) fn detail_calls(&self) -> Vec<i64> {
        self.lock().detail_calls.clone()
    }

    pub(crate) fn question_calls(&self) -> Vec<String> {
        self.lock().question_calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeSourceInner> {
        self.inner
            .lock()
            .expect("fake source lock should not be poisoned")
    }
}

#[async_trait]
impl SubmissionSource for FakeSource {
    async fn fetch_submissions_page(&self, request: &PageRequest) -> Result<SubmissionPage> {
        let mut inner = self.lock();
        inner.requests.push(request.clone());
        let index = (request.offset / request.limit.max(1)) as usize;
        if let Some(err) = inner
            .page_failures
            .get_mut(&index)
            .and_then(VecDeque::pop_front)
        {
            return Err(err);
        }
        Ok(inner.pages.get(index).cloned().unwrap_or_default())
    }

    async fn fetch_submission_detail(&self, id: i64) -> Result<SubmissionDetail> {
        let mut inner = self.lock();
        inner.detail_calls.push(id);
        if let Some(err) = inner.detail_failures.pop_front() {
            return Err(err);
        }
        if inner.locked_submissions.contains(&id) {
            return Err(PlatformError::forbidden(format!("submission {}", id)));
        }
        Ok(inner.details.get(&id).cloned().unwrap_or_default())
    }

    async fn fetch_question_content(&self, title_slug: &str) -> Result<Option<String>> {
        let mut inner = self.lock();
        inner.question_calls.push(title_slug.to_string());
        if let Some(err) = inner.question_failures.pop_front() {
            return Err(err);
        }
        if inner.locked_questions.contains(title_slug) {
            return Err(PlatformError::forbidden(format!("question {}", title_slug)));
        }
        Ok(inner.questions.get(title_slug).cloned())
    }
}

/// Build an accepted submission for tests.
pub(crate) fn accepted(id: i64, title: &str, lang: &str, timestamp: i64) -> Submission {
    Submission {
        id,
        title: title.to_string(),
        title_slug: title.to_lowercase().replace(' ', "-"),
        lang: lang.to_string(),
        status_display: ACCEPTED_STATUS.to_string(),
        timestamp,
        runtime: "52 ms".to_string(),
        memory: "16.4 MB".to_string(),
        code: format!("// solution {}", id),
    }
}

pub(crate) fn octocat() -> Identity {
    Identity {
        name: "The Octocat".to_string(),
        email: "octocat@example.com".to_string(),
    }
}
