//! LeetCode API data types.
//!
//! Only the fields we need are declared, which keeps deserialization
//! resilient to additions on the LeetCode side.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/submissions/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionsDump {
    /// Submissions, newest first.
    #[serde(default)]
    pub submissions_dump: Vec<LeetCodeSubmission>,
    /// Whether another page exists.
    #[serde(default)]
    pub has_next: bool,
    /// Paging token for the next request.
    #[serde(default)]
    pub last_key: Option<String>,
}

/// One entry of the submissions listing.
#[derive(Debug, Clone, Deserialize)]
pub struct LeetCodeSubmission {
    pub id: i64,
    pub title: String,
    pub title_slug: String,
    pub lang: String,
    pub status_display: String,
    /// Epoch seconds.
    pub timestamp: i64,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub memory: String,
    #[serde(default)]
    pub code: String,
}

/// GraphQL request body.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionIdVariables {
    pub submission_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSlugVariables<'a> {
    pub title_slug: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetailsData {
    pub submission_details: Option<SubmissionDetailsPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetailsPayload {
    pub runtime_percentile: Option<f64>,
    pub memory_percentile: Option<f64>,
    pub code: Option<String>,
    pub question: Option<QuestionRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRef {
    /// Sent as a string by current deployments, as a number by older ones.
    pub question_id: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionData {
    pub question: Option<QuestionContent>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionContent {
    pub content: Option<String>,
}

pub(crate) const SUBMISSION_DETAILS_QUERY: &str = r#"query submissionDetails($submissionId: Int!) {
  submissionDetails(submissionId: $submissionId) {
    runtimePercentile
    memoryPercentile
    code
    question {
      questionId
    }
  }
}"#;

pub(crate) const QUESTION_CONTENT_QUERY: &str = r#"query getQuestionDetail($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    content
  }
}"#;
