//! LeetCode API client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::convert::{to_submission_detail, to_submission_page};
use super::error::LeetCodeError;
use super::types::{
    GraphQlRequest, GraphQlResponse, QUESTION_CONTENT_QUERY, QuestionData,
    SUBMISSION_DETAILS_QUERY, SubmissionDetailsData, SubmissionIdVariables, SubmissionsDump,
    TitleSlugVariables,
};
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::platform::{
    self, PageRequest, PlatformError, SubmissionDetail, SubmissionPage, SubmissionSource,
};

/// Default LeetCode host.
pub const LEETCODE_HOST: &str = "https://leetcode.com";

/// LeetCode API client.
///
/// Authenticates with the browser session cookie and CSRF token; LeetCode
/// offers no token-based API for personal submissions.
#[derive(Clone)]
pub struct LeetCodeClient {
    transport: Arc<dyn HttpTransport>,
    host: String,
    session: String,
    csrf_token: String,
}

impl LeetCodeClient {
    /// Create a client for leetcode.com.
    pub fn new(session: &str, csrf_token: &str) -> Result<Self, LeetCodeError> {
        let transport = ReqwestTransport::with_timeout(StdDuration::from_secs(30))
            .map_err(|e| LeetCodeError::Config(e.to_string()))?;

        Ok(Self::new_with_transport(
            LEETCODE_HOST,
            session,
            csrf_token,
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        host: &str,
        session: &str,
        csrf_token: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            host: host.trim_end_matches('/').to_string(),
            session: session.to_string(),
            csrf_token: csrf_token.to_string(),
        }
    }

    fn cookie(&self) -> String {
        format!(
            "csrftoken={};LEETCODE_SESSION={};",
            self.csrf_token, self.session
        )
    }

    fn submissions_url(&self, request: &PageRequest) -> Result<String, LeetCodeError> {
        let base = format!("{}/api/submissions/", self.host);
        let url = url::Url::parse_with_params(
            &base,
            &[
                ("offset", request.offset.to_string()),
                ("limit", request.limit.to_string()),
                ("lastkey", request.last_key.clone().unwrap_or_default()),
            ],
        )
        .map_err(|e| LeetCodeError::Config(format!("invalid host {}: {}", self.host, e)))?;
        Ok(url.into())
    }

    /// Send a request and reject non-2xx or non-JSON responses.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LeetCodeError> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| LeetCodeError::Http(e.to_string()))?;

        if !response.is_success() {
            let message = String::from_utf8_lossy(&response.body).to_string();
            return Err(LeetCodeError::Api {
                status: response.status,
                message,
            });
        }

        // An expired session gets the HTML login page with a 200.
        let is_json = response
            .header("content-type")
            .is_some_and(|ct| ct.contains("json"));
        if !is_json {
            return Err(LeetCodeError::SessionExpired);
        }

        Ok(response)
    }

    /// Fetch one page of the authenticated user's submissions.
    pub async fn list_submissions(
        &self,
        request: &PageRequest,
    ) -> Result<SubmissionsDump, LeetCodeError> {
        tracing::debug!(offset = request.offset, "Fetching LeetCode submissions page");

        let http_request = HttpRequest {
            method: HttpMethod::Get,
            url: self.submissions_url(request)?,
            headers: vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("X-Requested-With".to_string(), "XMLHttpRequest".to_string()),
                ("X-CSRFToken".to_string(), self.csrf_token.clone()),
                ("Cookie".to_string(), self.cookie()),
            ],
            body: Vec::new(),
        };

        let response = self.send(http_request).await?;
        Ok(response.json()?)
    }

    /// Run a GraphQL query and return its `data` payload.
    ///
    /// A response without data is reported as locked content for `resource`.
    async fn graphql<V: Serialize, T: DeserializeOwned>(
        &self,
        query: &str,
        variables: V,
        resource: &str,
    ) -> Result<T, LeetCodeError> {
        let body = serde_json::to_vec(&GraphQlRequest { query, variables })?;

        let http_request = HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/graphql/", self.host),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Referer".to_string(), format!("{}/", self.host)),
                ("X-CSRFToken".to_string(), self.csrf_token.clone()),
                ("Cookie".to_string(), self.cookie()),
            ],
            body,
        };

        let response: GraphQlResponse<T> = self.send(http_request).await?.json()?;
        match response.data {
            Some(data) => Ok(data),
            None if response.errors.is_empty() => Err(LeetCodeError::Locked(resource.to_string())),
            None => Err(LeetCodeError::GraphQl(
                response
                    .errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            )),
        }
    }

    /// Fetch percentiles, code and question id for a submission.
    pub async fn submission_details(&self, id: i64) -> Result<SubmissionDetail, LeetCodeError> {
        let resource = format!("submission {}", id);
        let data: SubmissionDetailsData = self
            .graphql(
                SUBMISSION_DETAILS_QUERY,
                SubmissionIdVariables { submission_id: id },
                &resource,
            )
            .await?;

        let payload = data
            .submission_details
            .ok_or(LeetCodeError::Locked(resource))?;

        tracing::debug!(id, "Got details for submission");
        Ok(to_submission_detail(payload))
    }

    /// Fetch the HTML problem statement for a question.
    ///
    /// Returns `Ok(None)` when the question exists but has no content.
    pub async fn question_content(&self, title_slug: &str) -> Result<Option<String>, LeetCodeError> {
        let resource = format!("question {}", title_slug);
        let data: QuestionData = self
            .graphql(
                QUESTION_CONTENT_QUERY,
                TitleSlugVariables { title_slug },
                &resource,
            )
            .await?;

        let question = data.question.ok_or(LeetCodeError::Locked(resource))?;
        Ok(question.content.filter(|c| !c.is_empty()))
    }
}

#[async_trait]
impl SubmissionSource for LeetCodeClient {
    async fn fetch_submissions_page(
        &self,
        request: &PageRequest,
    ) -> platform::Result<SubmissionPage> {
        self.list_submissions(request)
            .await
            .map(to_submission_page)
            .map_err(PlatformError::from)
    }

    async fn fetch_submission_detail(&self, id: i64) -> platform::Result<SubmissionDetail> {
        self.submission_details(id)
            .await
            .map_err(PlatformError::from)
    }

    async fn fetch_question_content(&self, title_slug: &str) -> platform::Result<Option<String>> {
        self.question_content(title_slug)
            .await
            .map_err(PlatformError::from)
    }
}
