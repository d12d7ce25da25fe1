//! Conversion from LeetCode wire types to platform types.

use super::types::{LeetCodeSubmission, SubmissionDetailsPayload, SubmissionsDump};
use crate::platform::{Submission, SubmissionDetail, SubmissionPage};

pub fn to_submission(raw: LeetCodeSubmission) -> Submission {
    Submission {
        id: raw.id,
        title: raw.title,
        title_slug: raw.title_slug,
        lang: raw.lang,
        status_display: raw.status_display,
        timestamp: raw.timestamp,
        runtime: raw.runtime,
        memory: raw.memory,
        code: raw.code,
    }
}

pub fn to_submission_page(dump: SubmissionsDump) -> SubmissionPage {
    SubmissionPage {
        submissions: dump
            .submissions_dump
            .into_iter()
            .map(to_submission)
            .collect(),
        has_more: dump.has_next,
        next_key: dump.last_key.filter(|k| !k.is_empty()),
    }
}

pub fn to_submission_detail(payload: SubmissionDetailsPayload) -> SubmissionDetail {
    let question_id = payload
        .question
        .and_then(|q| q.question_id)
        .and_then(|id| match id {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

    SubmissionDetail {
        runtime_percentile: payload.runtime_percentile,
        memory_percentile: payload.memory_percentile,
        code: payload.code,
        question_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_submission_page_from_listing_json() {
        let dump: SubmissionsDump = serde_json::from_value(json!({
            "submissions_dump": [{
                "id": 1234567,
                "lang": "python3",
                "lang_name": "Python3",
                "time": "2 hours",
                "timestamp": 1700000000,
                "status": 10,
                "status_display": "Accepted",
                "runtime": "52 ms",
                "url": "/submissions/detail/1234567/",
                "is_pending": "Not Pending",
                "title": "Two Sum",
                "memory": "16.4 MB",
                "code": "class Solution: pass",
                "compare_result": "111",
                "title_slug": "two-sum",
                "has_notes": false
            }],
            "has_next": true,
            "last_key": "abc"
        }))
        .expect("listing should deserialize");

        let page = to_submission_page(dump);
        assert!(page.has_more);
        assert_eq!(page.next_key.as_deref(), Some("abc"));
        assert_eq!(page.submissions.len(), 1);

        let submission = &page.submissions[0];
        assert_eq!(submission.id, 1234567);
        assert_eq!(submission.title, "Two Sum");
        assert_eq!(submission.title_slug, "two-sum");
        assert_eq!(submission.timestamp, 1700000000);
        assert!(submission.is_accepted());
    }

    #[test]
    fn test_empty_last_key_is_dropped() {
        let dump: SubmissionsDump = serde_json::from_value(json!({
            "submissions_dump": [],
            "has_next": false,
            "last_key": ""
        }))
        .expect("listing should deserialize");

        let page = to_submission_page(dump);
        assert!(!page.has_more);
        assert!(page.next_key.is_none());
    }

    #[test]
    fn test_question_id_accepts_string_and_number() {
        let from_string: SubmissionDetailsPayload = serde_json::from_value(json!({
            "runtimePercentile": 91.5,
            "memoryPercentile": null,
            "code": "fn main() {}",
            "question": { "questionId": "1" }
        }))
        .expect("detail should deserialize");
        let detail = to_submission_detail(from_string);
        assert_eq!(detail.question_id.as_deref(), Some("1"));
        assert_eq!(detail.runtime_percentile, Some(91.5));
        assert_eq!(detail.memory_percentile, None);

        let from_number: SubmissionDetailsPayload = serde_json::from_value(json!({
            "runtimePercentile": null,
            "memoryPercentile": null,
            "code": null,
            "question": { "questionId": 42 }
        }))
        .expect("detail should deserialize");
        assert_eq!(
            to_submission_detail(from_number).question_id.as_deref(),
            Some("42")
        );
    }
}
