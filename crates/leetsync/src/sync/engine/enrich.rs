use crate::naming::pad_question_id;
use crate::platform::{PlatformError, Submission, SubmissionDetail, SubmissionSource};
use crate::retry::with_retry;
use crate::sync::error::Result;
use crate::sync::progress::{ProgressCallback, SyncProgress, emit};
use crate::sync::types::{EnrichedSubmission, SubmissionStats, SyncOptions};

/// Render a percentile for the commit message.
pub fn format_percentile(percentile: Option<f64>) -> String {
    match percentile {
        Some(p) => format!("{:.2}%", p),
        None => "N/A".to_string(),
    }
}

fn skipped(
    submission: &Submission,
    err: &PlatformError,
    on_progress: Option<&ProgressCallback>,
) -> Option<EnrichedSubmission> {
    tracing::warn!(
        id = submission.id,
        title = %submission.title,
        "Skipping submission with locked content: {}",
        err
    );
    emit(
        on_progress,
        SyncProgress::SkippedLocked {
            id: submission.id,
            title: submission.title.clone(),
            reason: err.to_string(),
        },
    );
    None
}

/// Gather what the commit writer needs for one kept submission.
///
/// Returns `Ok(None)` when the source reports the content as forbidden.
pub async fn enrich<S: SubmissionSource + ?Sized>(
    source: &S,
    submission: Submission,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<Option<EnrichedSubmission>> {
    let detail = if options.enrich {
        let fetched = with_retry(
            || source.fetch_submission_detail(submission.id),
            &options.retry,
            PlatformError::is_transient,
            "fetch submission detail",
            on_progress,
        )
        .await;

        match fetched {
            Ok(detail) => Some(detail),
            Err(err) if err.is_forbidden() => {
                return Ok(skipped(&submission, &err, on_progress));
            }
            Err(err) => return Err(err.into()),
        }
    } else {
        None
    };

    let question_content = match with_retry(
        || source.fetch_question_content(&submission.title_slug),
        &options.retry,
        PlatformError::is_transient,
        "fetch question content",
        on_progress,
    )
    .await
    {
        Ok(content) => content,
        Err(err) if err.is_forbidden() => return Ok(skipped(&submission, &err, on_progress)),
        Err(err) => return Err(err.into()),
    };

    let enriched = match detail {
        Some(SubmissionDetail {
            runtime_percentile,
            memory_percentile,
            code,
            question_id,
        }) => EnrichedSubmission {
            stats: Some(SubmissionStats {
                runtime_percentile: format_percentile(runtime_percentile),
                memory_percentile: format_percentile(memory_percentile),
            }),
            question_id: question_id.as_deref().map(pad_question_id),
            code: code.unwrap_or_else(|| submission.code.clone()),
            question_content,
            submission,
        },
        None => EnrichedSubmission {
            stats: None,
            question_id: None,
            code: submission.code.clone(),
            question_content,
            submission,
        },
    };

    emit(
        on_progress,
        SyncProgress::Enriched {
            id: enriched.submission.id,
            title: enriched.submission.title.clone(),
        },
    );

    Ok(Some(enriched))
}
