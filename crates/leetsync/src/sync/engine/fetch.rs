use super::filter::DedupFilter;
use crate::platform::{PageRequest, PlatformError, Submission, SubmissionPage, SubmissionSource};
use crate::retry::with_retry;
use crate::sync::progress::{ProgressCallback, SyncProgress, emit};
use crate::sync::types::SyncOptions;

/// Submissions that survived the filter, plus how many were read.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Kept submissions, newest first.
    pub kept: Vec<Submission>,
    /// Submissions read from the feed.
    pub fetched: usize,
}

async fn fetch_page<S: SubmissionSource + ?Sized>(
    source: &S,
    request: &PageRequest,
    first: bool,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SubmissionPage, PlatformError> {
    // Credential problems surface on the first page; fail fast there.
    if first {
        return source.fetch_submissions_page(request).await;
    }

    tokio::time::sleep(options.page_delay).await;
    with_retry(
        || source.fetch_submissions_page(request),
        &options.retry,
        PlatformError::is_transient,
        "fetch submissions page",
        on_progress,
    )
    .await
}

/// Page through the feed until it ends or the filter reaches the watermark.
pub async fn fetch_new_submissions<S: SubmissionSource + ?Sized>(
    source: &S,
    filter: &mut DedupFilter,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<FetchOutcome, PlatformError> {
    let mut outcome = FetchOutcome::default();
    let mut request = PageRequest {
        offset: 0,
        limit: options.page_size,
        last_key: None,
    };

    loop {
        emit(
            on_progress,
            SyncProgress::FetchingPage {
                offset: request.offset,
            },
        );

        let first = request.offset == 0;
        let page = fetch_page(source, &request, first, options, on_progress).await?;
        let count = page.submissions.len();
        outcome.fetched += count;

        let filtered = filter.filter_page(page.submissions);
        outcome.kept.extend(filtered.kept);

        emit(
            on_progress,
            SyncProgress::FetchedPage {
                offset: request.offset,
                count,
                kept_so_far: outcome.kept.len(),
            },
        );

        if filtered.reached_watermark {
            emit(
                on_progress,
                SyncProgress::ReachedWatermark {
                    offset: request.offset,
                },
            );
            break;
        }
        if !page.has_more || count == 0 {
            break;
        }

        request = PageRequest {
            offset: request.offset + options.page_size,
            limit: options.page_size,
            last_key: page.next_key,
        };
    }

    emit(
        on_progress,
        SyncProgress::FetchComplete {
            fetched: outcome.fetched,
            kept: outcome.kept.len(),
        },
    );

    Ok(outcome)
}
