//! Shared retry utilities for remote operations.
//!
//! Every retried call in a sync (later feed pages, detail lookups, git writes)
//! uses the same schedule: exponential backoff starting at one second with a
//! factor of three, so the waits are 1s, 3s, 9s, 27s and 81s.

use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};

use crate::platform::short_error_message;
use crate::sync::{
    BACKOFF_FACTOR, INITIAL_BACKOFF_MS, MAX_RETRIES, ProgressCallback, SyncProgress, emit,
};

/// Configuration for retry operations.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Delay before the first retry.
    pub min_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub factor: f32,
    /// Maximum number of retry attempts.
    pub max_retries: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(INITIAL_BACKOFF_MS),
            factor: BACKOFF_FACTOR,
            max_retries: MAX_RETRIES,
        }
    }
}

impl RetryConfig {
    /// Longest delay this schedule can produce.
    #[must_use]
    pub fn max_delay(&self) -> Duration {
        let exponent = i32::try_from(self.max_retries.saturating_sub(1)).unwrap_or(i32::MAX);
        self.min_delay.mul_f32(self.factor.max(1.0).powi(exponent))
    }

    /// Build an exponential backoff strategy from this configuration.
    ///
    /// No jitter: every run waits exactly 1s, 3s, 9s and so on.
    #[must_use]
    pub fn into_backoff(self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay())
            .with_factor(self.factor)
            .with_max_times(self.max_retries)
    }
}

/// Execute an operation, retrying errors that `is_retryable` accepts.
///
/// - Tracks retry attempts with an atomic counter
/// - Sleeps on the tokio clock between attempts
/// - Reports each backoff via the progress callback and `tracing`
///
/// Errors rejected by `is_retryable` are returned immediately, as is the last
/// error once `config.max_retries` retries are used up.
pub async fn with_retry<T, E, F, Fut, IsRetryable>(
    mut operation: F,
    config: &RetryConfig,
    is_retryable: IsRetryable,
    operation_name: &str,
    on_progress: Option<&ProgressCallback>,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error,
    IsRetryable: Fn(&E) -> bool,
{
    // Track attempt number for progress reporting
    let attempt = AtomicU32::new(0);

    let retry_op = || {
        attempt.fetch_add(1, Ordering::SeqCst);
        operation()
    };

    retry_op
        .retry(config.clone().into_backoff())
        .notify(|err, dur| {
            let current_attempt = attempt.load(Ordering::SeqCst);
            emit(
                on_progress,
                SyncProgress::RetryBackoff {
                    operation: operation_name.to_string(),
                    retry_after_ms: u64::try_from(dur.as_millis()).unwrap_or(u64::MAX),
                    attempt: current_attempt,
                },
            );
            tracing::debug!(
                "{} failed, retrying in {:?} (attempt {}): {}",
                operation_name,
                dur,
                current_attempt,
                short_error_message(err)
            );
        })
        .when(|err| is_retryable(err))
        .await
}
