use std::collections::HashMap;

use crate::naming::slug;
use crate::platform::Submission;

/// Result of filtering one feed page.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    /// Submissions kept, in feed order (newest first).
    pub kept: Vec<Submission>,
    /// A submission at or before the cutoff was seen; stop paginating.
    pub reached_watermark: bool,
}

/// Watermark and duplicate filter, folded over the feed pages of one run.
///
/// Keys are `(slug(title), lang)`. Since the feed is newest first, the recorded
/// timestamp for a key is always the newest kept one.
#[derive(Debug)]
pub struct DedupFilter {
    cutoff: i64,
    min_interval: i64,
    recorded: HashMap<(String, String), i64>,
}

impl DedupFilter {
    pub fn new(cutoff: i64, min_interval: i64) -> Self {
        Self {
            cutoff,
            min_interval,
            recorded: HashMap::new(),
        }
    }

    pub fn filter_page(&mut self, page: Vec<Submission>) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        for submission in page {
            if submission.timestamp <= self.cutoff {
                outcome.reached_watermark = true;
                break;
            }
            if !submission.is_accepted() {
                continue;
            }

            let key = (slug(&submission.title), submission.lang.clone());
            if let Some(&recorded) = self.recorded.get(&key)
                && recorded - submission.timestamp < self.min_interval
            {
                tracing::trace!(
                    id = submission.id,
                    title = %submission.title,
                    "Dropping resubmission within duplicate window"
                );
                continue;
            }

            self.recorded.insert(key, submission.timestamp);
            outcome.kept.push(submission);
        }

        outcome
    }
}
