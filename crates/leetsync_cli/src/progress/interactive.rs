use std::sync::Mutex;
use std::time::Duration;

use leetsync::sync::SyncProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Bars created lazily as the run reaches each stage.
#[derive(Default)]
struct ProgressState {
    fetch_bar: Option<ProgressBar>,
    commit_bar: Option<ProgressBar>,
    /// Kept submission count, known once fetching completes.
    kept: usize,
}

/// Interactive progress reporter using indicatif.
pub struct InteractiveReporter {
    multi: MultiProgress,
    state: Mutex<ProgressState>,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            state: Mutex::new(ProgressState::default()),
        }
    }

    fn fetch_bar(&self, state: &mut ProgressState) -> ProgressBar {
        state
            .fetch_bar
            .get_or_insert_with(|| {
                let bar = self.multi.add(ProgressBar::new_spinner());
                bar.set_style(Self::counter_style());
                bar.set_prefix(format!("{:10}", "leetcode"));
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            })
            .clone()
    }

    fn commit_bar(&self, state: &mut ProgressState) -> ProgressBar {
        let kept = state.kept;
        state
            .commit_bar
            .get_or_insert_with(|| {
                let bar = self.multi.add(ProgressBar::new(kept as u64));
                bar.set_style(Self::bar_style());
                bar.set_prefix(format!("{:10}", "github"));
                bar
            })
            .clone()
    }

    pub fn handle(&self, event: SyncProgress) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        match event {
            SyncProgress::WatermarkResolved {
                cutoff,
                author,
                found_sync_commit,
            } => {
                let line = if found_sync_commit {
                    format!("Resuming after {} as {}", cutoff, author)
                } else {
                    format!("No previous sync commit, syncing full history as {}", author)
                };
                let _ = self.multi.println(line);
            }

            SyncProgress::FetchingPage { offset } => {
                let bar = self.fetch_bar(&mut state);
                bar.set_message(format!("Fetching submissions from offset {}...", offset));
            }

            SyncProgress::FetchedPage {
                count,
                kept_so_far,
                ..
            } => {
                let bar = self.fetch_bar(&mut state);
                bar.inc(count as u64);
                bar.set_message(format!("submissions read, {} new", kept_so_far));
            }

            SyncProgress::ReachedWatermark { .. } => {
                let bar = self.fetch_bar(&mut state);
                bar.set_message("Reached last synced submission");
            }

            SyncProgress::FetchComplete { fetched, kept } => {
                state.kept = kept;
                let bar = self.fetch_bar(&mut state);
                bar.set_style(Self::done_style());
                bar.finish_with_message(format!("{} submissions read, {} new", fetched, kept));
            }

            SyncProgress::TargetBranch { branch } => {
                let bar = self.commit_bar(&mut state);
                bar.set_message(format!("Committing to {}", branch));
            }

            SyncProgress::RetryBackoff {
                operation,
                retry_after_ms,
                attempt,
            } => {
                let line = format!(
                    "{} failed, retry {} in {:.1}s",
                    operation,
                    attempt,
                    retry_after_ms as f64 / 1000.0
                );
                match state.commit_bar.as_ref().or(state.fetch_bar.as_ref()) {
                    Some(bar) => bar.set_message(line),
                    None => {
                        let _ = self.multi.println(line);
                    }
                }
            }

            SyncProgress::Enriched { title, .. } => {
                let bar = self.commit_bar(&mut state);
                bar.set_message(title);
            }

            SyncProgress::SkippedLocked { title, .. } => {
                let bar = self.commit_bar(&mut state);
                bar.inc(1);
                let _ = self.multi.println(format!("Skipped {} (locked)", title));
            }

            SyncProgress::Committed { title, sha, .. } => {
                let bar = self.commit_bar(&mut state);
                bar.inc(1);
                let short = sha.get(..7).unwrap_or(&sha);
                bar.set_message(format!("{} {}", short, title));
            }

            SyncProgress::SyncComplete { synced, skipped } => {
                if let Some(bar) = state.commit_bar.as_ref() {
                    bar.set_style(Self::done_bar_style());
                    bar.finish_with_message(format!("{} committed, {} skipped", synced, skipped));
                }
            }

            _ => {}
        }
    }

    pub fn finish(&self) {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        for bar in [&state.fetch_bar, &state.commit_bar].into_iter().flatten() {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }

    fn counter_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.green} {pos:>4} {msg}")
            .expect("Invalid template")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }

    fn done_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {msg:.green}")
            .expect("Invalid template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid template")
            .progress_chars("█▓░")
    }

    fn done_bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.green}] {pos:>3}/{len:3} {msg:.green}")
            .expect("Invalid template")
            .progress_chars("█▓░")
    }
}
