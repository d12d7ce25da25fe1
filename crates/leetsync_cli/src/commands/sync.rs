//! The `sync` command: mirror new accepted submissions into the repository.

use std::sync::Arc;

use console::{Term, style};
use leetsync::github::{GitHubClient, parse_repository};
use leetsync::leetcode::LeetCodeClient;
use leetsync::sync::{SyncOptions, SyncResult, sync_submissions};

use crate::config::{Config, ConfigError, pick};
use crate::progress::ProgressReporter;

/// Options for `leetsync sync`.
///
/// Each flag overrides the matching config file entry.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SyncArgs {
    /// GitHub token with write access to the repository contents
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Target repository as owner/name
    #[arg(short = 'r', long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Value of the LEETCODE_SESSION cookie
    #[arg(long, env = "LEETCODE_SESSION", hide_env_values = true)]
    leetcode_session: Option<String>,

    /// Value of the csrftoken cookie
    #[arg(long, env = "LEETCODE_CSRF_TOKEN", hide_env_values = true)]
    leetcode_csrf_token: Option<String>,

    /// Drop resubmissions of a problem in the same language closer than this (seconds)
    #[arg(short = 'f', long)]
    filter_duplicate_secs: Option<i64>,

    /// Folder in the repository for problem directories
    #[arg(short = 'd', long)]
    destination_folder: Option<String>,

    /// Skip per-submission details (percentiles, question id)
    #[arg(long)]
    no_enrich: bool,

    /// Commit message header, also used to find the last sync commit
    #[arg(long)]
    commit_header: Option<String>,
}

/// Everything a run needs, resolved from flags and config.
#[derive(Debug)]
pub(crate) struct Settings {
    pub github_token: String,
    pub repository: String,
    pub session: String,
    pub csrf_token: String,
    pub options: SyncOptions,
}

fn required(
    value: Option<String>,
    what: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    value.ok_or(ConfigError::Missing { what, flag, env })
}

/// Merge flags over config and validate before anything touches the network.
pub(crate) fn resolve(args: &SyncArgs, config: &Config) -> Result<Settings, ConfigError> {
    let github_token = required(
        pick(args.github_token.as_deref(), config.github.token.as_deref()),
        "GitHub token",
        "--github-token",
        "GITHUB_TOKEN",
    )?;
    let repository = required(
        pick(args.repository.as_deref(), config.github.repository.as_deref()),
        "repository",
        "--repository",
        "GITHUB_REPOSITORY",
    )?;
    let session = required(
        pick(args.leetcode_session.as_deref(), config.leetcode.session.as_deref()),
        "LeetCode session",
        "--leetcode-session",
        "LEETCODE_SESSION",
    )?;
    let csrf_token = required(
        pick(
            args.leetcode_csrf_token.as_deref(),
            config.leetcode.csrf_token.as_deref(),
        ),
        "LeetCode CSRF token",
        "--leetcode-csrf-token",
        "LEETCODE_CSRF_TOKEN",
    )?;

    let (owner, name) = parse_repository(&repository)
        .map_err(|_| ConfigError::InvalidRepository(repository.clone()))?;

    let destination_folder = pick(
        args.destination_folder.as_deref(),
        config.sync.destination_folder.as_deref(),
    )
    .map(|folder| folder.trim_matches('/').to_string())
    .filter(|folder| !folder.is_empty());

    let commit_header = pick(
        args.commit_header.as_deref(),
        Some(config.sync.commit_header.as_str()),
    )
    .unwrap_or_else(|| SyncOptions::default().commit_header);

    let options = SyncOptions {
        filter_duplicate_secs: args
            .filter_duplicate_secs
            .unwrap_or(config.sync.filter_duplicate_secs),
        destination_folder,
        enrich: config.sync.verbose && !args.no_enrich,
        commit_header,
        ..SyncOptions::default()
    };

    Ok(Settings {
        github_token,
        repository: format!("{}/{}", owner, name),
        session,
        csrf_token,
        options,
    })
}

/// Handle `leetsync sync`.
pub async fn handle_sync(args: SyncArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let settings = resolve(&args, config)?;

    let source = LeetCodeClient::new(&settings.session, &settings.csrf_token)?;
    let repo = GitHubClient::new(&settings.github_token, &settings.repository)?;

    tracing::debug!(
        repository = %settings.repository,
        enrich = settings.options.enrich,
        destination = ?settings.options.destination_folder,
        "Starting sync"
    );

    let reporter = Arc::new(ProgressReporter::new());
    let callback = reporter.as_callback();

    let result = sync_submissions(&source, &repo, &settings.options, Some(callback.as_ref())).await;
    reporter.finish();

    let result = result?;
    print_summary(&settings.repository, &result);
    Ok(())
}

fn print_summary(repository: &str, result: &SyncResult) {
    let is_tty = Term::stdout().is_term();

    if result.synced == 0 && result.skipped == 0 {
        if is_tty {
            println!("{} {} is up to date", style("✓").green(), repository);
        } else {
            tracing::info!(repository = %repository, "Up to date");
        }
        return;
    }

    let head = result
        .head
        .as_deref()
        .map(|sha| sha.get(..7).unwrap_or(sha))
        .unwrap_or("unchanged");

    if is_tty {
        println!(
            "{} {} commits to {} ({} skipped), head {}",
            style("✓").green(),
            style(result.synced).bold(),
            repository,
            result.skipped,
            style(head).cyan()
        );
    } else {
        tracing::info!(
            repository = %repository,
            synced = result.synced,
            skipped = result.skipped,
            head = %head,
            "Sync finished"
        );
    }
}
