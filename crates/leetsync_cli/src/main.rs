//! leetsync CLI - mirror accepted LeetCode submissions into a GitHub repository.

mod commands;
mod config;
mod progress;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

use crate::commands::sync::SyncArgs;

#[derive(Parser)]
#[command(name = "leetsync")]
#[command(version)]
#[command(about = "Mirror accepted LeetCode submissions into a GitHub repository")]
#[command(
    long_about = "leetsync commits every accepted LeetCode submission to a GitHub repository, \
one commit per submission, dated at the time it was submitted. The last sync commit in the \
repository history marks where the next run resumes."
)]
#[command(after_long_help = r#"EXAMPLES
    Sync into a repository, credentials from the environment:
        $ leetsync sync --repository octocat/leetcode

    Put problems under a folder and skip percentile lookups:
        $ leetsync sync -r octocat/leetcode -d problems --no-enrich

    Generate shell completions:
        $ leetsync completions bash > ~/.local/share/bash-completion/completions/leetsync

CONFIGURATION
    leetsync reads configuration from:
      1. ~/.config/leetsync/config.toml (or $XDG_CONFIG_HOME/leetsync/config.toml)
      2. ./leetsync.toml
      3. Environment variables (LEETSYNC_* prefix, e.g. LEETSYNC_GITHUB__TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    GITHUB_TOKEN            GitHub token with contents write access
    GITHUB_REPOSITORY       Target repository (owner/name)
    LEETCODE_SESSION        LEETCODE_SESSION cookie value
    LEETCODE_CSRF_TOKEN     csrftoken cookie value
    RUST_LOG                Log filter (default: leetsync=info,leetsync_cli=info)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit new accepted submissions to the repository
    Sync(SyncArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Progress bars own the terminal; only warnings interleave with them.
    let default_filter = if Term::stdout().is_term() {
        "warn"
    } else {
        "leetsync=info,leetsync_cli=info"
    };
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(default_filter),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Completions { shell } => commands::meta::handle_completions(shell),
        Commands::Sync(args) => {
            // Load configuration (config files -> env vars -> defaults)
            let config = config::Config::load()?;
            commands::sync::handle_sync(args, &config).await
        }
    }
}
