//! Configuration file support for leetsync.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags (each also bound to its conventional environment variable,
//!    e.g. `GITHUB_TOKEN`, `LEETCODE_SESSION`)
//! 2. Environment variables prefixed with `LEETSYNC_`, using `__` to nest
//!    (e.g. `LEETSYNC_LEETCODE__CSRF_TOKEN`)
//! 3. Config file (./leetsync.toml, then ~/.config/leetsync/config.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."             # or GITHUB_TOKEN
//! repository = "octocat/leetcode"  # or GITHUB_REPOSITORY
//!
//! [leetcode]
//! session = "..."               # LEETCODE_SESSION cookie
//! csrf_token = "..."            # csrftoken cookie
//!
//! [sync]
//! filter_duplicate_secs = 86400
//! destination_folder = "problems"
//! verbose = true                # fetch percentiles and question ids
//! commit_header = "Sync LeetCode submission"
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, ConfigBuilder as Builder, Environment, File, FileFormat};
use config::builder::DefaultState;
use directories::ProjectDirs;
use leetsync::sync::{DEFAULT_COMMIT_HEADER, DEFAULT_FILTER_DUPLICATE_SECS};
use serde::Deserialize;
use thiserror::Error;

/// Errors found while resolving configuration, before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {what}. Pass {flag}, set {env}, or add it to leetsync.toml")]
    Missing {
        what: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("Invalid repository {0:?}, expected owner/name")]
    InvalidRepository(String),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target repository configuration.
    pub github: GitHubConfig,
    /// LeetCode credentials.
    pub leetcode: LeetCodeConfig,
    /// Default sync options.
    pub sync: SyncConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Token with `contents: write` on the repository.
    pub token: Option<String>,
    /// Repository in `owner/name` form.
    pub repository: Option<String>,
}

/// LeetCode configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LeetCodeConfig {
    /// Value of the `LEETCODE_SESSION` cookie.
    pub session: Option<String>,
    /// Value of the `csrftoken` cookie.
    pub csrf_token: Option<String>,
}

/// Default sync options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Resubmissions of the same problem and language closer than this are dropped.
    pub filter_duplicate_secs: i64,
    /// Folder in the repository for problem directories.
    pub destination_folder: Option<String>,
    /// Fetch percentiles, canonical code and question ids.
    pub verbose: bool,
    /// Commit message header; also identifies sync commits.
    pub commit_header: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            filter_duplicate_secs: DEFAULT_FILTER_DUPLICATE_SECS,
            destination_folder: None,
            verbose: true,
            commit_header: DEFAULT_COMMIT_HEADER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/leetsync/config.toml)
    /// 3. Local config file (./leetsync.toml)
    /// 4. Environment variables with LEETSYNC_ prefix
    ///
    /// A file that fails to parse or a value of the wrong type is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "leetsync") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let local_config = PathBuf::from("leetsync.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./leetsync.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        Self::build(builder.add_source(env_source()))
    }

    fn build(builder: Builder<DefaultState>) -> Result<Self, ConfigError> {
        Ok(builder.build()?.try_deserialize::<Config>()?)
    }
}

/// `LEETSYNC_` variables; `__` separates table and key so keys may contain `_`.
fn env_source() -> Environment {
    Environment::with_prefix("LEETSYNC")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Pick the flag value over the configured one, treating blanks as unset.
pub fn pick(flag: Option<&str>, configured: Option<&str>) -> Option<String> {
    flag.or(configured)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml_content: &str) -> Config {
        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        settings.try_deserialize().unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert!(config.github.repository.is_none());
        assert!(config.leetcode.session.is_none());
        assert!(config.leetcode.csrf_token.is_none());
    }

    #[test]
    fn test_sync_config_default() {
        let config = SyncConfig::default();
        assert_eq!(config.filter_duplicate_secs, 86_400);
        assert!(config.destination_folder.is_none());
        assert!(config.verbose);
        assert_eq!(config.commit_header, "Sync LeetCode submission");
    }

    #[test]
    fn test_config_full_file() {
        let config = from_toml(
            r#"
            [github]
            token = "ghp_abc"
            repository = "octocat/leetcode"

            [leetcode]
            session = "sess"
            csrf_token = "csrf"

            [sync]
            filter_duplicate_secs = 3600
            destination_folder = "problems"
            verbose = false
            commit_header = "lc"
        "#,
        );

        assert_eq!(config.github.token.as_deref(), Some("ghp_abc"));
        assert_eq!(config.github.repository.as_deref(), Some("octocat/leetcode"));
        assert_eq!(config.leetcode.session.as_deref(), Some("sess"));
        assert_eq!(config.leetcode.csrf_token.as_deref(), Some("csrf"));
        assert_eq!(config.sync.filter_duplicate_secs, 3600);
        assert_eq!(config.sync.destination_folder.as_deref(), Some("problems"));
        assert!(!config.sync.verbose);
        assert_eq!(config.sync.commit_header, "lc");
    }

    #[test]
    fn test_config_partial_sync_table_keeps_defaults() {
        let config = from_toml(
            r#"
            [sync]
            destination_folder = "leetcode"
        "#,
        );

        assert_eq!(config.sync.destination_folder.as_deref(), Some("leetcode"));
        assert_eq!(config.sync.filter_duplicate_secs, 86_400);
        assert!(config.sync.verbose);
    }

    #[test]
    fn test_config_merging_order() {
        let base_toml = r#"
            [sync]
            filter_duplicate_secs = 60
            commit_header = "base"
        "#;

        let override_toml = r#"
            [sync]
            filter_duplicate_secs = 120
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(base_toml, FileFormat::Toml))
            .add_source(config::File::from_str(override_toml, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();
        assert_eq!(config.sync.filter_duplicate_secs, 120);
        assert_eq!(config.sync.commit_header, "base");
    }

    #[test]
    fn test_env_source_nests_on_double_underscore() {
        let source = env_source().source(Some(
            [
                ("LEETSYNC_LEETCODE__CSRF_TOKEN".to_string(), "csrf".to_string()),
                ("LEETSYNC_SYNC__FILTER_DUPLICATE_SECS".to_string(), "60".to_string()),
                ("LEETSYNC_GITHUB__REPOSITORY".to_string(), "me/solutions".to_string()),
            ]
            .into_iter()
            .collect(),
        ));

        let config = Config::build(ConfigBuilder::builder().add_source(source)).unwrap();
        assert_eq!(config.leetcode.csrf_token.as_deref(), Some("csrf"));
        assert_eq!(config.sync.filter_duplicate_secs, 60);
        assert_eq!(config.github.repository.as_deref(), Some("me/solutions"));
    }

    #[test]
    fn test_mistyped_value_is_an_error_not_a_reset() {
        let toml = r#"
            [github]
            token = "ghp_abc"
            repository = "octocat/leetcode"

            [leetcode]
            session = "sess"
            csrf_token = "csrf"

            [sync]
            filter_duplicate_secs = "one day"
            destination_folder = "problems"
        "#;

        let result = Config::build(
            ConfigBuilder::builder().add_source(config::File::from_str(toml, FileFormat::Toml)),
        );

        let err = result.expect_err("a mistyped window must not fall back to defaults");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let result = Config::build(
            ConfigBuilder::builder()
                .add_source(config::File::from_str("[sync\nverbose = true", FileFormat::Toml)),
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_config_unknown_fields_ignored() {
        let config = from_toml(
            r#"
            [sync]
            verbose = false
            unknown_field = "should be ignored"
        "#,
        );
        assert!(!config.sync.verbose);
    }

    #[test]
    fn test_pick_prefers_flag_and_ignores_blanks() {
        assert_eq!(pick(Some("flag"), Some("file")), Some("flag".to_string()));
        assert_eq!(pick(None, Some("file")), Some("file".to_string()));
        assert_eq!(pick(Some("  "), Some("file")), None);
        assert_eq!(pick(None, None), None);
    }

    #[test]
    fn test_missing_error_names_the_flag() {
        let err = ConfigError::Missing {
            what: "GitHub token",
            flag: "--github-token",
            env: "GITHUB_TOKEN",
        };
        let message = err.to_string();
        assert!(message.contains("--github-token"));
        assert!(message.contains("GITHUB_TOKEN"));
    }
}
