//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.prdigest.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PRDIGEST_PR`, `PRDIGEST_MAX_PAGES`, ...
//! 4. **Command-line arguments** – `--pr`/`-p`, `--owner`/`-o`, ...
//!
//! # Configuration File
//!
//! ```toml
//! pr = "octocat/hello-world/pull/42"
//! gh_path = "/usr/local/bin/gh"
//! max_pages = 20
//! include_resolved = false
//! full_ci_logs = true
//! ```

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::pagination::DEFAULT_MAX_PAGES;
use crate::github::{DigestError, FetchOptions, LogMode, PullRequestLocator};

const DEFAULT_GH_PATH: &str = "gh";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `PRDIGEST_PR` or `--pr`: Pull request reference
/// - `PRDIGEST_OWNER`, `PRDIGEST_REPO`, `PRDIGEST_NUMBER`: Reference parts
/// - `PRDIGEST_GH_PATH` or `--gh-path`: `gh` executable
/// - `PRDIGEST_MAX_PAGES` or `--max-pages`: Pagination bound
/// - `PRDIGEST_OUTPUT` or `--output`: Output file
///
/// # Example
///
/// ```no_run
/// use prdigest::PrDigestConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = PrDigestConfig::load().expect("failed to load configuration");
/// let locator = config.locator().expect("pull request reference required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PRDIGEST",
    discovery(
        dotfile_name = ".prdigest.toml",
        config_file_name = "prdigest.toml",
        app_name = "prdigest"
    )
)]
pub struct PrDigestConfig {
    /// Pull request reference such as `owner/repo/pull/42` or a GitHub URL.
    ///
    /// Can be provided via:
    /// - CLI: `--pr <REFERENCE>` or `-p <REFERENCE>`
    /// - Environment: `PRDIGEST_PR`
    /// - Config file: `pr = "..."`
    #[ortho_config(cli_short = 'p')]
    pub pr: Option<String>,

    /// Repository owner, used with `repo` and `number` when `pr` is unset.
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name, used with `owner` and `number` when `pr` is unset.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Pull request number, used with `owner` and `repo` when `pr` is unset.
    #[ortho_config(cli_short = 'n')]
    pub number: Option<u64>,

    /// Path to the `gh` executable.
    ///
    /// Defaults to `gh` resolved through `PATH`.
    #[ortho_config()]
    pub gh_path: String,

    /// Maximum number of pages fetched per paginated query.
    ///
    /// Reaching the bound while the forge still reports more pages is an
    /// error. Defaults to 50.
    #[ortho_config()]
    pub max_pages: u32,

    /// Includes review threads that have been marked resolved.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment; use the CLI flag or the config file.
    #[ortho_config()]
    pub include_resolved: bool,

    /// Skips the failed CI checks section.
    #[ortho_config()]
    pub skip_ci_failures: bool,

    /// Keeps whole failed-step logs instead of the failure summary.
    #[ortho_config()]
    pub full_ci_logs: bool,

    /// Writes the digest to this file instead of stdout.
    #[ortho_config()]
    pub output: Option<String>,

    /// Emits JSONL telemetry events to stderr.
    #[ortho_config()]
    pub telemetry: bool,
}

impl Default for PrDigestConfig {
    fn default() -> Self {
        Self {
            pr: None,
            owner: None,
            repo: None,
            number: None,
            gh_path: DEFAULT_GH_PATH.to_owned(),
            max_pages: DEFAULT_MAX_PAGES,
            include_resolved: false,
            skip_ci_failures: false,
            full_ci_logs: false,
            output: None,
            telemetry: false,
        }
    }
}

impl PrDigestConfig {
    /// Checks that the configured values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] when `max_pages` is zero or
    /// `gh_path` is blank.
    pub fn validate(&self) -> Result<(), DigestError> {
        if self.max_pages == 0 {
            return Err(DigestError::Configuration {
                message: "max_pages must be greater than zero".to_owned(),
            });
        }
        if self.gh_path.trim().is_empty() {
            return Err(DigestError::Configuration {
                message: "gh_path must not be empty".to_owned(),
            });
        }
        Ok(())
    }

    /// Resolves the target pull request from `pr` or the discrete parts.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidReference`] when the reference is
    /// malformed or incomplete.
    pub fn locator(&self) -> Result<PullRequestLocator, DigestError> {
        PullRequestLocator::resolve(
            self.pr.as_deref(),
            self.owner.as_deref(),
            self.repo.as_deref(),
            self.number,
        )
    }

    /// Returns the fetch options described by this configuration.
    #[must_use]
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default()
            .with_max_pages(self.max_pages)
            .with_include_resolved(self.include_resolved)
    }

    /// Returns how much of each CI log to keep.
    #[must_use]
    pub const fn log_mode(&self) -> LogMode {
        if self.full_ci_logs {
            LogMode::Full
        } else {
            LogMode::Summary
        }
    }
}

#[cfg(test)]
mod tests;
