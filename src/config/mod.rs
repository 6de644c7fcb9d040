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
//! 2. **Configuration file** – `.runcompare.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `RUNCOMPARE_API_URL`, `RUNCOMPARE_TEST_ID`,
//!    and so on, plus `RUNCOMPARE_API_TOKEN` as a token fallback
//! 4. **Command-line arguments** – `--api-url`/`-a`, `--test-id`/`-i`, …
//!
//! # Configuration File
//!
//! ```toml
//! api_url = "https://results.example.com/api/"
//! token = "example-token"
//! project = "checkout-service"
//! test_id = "login"
//! request_timeout_seconds = 20
//! log_file = "runcompare.log"
//! log_filter = "runcompare=debug"
//! run_filter = "nightly"
//! telemetry_file = "runcompare-telemetry.jsonl"
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::catalog::error::CatalogError;
use crate::catalog::http::HttpCatalogConfig;
use crate::catalog::models::{Run, TestId};

/// Environment variable consulted when no token is configured.
pub const TOKEN_FALLBACK_ENV: &str = "RUNCOMPARE_API_TOKEN";

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 20;
const DEFAULT_LOG_FILTER: &str = "info";

/// Where runs and trees are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A live results server.
    Http(HttpCatalogConfig),
    /// A JSON export file.
    ExportFile(Utf8PathBuf),
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use runcompare::RunCompareConfig;
///
/// let config = RunCompareConfig::load().expect("failed to load configuration");
/// let target = config.require_test_id().expect("test id required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "RUNCOMPARE",
    discovery(
        dotfile_name = ".runcompare.toml",
        config_file_name = "runcompare.toml",
        app_name = "runcompare"
    )
)]
pub struct RunCompareConfig {
    /// Base URL of the results server REST API.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>` or `-a <URL>`
    /// - Environment: `RUNCOMPARE_API_URL`
    /// - Config file: `api_url = "..."`
    #[ortho_config(cli_short = 'a')]
    pub api_url: Option<String>,

    /// Bearer token sent to the results server.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `RUNCOMPARE_TOKEN` or `RUNCOMPARE_API_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Project whose runs are listed.
    #[ortho_config(cli_short = 'p')]
    pub project: Option<String>,

    /// Test identifier compared across runs.
    #[ortho_config(cli_short = 'i')]
    pub test_id: Option<String>,

    /// JSON catalog export used instead of a results server.
    #[ortho_config(cli_short = 'f')]
    pub catalog_file: Option<String>,

    /// HTTP request timeout in seconds. Defaults to 20.
    ///
    /// Can be provided via `--request-timeout-seconds` or `-T`.
    #[ortho_config(cli_short = 'T')]
    pub request_timeout_seconds: u64,

    /// File that receives log output. Logging is disabled when unset, as
    /// the terminal belongs to the interface.
    #[ortho_config(cli_short = 'l')]
    pub log_file: Option<String>,

    /// `tracing` filter directive applied to log output.
    #[ortho_config(cli_short = 'L')]
    pub log_filter: String,

    /// Only runs whose name contains this text (ignoring case) are offered.
    ///
    /// Can be provided via `--run-filter <TEXT>` or `-r <TEXT>`.
    #[ortho_config(cli_short = 'r')]
    pub run_filter: Option<String>,

    /// File that receives settlement telemetry as JSON lines.
    #[ortho_config(cli_short = 'e')]
    pub telemetry_file: Option<String>,
}

impl Default for RunCompareConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            token: None,
            project: None,
            test_id: None,
            catalog_file: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            run_filter: None,
            telemetry_file: None,
        }
    }
}

impl RunCompareConfig {
    /// Returns the target test identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when no test identifier is
    /// configured or it is blank.
    pub fn require_test_id(&self) -> Result<TestId, CatalogError> {
        self.test_id
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(TestId::new)
            .ok_or_else(|| CatalogError::Configuration {
                message: "test identifier is required (use --test-id or -i)".to_owned(),
            })
    }

    /// Returns the project identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when no project is configured.
    pub fn require_project(&self) -> Result<&str, CatalogError> {
        self.project
            .as_deref()
            .ok_or_else(|| CatalogError::Configuration {
                message: "project is required (use --project or -p)".to_owned(),
            })
    }

    /// Resolves the token from configuration or [`TOKEN_FALLBACK_ENV`].
    #[must_use]
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var(TOKEN_FALLBACK_ENV).ok())
            .filter(|token| !token.is_empty())
    }

    /// The HTTP request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Keeps the runs matching [`RunCompareConfig::run_filter`], in order.
    #[must_use]
    pub fn filter_runs(&self, runs: Vec<Run>) -> Vec<Run> {
        let Some(needle) = self
            .run_filter
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase)
        else {
            return runs;
        };
        runs.into_iter()
            .filter(|run| run.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Determines where runs are loaded from.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when both or neither of
    /// `api_url` and `catalog_file` are set.
    pub fn catalog_source(&self) -> Result<CatalogSource, CatalogError> {
        match (&self.api_url, &self.catalog_file) {
            (Some(_), Some(_)) => Err(CatalogError::Configuration {
                message: "use either --api-url or --catalog-file, not both".to_owned(),
            }),
            (Some(api_url), None) => Ok(CatalogSource::Http(
                HttpCatalogConfig::new(api_url.clone())
                    .with_token(self.resolve_token())
                    .with_timeout(self.request_timeout()),
            )),
            (None, Some(path)) => Ok(CatalogSource::ExportFile(Utf8PathBuf::from(path))),
            (None, None) => Err(CatalogError::Configuration {
                message: "a results server (use --api-url or -a) or a catalog export \
                          (use --catalog-file or -f) is required"
                    .to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests;
