//! CLI wiring for the comparison TUI.
//!
//! - [`logging`]: File-backed `tracing` subscriber
//! - [`compare_tui`]: Catalog selection and the interactive comparison

use ortho_config::OrthoConfig;
use thiserror::Error;

use runcompare::RunCompareConfig;
use runcompare::catalog::error::CatalogError;

pub mod compare_tui;
pub mod logging;

/// Errors that end the program.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration or catalog access failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A log or telemetry file could not be opened.
    #[error("could not open {path}: {message}")]
    File {
        /// Path that was opened.
        path: String,
        /// Error detail from the operating system.
        message: String,
    },

    /// The `tracing` subscriber could not be installed.
    #[error("could not initialise logging: {message}")]
    Logging {
        /// Error detail from `tracing-subscriber`.
        message: String,
    },

    /// The terminal interface failed to start or crashed.
    #[error("terminal interface failed: {message}")]
    Interface {
        /// Error detail from bubbletea-rs.
        message: String,
    },
}

/// Loads configuration, installs logging, and runs the comparison.
///
/// # Errors
///
/// Returns [`CliError`] when configuration is incomplete, the catalog cannot
/// be reached, or the terminal interface fails.
pub async fn run() -> Result<(), CliError> {
    let config = RunCompareConfig::load().map_err(|error| CatalogError::Configuration {
        message: error.to_string(),
    })?;
    logging::init(&config)?;
    compare_tui::run(&config).await
}
