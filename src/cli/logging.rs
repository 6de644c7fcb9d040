//! File-backed `tracing` subscriber.
//!
//! The terminal belongs to the TUI, so log output only goes to a file and
//! nothing is installed when no log file is configured.

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use runcompare::RunCompareConfig;

use super::CliError;

const FALLBACK_FILTER: &str = "info";

/// Installs the global subscriber when `log_file` is configured.
///
/// # Errors
///
/// Returns [`CliError::File`] when the log file cannot be opened and
/// [`CliError::Logging`] when a subscriber is already installed.
pub fn init(config: &RunCompareConfig) -> Result<(), CliError> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(());
    };
    let file = open_append(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_for(&config.log_filter))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| CliError::Logging {
            message: error.to_string(),
        })
}

/// Parses `directive`, falling back to `info` when it is invalid.
pub fn filter_for(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Opens `path` for appending, creating it when missing.
///
/// # Errors
///
/// Returns [`CliError::File`] when the file cannot be opened.
pub fn open_append(path: &str) -> Result<File, CliError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| CliError::File {
            path: path.to_owned(),
            message: error.to_string(),
        })
}
