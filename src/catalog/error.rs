//! Error types exposed by the run catalog layer.

use thiserror::Error;

/// Errors surfaced while configuring or talking to a run catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The configuration lacks a value the selected catalog needs.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A base URL or endpoint could not be parsed or joined.
    #[error("catalog URL is invalid: {0}")]
    InvalidUrl(String),

    /// Networking failed while calling the results server.
    #[error("network error talking to the results server: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The results server answered with a non-success status.
    #[error("results server returned {status} for {operation}: {message}")]
    Api {
        /// Operation that was being performed (e.g. `run tree`).
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// A response or export file could not be decoded.
    #[error("could not decode {operation}: {message}")]
    Decode {
        /// What was being decoded.
        operation: String,
        /// Decoder error detail.
        message: String,
    },

    /// The requested run does not exist in the catalog.
    #[error("run not found: {run_id}")]
    RunNotFound {
        /// Identifier that was looked up.
        run_id: String,
    },

    /// The requested media body does not exist in the catalog.
    #[error("media not found for test {test_id}")]
    MediaNotFound {
        /// Test identifier that was looked up.
        test_id: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl CatalogError {
    /// Builds a decode error for the given operation.
    pub(crate) fn decode(operation: &str, error: &impl std::fmt::Display) -> Self {
        Self::Decode {
            operation: operation.to_owned(),
            message: error.to_string(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return Self::Decode {
                operation: "response body".to_owned(),
                message: error.to_string(),
            };
        }
        Self::Network {
            message: error.to_string(),
        }
    }
}
