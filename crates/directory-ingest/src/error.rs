//! Fetch error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reaching or decoding the record source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The HTTP request could not be completed.
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// A local source file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or a record is malformed.
    #[error("failed to parse companies document: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but neither an array nor an object with a `companies` array.
    #[error("unexpected companies document: {found}")]
    UnexpectedShape { found: &'static str },
}

impl FetchError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } => {
                "Could not reach the company directory. Check your connection and try again."
                    .to_string()
            }
            Self::Status { status, .. } => {
                format!("The company directory is unavailable right now (HTTP {status}).")
            }
            Self::Io { path, .. } => {
                format!("Could not read the company data file at {}.", path.display())
            }
            Self::Parse { .. } | Self::UnexpectedShape { .. } => {
                "The company data could not be understood.".to_string()
            }
        }
    }
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
