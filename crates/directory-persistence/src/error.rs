//! Storage error types.
//!
//! Storage failures are never fatal to the engine. Callers log them and
//! fall back to in-memory or default behavior, so every variant carries
//! enough context for a useful log line.

use std::path::PathBuf;
use thiserror::Error;

use crate::Scope;

/// Storage operation error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend is disabled or could not be located.
    #[error("{scope} storage is unavailable: {reason}")]
    Unavailable { scope: Scope, reason: String },

    /// The write would exceed the backend's size limit.
    #[error("{scope} storage quota exceeded writing {key} ({size} bytes, limit {quota})")]
    QuotaExceeded {
        scope: Scope,
        key: String,
        size: usize,
        quota: usize,
    },

    /// File I/O error.
    #[error("failed to {operation} storage file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be encoded or decoded.
    #[error("failed to (de)serialize stored value for {key}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unavailable { scope, .. } => {
                format!("{scope} storage is not available; changes will not be remembered.")
            }
            Self::QuotaExceeded { key, .. } => {
                format!("Storage is full; '{key}' will only be kept for this session.")
            }
            Self::Io { path, .. } => {
                format!("Could not access the storage file at {}", path.display())
            }
            Self::Serialization { key, .. } => {
                format!("The saved value for '{key}' is corrupted and was ignored.")
            }
        }
    }

    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
