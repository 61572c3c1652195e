//! Query engine error types.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid user input for a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid page number: {0} (expected a positive integer)")]
    InvalidPage(String),
}

/// CSV export failure.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV row")]
    Csv(#[from] csv::Error),

    #[error("failed to write export file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Csv(_) => "The export could not be encoded as CSV.".to_string(),
            Self::Io { path, .. } => {
                format!("Could not write the export to {}", path.display())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;

/// Parse a 1-based page number typed by the user.
pub fn parse_page(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(QueryError::InvalidPage(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_numbers_must_be_positive() {
        assert_eq!(parse_page(" 3 "), Ok(3));
        assert_eq!(parse_page("0"), Err(QueryError::InvalidPage("0".to_string())));
        assert!(parse_page("two").is_err());
    }
}
