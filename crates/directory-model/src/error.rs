use thiserror::Error;

/// Errors raised when parsing model values from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown sort key: {0} (expected one of name-asc, name-desc, employees-asc, employees-desc, founded-asc, founded-desc)")]
    UnknownSortKey(String),
    #[error("unknown filter field: {0} (expected location or industry)")]
    UnknownFilterField(String),
    #[error("unknown view mode: {0} (expected card or table)")]
    UnknownViewMode(String),
    #[error("unknown theme: {0} (expected light or dark)")]
    UnknownTheme(String),
    #[error("record id must not be empty")]
    EmptyRecordId,
}

pub type Result<T> = std::result::Result<T, ModelError>;
