//! Summary counts for the dashboard.

use serde::Serialize;

/// Whether the visible results cover the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultScope {
    All,
    Filtered,
}

impl ResultScope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Filtered => "filtered",
        }
    }
}

/// Dataset and result counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub total_records: usize,
    pub locations: usize,
    pub industries: usize,
    /// Records matching search and filters. Favorites-only does not narrow it.
    pub filtered_count: usize,
    pub favorites_count: usize,
    pub scope: ResultScope,
}

impl DirectoryStats {
    pub fn is_filtered(&self) -> bool {
        self.scope == ResultScope::Filtered
    }
}
