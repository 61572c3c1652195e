//! Data model for the company directory.
//!
//! Records are immutable once loaded. Query parameters live in
//! [`QueryState`] and only change through its setters, which report whether
//! anything actually changed so callers can decide when to reset pagination.

pub mod badges;
pub mod constants;
pub mod error;
pub mod preferences;
pub mod query;
pub mod record;

pub use badges::{CompanyStatus, GrowthTrend};
pub use constants::{
    CACHE_KEY, CURRENT_PAGE_KEY, DEFAULT_EXPORT_FILENAME, DEFAULT_PAGE_SIZE,
    DEFAULT_SEARCH_DEBOUNCE_MS, EXPORT_HEADERS, FAVORITES_KEY, THEME_KEY, VIEW_MODE_KEY,
};
pub use error::{ModelError, Result};
pub use preferences::{Theme, ViewMode};
pub use query::{FilterField, QueryState, SortDirection, SortField, SortKey};
pub use record::{Record, RecordId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accepts_numeric_and_string_ids() {
        let json = r#"[
            {"id": 1, "name": "Acme", "location": "Berlin", "industry": "Retail",
             "employees": 100, "founded": 1990, "description": "Shops"},
            {"id": "z-2", "name": "Zenith", "location": "Oslo", "industry": "Energy",
             "employees": 50, "founded": 2005}
        ]"#;
        let records: Vec<Record> = serde_json::from_str(json).expect("parse records");
        assert_eq!(records[0].id.as_str(), "1");
        assert_eq!(records[1].id.as_str(), "z-2");
        assert_eq!(records[1].description, "");
    }

    #[test]
    fn query_state_round_trips_through_json() {
        let mut query = QueryState::default();
        query.set_location(Some("Berlin".to_string()));
        query.set_sort_key(SortKey::FoundedDesc);
        let json = serde_json::to_string(&query).expect("serialize query");
        let round: QueryState = serde_json::from_str(&json).expect("deserialize query");
        assert_eq!(round, query);
    }
}
