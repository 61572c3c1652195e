//! Storage keys and engine defaults shared across crates.

/// Durable key holding the last successfully fetched record snapshot.
pub const CACHE_KEY: &str = "companiesData";

/// Durable key holding the favorites set.
pub const FAVORITES_KEY: &str = "favoriteCompanies";

/// Durable key holding the card/table view preference.
pub const VIEW_MODE_KEY: &str = "viewMode";

/// Durable key holding the light/dark theme preference.
pub const THEME_KEY: &str = "theme";

/// Session key holding the current page number.
pub const CURRENT_PAGE_KEY: &str = "currentPage";

/// Records shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Quiet interval before typed search input becomes effective.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Column header order for CSV export.
pub const EXPORT_HEADERS: [&str; 5] = ["Name", "Location", "Industry", "Employees", "Founded"];

/// File name suggested for CSV export.
pub const DEFAULT_EXPORT_FILENAME: &str = "companies.csv";
