//! Query engine for the company directory.
//!
//! [`DirectoryEngine`] owns the record snapshot, the active query, the
//! favorites overlay, and the current page, and derives the visible result
//! set from them. The building blocks are usable on their own:
//!
//! - [`pipeline`] - filter, sort, and favorites restriction
//! - [`facets`] - distinct location and industry values
//! - [`paginator`] - page windows and navigation controls
//! - [`debounce`] - deadline-driven search input
//! - [`export`] - CSV output of the visible results

pub mod collate;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod export;
pub mod facets;
pub mod favorites;
mod memo;
pub mod paginator;
pub mod pipeline;
pub mod stats;

pub use collate::compare_names;
pub use debounce::{DEFAULT_DEBOUNCE, DebouncedInput};
pub use engine::{DirectoryEngine, EngineConfig, PageInfo};
pub use error::{ExportError, QueryError, Result, parse_page};
pub use export::{export_to_path, to_csv_string, write_csv};
pub use facets::{FacetSet, extract_facets};
pub use favorites::Favorites;
pub use paginator::{PageItem, Paginator, page_count, page_numbers, paginate};
pub use pipeline::{apply, compare_records, derive, filter_sort, matches};
pub use stats::{DirectoryStats, ResultScope};
