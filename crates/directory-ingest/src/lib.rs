//! Record loading for the company directory.
//!
//! - [`RecordSource`] - a read-only endpoint (HTTP or local file) returning a
//!   companies document
//! - [`RecordStore`] - the session snapshot, served from cache while a fetch
//!   is outstanding and replaced when the fetch succeeds

pub mod document;
pub mod error;
pub mod source;
pub mod store;

pub use document::{CompaniesDocument, encode_cache_document, parse_document};
pub use error::{FetchError, Result};
pub use source::{
    DEFAULT_HTTP_TIMEOUT, FileSource, HttpSource, RecordSource, source_for_location,
};
pub use store::{LoadStatus, RecordStore, RefreshOutcome, Snapshot, SnapshotOrigin};
