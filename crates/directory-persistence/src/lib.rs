//! Key/value storage for the company directory.
//!
//! The engine never touches a concrete store directly. It depends on the
//! [`Persistence`] trait, which exposes two scopes:
//!
//! - **Durable** storage survives a full application restart (favorites,
//!   view mode, theme, cached record snapshot).
//! - **Session** storage survives navigation within a session but not a
//!   restart (current page).
//!
//! # Implementations
//!
//! - [`MemoryStore`] - in-process maps, used by tests and as the fallback
//! - [`FileStore`] - one JSON document per scope on disk
//! - [`FallbackStore`] - wraps any store and keeps failed writes in memory
//!   so a broken backend degrades instead of failing the caller
//!
//! # Example
//!
//! ```ignore
//! use directory_persistence::{FallbackStore, FileStore, Persistence};
//!
//! let mut store = FallbackStore::new(FileStore::open_default()?);
//! store.set_durable("theme", "\"dark\"")?;
//! assert_eq!(store.get_durable("theme")?.as_deref(), Some("\"dark\""));
//! ```

mod adapter;
mod error;
mod fallback;
mod file;
mod json;
mod memory;

pub use adapter::{Persistence, Scope};
pub use error::{Result, StorageError};
pub use fallback::FallbackStore;
pub use file::{FileStore, ScopeFile, default_durable_dir, default_session_dir};
pub use json::{load_json, save_json};
pub use memory::MemoryStore;
