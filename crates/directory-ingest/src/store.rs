//! The session's record snapshot, primed from cache and revalidated from
//! the source.
//!
//! Opening the store presents any cached snapshot immediately. A refresh
//! swaps in the fresh records and rewrites the cache; a failed refresh keeps
//! serving whatever snapshot is already visible.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use directory_model::{CACHE_KEY, Record};
use directory_persistence::Persistence;

use crate::document::{encode_cache_document, parse_document};
use crate::error::{FetchError, Result};
use crate::source::RecordSource;

/// Where the visible snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    Cache,
    Fetched,
}

/// An immutable set of records plus identity metadata.
#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Arc<[Record]>,
    version: u64,
    fingerprint: String,
    origin: SnapshotOrigin,
    fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Shared handle to the records, cheap to clone.
    pub fn shared(&self) -> Arc<[Record]> {
        Arc::clone(&self.records)
    }

    /// Session-local version; changes only when record content changes.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// SHA-256 of the canonical JSON encoding of the records.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn origin(&self) -> SnapshotOrigin {
        self.origin
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}

/// Loading state of the store.
#[derive(Debug, Clone)]
pub enum LoadStatus {
    /// A fetch is outstanding; any cached snapshot is being served.
    Loading,
    /// A snapshot is authoritative.
    Ready,
    /// The fetch failed and there is nothing to fall back on.
    Failed(Arc<FetchError>),
}

/// Result of applying a fetch.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// New content replaced the visible snapshot.
    Replaced { version: u64, record_count: usize },
    /// The fetch returned the records already visible.
    Unchanged,
    /// The fetch failed; the previous snapshot is still served.
    ServedStale(Arc<FetchError>),
    /// The fetch failed with no snapshot to fall back on.
    Failed(Arc<FetchError>),
}

/// Holds the visible record snapshot for the session.
#[derive(Debug)]
pub struct RecordStore {
    snapshot: Option<Snapshot>,
    status: LoadStatus,
    next_version: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// An empty store with no snapshot.
    pub fn new() -> Self {
        Self {
            snapshot: None,
            status: LoadStatus::Loading,
            next_version: 1,
        }
    }

    /// Open the store, presenting the cached snapshot if one exists.
    ///
    /// Cache read failures and corrupt cache contents are logged and treated
    /// as an empty cache.
    pub fn open<P: Persistence + ?Sized>(storage: &P) -> Self {
        let mut store = Self::new();
        let cached = match storage.get_durable(CACHE_KEY) {
            Ok(value) => value,
            Err(error) => {
                warn!(key = CACHE_KEY, %error, "could not read cached snapshot");
                None
            }
        };
        let Some(raw) = cached else {
            debug!("no cached snapshot");
            return store;
        };
        match parse_document(&raw) {
            Ok(doc) => {
                let record_count = doc.companies.len();
                store.install(doc.companies, SnapshotOrigin::Cache, doc.fetched_at);
                info!(record_count, "serving cached snapshot");
            }
            Err(error) => {
                warn!(key = CACHE_KEY, %error, "ignoring corrupt cached snapshot");
            }
        }
        store
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Visible records; empty when nothing has loaded.
    pub fn records(&self) -> &[Record] {
        self.snapshot
            .as_ref()
            .map(Snapshot::records)
            .unwrap_or_default()
    }

    /// Version of the visible snapshot, `0` when empty.
    pub fn version(&self) -> u64 {
        self.snapshot.as_ref().map_or(0, Snapshot::version)
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    /// The terminal error, when no snapshot is available.
    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            LoadStatus::Failed(error) => Some(error.as_ref()),
            _ => None,
        }
    }

    /// Mark a fetch as outstanding.
    pub fn begin_refresh(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Apply the result of a fetch.
    ///
    /// On success the snapshot is replaced and durably cached (cache write
    /// failures are logged and ignored). On failure the visible snapshot is
    /// kept.
    pub fn complete_refresh<P: Persistence + ?Sized>(
        &mut self,
        result: Result<Vec<Record>>,
        storage: &mut P,
    ) -> RefreshOutcome {
        match result {
            Ok(records) => {
                self.status = LoadStatus::Ready;
                let fetched_at = Utc::now();
                write_cache(storage, &records, fetched_at);
                let record_count = records.len();
                if self.install(records, SnapshotOrigin::Fetched, Some(fetched_at)) {
                    let version = self.version();
                    info!(record_count, version, "snapshot replaced");
                    RefreshOutcome::Replaced {
                        version,
                        record_count,
                    }
                } else {
                    debug!(record_count, "fetched records match visible snapshot");
                    RefreshOutcome::Unchanged
                }
            }
            Err(error) => {
                let error = Arc::new(error);
                if self.snapshot.is_some() {
                    warn!(%error, "fetch failed, serving stale snapshot");
                    self.status = LoadStatus::Ready;
                    RefreshOutcome::ServedStale(error)
                } else {
                    warn!(%error, "fetch failed with no snapshot to fall back on");
                    self.status = LoadStatus::Failed(Arc::clone(&error));
                    RefreshOutcome::Failed(error)
                }
            }
        }
    }

    /// Fetch from `source` and apply the result.
    pub fn refresh<S, P>(&mut self, source: &S, storage: &mut P) -> RefreshOutcome
    where
        S: RecordSource + ?Sized,
        P: Persistence + ?Sized,
    {
        self.begin_refresh();
        let start = Instant::now();
        let result = source.fetch();
        debug!(
            source = %source.describe(),
            duration_ms = start.elapsed().as_millis(),
            ok = result.is_ok(),
            "fetch finished"
        );
        self.complete_refresh(result, storage)
    }

    /// Install records as the visible snapshot. Returns `false` when the
    /// content matches the current snapshot, which keeps its version.
    fn install(
        &mut self,
        records: Vec<Record>,
        origin: SnapshotOrigin,
        fetched_at: Option<DateTime<Utc>>,
    ) -> bool {
        let fingerprint = fingerprint(&records);
        if let Some(current) = self.snapshot.as_mut()
            && current.fingerprint == fingerprint
        {
            current.origin = origin;
            current.fetched_at = fetched_at.or(current.fetched_at);
            return false;
        }
        let version = self.next_version;
        self.next_version += 1;
        self.snapshot = Some(Snapshot {
            records: records.into(),
            version,
            fingerprint,
            origin,
            fetched_at,
        });
        true
    }
}

fn write_cache<P: Persistence + ?Sized>(storage: &mut P, records: &[Record], at: DateTime<Utc>) {
    let encoded = match encode_cache_document(records, at) {
        Ok(encoded) => encoded,
        Err(error) => {
            warn!(%error, "could not encode snapshot for cache");
            return;
        }
    };
    if let Err(error) = storage.set_durable(CACHE_KEY, &encoded) {
        warn!(key = CACHE_KEY, %error, "could not cache snapshot");
    }
}

fn fingerprint(records: &[Record]) -> String {
    let mut hasher = Sha256::new();
    match serde_json::to_vec(records) {
        Ok(bytes) => hasher.update(&bytes),
        // Record serialization cannot fail; fall back to a debug rendering.
        Err(_) => hasher.update(format!("{records:?}").as_bytes()),
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_model::RecordId;
    use directory_persistence::MemoryStore;

    fn company(id: u64, name: &str) -> Record {
        Record {
            id: RecordId::from(id),
            name: name.to_string(),
            location: "Berlin".to_string(),
            industry: "Retail".to_string(),
            employees: id,
            founded: 2000,
            description: String::new(),
        }
    }

    #[test]
    fn empty_store_has_version_zero() {
        let store = RecordStore::new();
        assert_eq!(store.version(), 0);
        assert!(store.records().is_empty());
        assert!(store.is_loading());
    }

    #[test]
    fn identical_refresh_keeps_version() {
        let mut storage = MemoryStore::new();
        let mut store = RecordStore::new();
        let first = store.complete_refresh(Ok(vec![company(1, "Acme")]), &mut storage);
        assert!(matches!(first, RefreshOutcome::Replaced { version: 1, .. }));
        let second = store.complete_refresh(Ok(vec![company(1, "Acme")]), &mut storage);
        assert!(matches!(second, RefreshOutcome::Unchanged));
        assert_eq!(store.version(), 1);
        let third = store.complete_refresh(Ok(vec![company(2, "Zenith")]), &mut storage);
        assert!(matches!(third, RefreshOutcome::Replaced { version: 2, .. }));
    }

    #[test]
    fn failure_without_snapshot_is_terminal() {
        let mut storage = MemoryStore::new();
        let mut store = RecordStore::new();
        let outcome = store.complete_refresh(
            Err(FetchError::UnexpectedShape { found: "null" }),
            &mut storage,
        );
        assert!(matches!(outcome, RefreshOutcome::Failed(_)));
        assert!(store.error().is_some());
        assert!(store.records().is_empty());
    }

    #[test]
    fn fingerprint_is_stable_hex() {
        let records = vec![company(1, "Acme")];
        let a = fingerprint(&records);
        assert_eq!(a, fingerprint(&records));
        assert_eq!(a.len(), 64);
        assert_ne!(a, fingerprint(&[company(1, "Acme Corp")]));
    }
}
