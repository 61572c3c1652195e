//! Stale-while-revalidate behavior of the record store.

use std::cell::Cell;

use directory_ingest::{
    FetchError, LoadStatus, RecordSource, RecordStore, RefreshOutcome, SnapshotOrigin,
    encode_cache_document, parse_document,
};
use directory_model::{CACHE_KEY, Record, RecordId};
use directory_persistence::{MemoryStore, Persistence};

fn company(id: u64, name: &str) -> Record {
    Record {
        id: RecordId::from(id),
        name: name.to_string(),
        location: "Oslo".to_string(),
        industry: "Energy".to_string(),
        employees: 10 * id,
        founded: 1990 + id as i32,
        description: format!("{name} description"),
    }
}

struct StubSource {
    records: Option<Vec<Record>>,
    calls: Cell<usize>,
}

impl StubSource {
    fn ok(records: Vec<Record>) -> Self {
        Self {
            records: Some(records),
            calls: Cell::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            records: None,
            calls: Cell::new(0),
        }
    }
}

impl RecordSource for StubSource {
    fn describe(&self) -> String {
        "stub".to_string()
    }

    fn fetch(&self) -> directory_ingest::Result<Vec<Record>> {
        self.calls.set(self.calls.get() + 1);
        self.records
            .clone()
            .ok_or(FetchError::Status {
                url: "stub".to_string(),
                status: 503,
            })
    }
}

fn seeded_storage(records: &[Record]) -> MemoryStore {
    let mut storage = MemoryStore::new();
    let cached = encode_cache_document(records, chrono::Utc::now()).expect("encode cache");
    storage.set_durable(CACHE_KEY, &cached).expect("seed cache");
    storage
}

#[test]
fn cached_snapshot_is_visible_before_fetch() {
    let storage = seeded_storage(&[company(1, "Acme")]);
    let store = RecordStore::open(&storage);

    assert!(store.is_loading());
    assert_eq!(store.records().len(), 1);
    let snapshot = store.snapshot().expect("cached snapshot");
    assert_eq!(snapshot.origin(), SnapshotOrigin::Cache);
    assert!(snapshot.fetched_at().is_some());
}

#[test]
fn legacy_array_cache_is_accepted() {
    let mut storage = MemoryStore::new();
    let legacy = serde_json::to_string(&vec![company(4, "Legacy")]).unwrap();
    storage.set_durable(CACHE_KEY, &legacy).unwrap();

    let store = RecordStore::open(&storage);
    assert_eq!(store.records()[0].name, "Legacy");
    assert_eq!(store.snapshot().unwrap().fetched_at(), None);
}

#[test]
fn successful_fetch_replaces_snapshot_and_rewrites_cache() {
    let mut storage = seeded_storage(&[company(1, "Acme")]);
    let mut store = RecordStore::open(&storage);
    let cached_version = store.version();

    let source = StubSource::ok(vec![company(1, "Acme"), company(2, "Zenith")]);
    let outcome = store.refresh(&source, &mut storage);

    assert!(matches!(
        outcome,
        RefreshOutcome::Replaced {
            record_count: 2,
            ..
        }
    ));
    assert_ne!(store.version(), cached_version);
    assert!(matches!(store.status(), LoadStatus::Ready));
    assert_eq!(source.calls.get(), 1);

    let raw = storage.get_durable(CACHE_KEY).unwrap().expect("cache written");
    let cached = parse_document(&raw).expect("cache parses");
    assert_eq!(cached.companies.len(), 2);
}

#[test]
fn failed_fetch_keeps_cached_snapshot() {
    let mut storage = seeded_storage(&[company(1, "Acme")]);
    let mut store = RecordStore::open(&storage);

    let outcome = store.refresh(&StubSource::failing(), &mut storage);

    assert!(matches!(outcome, RefreshOutcome::ServedStale(_)));
    assert!(store.error().is_none(), "stale snapshot stays authoritative");
    assert_eq!(store.records().len(), 1);
    assert!(storage.get_durable(CACHE_KEY).unwrap().is_some());
}

#[test]
fn failed_fetch_without_cache_surfaces_error() {
    let mut storage = MemoryStore::new();
    let mut store = RecordStore::open(&storage);

    let outcome = store.refresh(&StubSource::failing(), &mut storage);

    assert!(matches!(outcome, RefreshOutcome::Failed(_)));
    let error = store.error().expect("terminal error");
    assert!(error.user_message().contains("503"));
    assert!(store.records().is_empty());
}

#[test]
fn corrupt_cache_is_ignored() {
    let mut storage = MemoryStore::new();
    storage.set_durable(CACHE_KEY, "{broken").unwrap();
    let store = RecordStore::open(&storage);
    assert!(store.snapshot().is_none());
}

#[test]
fn cache_write_failure_does_not_block_replacement() {
    let mut storage = MemoryStore::with_quota(8);
    let mut store = RecordStore::new();
    let outcome = store.refresh(&StubSource::ok(vec![company(1, "Acme")]), &mut storage);
    assert!(matches!(outcome, RefreshOutcome::Replaced { .. }));
    assert_eq!(store.records().len(), 1);
    assert_eq!(storage.get_durable(CACHE_KEY).unwrap(), None);
}
