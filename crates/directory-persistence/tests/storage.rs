//! Tests for storage backends and the degrading wrapper.

use std::fs;

use directory_persistence::{
    FallbackStore, FileStore, MemoryStore, Persistence, Scope, ScopeFile, load_json, save_json,
};

#[test]
fn file_store_keeps_scopes_in_separate_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut store = FileStore::in_dirs(&dir.path().join("durable"), &dir.path().join("session"));

    save_json(&mut store, Scope::Durable, "viewMode", "table").expect("save view mode");
    save_json(&mut store, Scope::Session, "currentPage", &2usize).expect("save page");

    let durable = store.scope_file(Scope::Durable).path().to_path_buf();
    let session = store.scope_file(Scope::Session).path().to_path_buf();
    assert_ne!(durable, session);
    assert!(fs::read_to_string(&durable).unwrap().contains("viewMode"));
    assert!(!fs::read_to_string(&durable).unwrap().contains("currentPage"));

    // Ending the session removes only the session document.
    fs::remove_file(&session).expect("end session");
    let page: Option<usize> = load_json(&store, Scope::Session, "currentPage").unwrap();
    assert_eq!(page, None);
    let view: Option<String> = load_json(&store, Scope::Durable, "viewMode").unwrap();
    assert_eq!(view.as_deref(), Some("table"));
}

#[test]
fn unwritable_location_degrades_to_memory() {
    let dir = tempfile::tempdir().expect("create temp dir");
    // A regular file where a directory is expected makes every write fail.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let backend = FileStore::new(
        ScopeFile::new(blocker.join("durable.json")),
        ScopeFile::new(blocker.join("session.json")),
    );
    let mut store = FallbackStore::new(backend);

    store
        .set_durable("favoriteCompanies", "[\"7\"]")
        .expect("fallback never fails");
    assert!(store.is_degraded(Scope::Durable, "favoriteCompanies"));
    assert_eq!(
        store.get_durable("favoriteCompanies").unwrap().as_deref(),
        Some("[\"7\"]")
    );
    // Unwritten keys read as absent rather than erroring.
    assert_eq!(store.get_session("currentPage").unwrap(), None);
}

#[test]
fn boxed_stores_are_persistence() {
    let mut store: Box<dyn Persistence> = Box::new(MemoryStore::new());
    store.set_durable("theme", "\"dark\"").unwrap();
    assert_eq!(store.get_durable("theme").unwrap().as_deref(), Some("\"dark\""));
}
