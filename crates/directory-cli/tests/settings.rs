//! Settings file loading and storage wiring.

use std::fs;

use directory_cli::settings::{DEFAULT_SOURCE, Settings, load_settings, load_settings_from};
use directory_model::{FAVORITES_KEY, Record, RecordId, SortKey};
use directory_persistence::Persistence;
use directory_query::DirectoryEngine;

#[test]
fn explicit_config_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        r#"
source = "https://example.com/companies.json"
page_size = 12
http_timeout_secs = 5
default_sort = "founded-desc"
"#,
    )
    .unwrap();

    let settings = load_settings(Some(path.as_path()));
    assert_eq!(settings.source, "https://example.com/companies.json");
    assert_eq!(settings.engine_config().page_size, 12);
    assert_eq!(settings.http_timeout().as_secs(), 5);
    assert_eq!(settings.search_debounce_ms, 300);
    assert_eq!(settings.default_sort(), SortKey::FoundedDesc);
}

#[test]
fn unknown_default_sort_falls_back_to_name_order() {
    let settings = Settings {
        default_sort: "by-vibes".to_string(),
        ..Settings::default()
    };
    assert_eq!(settings.default_sort(), SortKey::NameAsc);
    assert_eq!(Settings::default().default_sort(), SortKey::NameAsc);
}

#[test]
fn missing_or_invalid_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        load_settings_from(&dir.path().join("absent.toml")),
        Settings::default()
    );

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "page_size = \"many\"").unwrap();
    let settings = load_settings_from(&broken);
    assert_eq!(settings.source, DEFAULT_SOURCE);
}

#[test]
fn configured_dirs_hold_engine_state_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        data_dir: Some(dir.path().join("data")),
        session_dir: Some(dir.path().join("session")),
        ..Settings::default()
    };
    let acme = Record {
        id: RecordId::from(1),
        name: "Acme".to_string(),
        location: "Berlin".to_string(),
        industry: "Retail".to_string(),
        employees: 100,
        founded: 1990,
        description: String::new(),
    };

    let mut engine = DirectoryEngine::open(settings.file_store(), settings.engine_config());
    engine.apply_fetch_result(Ok(vec![acme]));
    engine.toggle_favorite(&RecordId::from(1));
    drop(engine);

    let store = settings.file_store();
    assert!(store.get_durable(FAVORITES_KEY).unwrap().is_some());
    let reopened = DirectoryEngine::open(store, settings.engine_config());
    assert_eq!(reopened.records().len(), 1);
    assert!(reopened.is_favorite(&RecordId::from(1)));
    assert!(dir.path().join("data").join("durable.json").exists());
}
