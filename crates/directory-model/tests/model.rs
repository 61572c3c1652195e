//! Tests for directory-model types.

use directory_model::{FilterField, QueryState, Record, RecordId, SortDirection, SortField, SortKey};

fn record(id: u64, location: &str, industry: &str) -> Record {
    Record {
        id: RecordId::from(id),
        name: format!("Company {id}"),
        location: location.to_string(),
        industry: industry.to_string(),
        employees: id * 10,
        founded: 2000,
        description: String::new(),
    }
}

#[test]
fn sort_keys_pair_ascending_and_descending() {
    let ascending: Vec<_> = SortKey::all()
        .iter()
        .filter(|key| key.direction() == SortDirection::Ascending)
        .map(SortKey::field)
        .collect();
    let descending: Vec<_> = SortKey::all()
        .iter()
        .filter(|key| key.direction() == SortDirection::Descending)
        .map(SortKey::field)
        .collect();
    assert_eq!(ascending, descending);
    assert_eq!(
        ascending,
        vec![SortField::Name, SortField::Employees, SortField::Founded]
    );
}

#[test]
fn filter_field_reads_record_values() {
    let company = record(3, "Lisbon", "Fintech");
    assert_eq!(FilterField::Location.value_of(&company), "Lisbon");
    assert_eq!(FilterField::Industry.value_of(&company), "Fintech");
    assert_eq!("Industries".parse::<FilterField>(), Ok(FilterField::Industry));
}

#[test]
fn query_setters_report_changes() {
    let mut query = QueryState::default();
    assert!(query.set_search_term("acme"));
    assert!(!query.set_search_term("acme"));
    assert!(query.set_filter(FilterField::Industry, Some("Retail".to_string())));
    assert_eq!(query.filter(FilterField::Industry), Some("Retail"));
    assert!(!query.set_sort_key(SortKey::NameAsc));
    assert!(query.set_sort_key(SortKey::EmployeesAsc));
    assert!(query.set_favorites_only(true));
    assert!(!query.set_favorites_only(true));
}

#[test]
fn query_state_ignores_missing_fields() {
    let query: QueryState =
        serde_json::from_str(r#"{"sort_key": "employees-desc"}"#).expect("parse partial query");
    assert_eq!(query.sort_key(), SortKey::EmployeesDesc);
    assert_eq!(query.search_term(), "");
    assert!(!query.favorites_only());
}
