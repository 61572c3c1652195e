//! Filter and sort pipeline.
//!
//! The pipeline works on indices into the record slice so results can be
//! cached without cloning records. Filtering is an AND of the name search,
//! the location filter, and the industry filter. Sorting is stable, so
//! records that compare equal keep their store order. The favorites
//! restriction runs last and never reorders.

use std::cmp::Ordering;

use directory_model::{QueryState, Record, SortDirection, SortField, SortKey};

use crate::collate::compare_names;
use crate::favorites::Favorites;

/// Whether `record` passes every filter in `query`.
pub fn matches(record: &Record, query: &QueryState) -> bool {
    let needle = query.search_term().to_lowercase();
    matches_lower(record, query, &needle)
}

fn matches_lower(record: &Record, query: &QueryState, needle_lower: &str) -> bool {
    record.name_contains_lower(needle_lower)
        && query.location().is_none_or(|loc| record.location == loc)
        && query.industry().is_none_or(|ind| record.industry == ind)
}

/// Compare two records under a sort key. Descending reverses the ascending
/// comparison exactly.
pub fn compare_records(a: &Record, b: &Record, key: SortKey) -> Ordering {
    let ascending = match key.field() {
        SortField::Name => compare_names(&a.name, &b.name),
        SortField::Employees => a.employees.cmp(&b.employees),
        SortField::Founded => a.founded.cmp(&b.founded),
    };
    match key.direction() {
        SortDirection::Ascending => ascending,
        SortDirection::Descending => ascending.reverse(),
    }
}

/// Indices of matching records in sorted order.
pub fn filter_sort(records: &[Record], query: &QueryState) -> Vec<usize> {
    let needle = query.search_term().to_lowercase();
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_lower(record, query, &needle))
        .map(|(index, _)| index)
        .collect();
    let key = query.sort_key();
    indices.sort_by(|&a, &b| compare_records(&records[a], &records[b], key));
    indices
}

/// Drop indices whose record is not a favorite. Order is preserved.
pub fn restrict_to_favorites(records: &[Record], indices: &mut Vec<usize>, favorites: &Favorites) {
    indices.retain(|&index| favorites.contains(&records[index].id));
}

/// Full derivation: filter, sort, then apply the favorites restriction when
/// `query` asks for it.
pub fn derive(records: &[Record], query: &QueryState, favorites: &Favorites) -> Vec<usize> {
    let mut indices = filter_sort(records, query);
    if query.favorites_only() {
        restrict_to_favorites(records, &mut indices, favorites);
    }
    indices
}

/// Filter and sort, returning record references. Ignores favorites.
pub fn apply<'a>(records: &'a [Record], query: &QueryState) -> Vec<&'a Record> {
    filter_sort(records, query)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_model::RecordId;

    fn company(id: u64, name: &str, employees: u64, founded: i32) -> Record {
        Record {
            id: RecordId::from(id),
            name: name.to_string(),
            location: if id % 2 == 0 { "Oslo" } else { "Berlin" }.to_string(),
            industry: "Retail".to_string(),
            employees,
            founded,
            description: String::new(),
        }
    }

    fn names(result: &[&Record]) -> Vec<String> {
        result.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn numeric_sorts_follow_direction() {
        let records = vec![company(1, "Acme", 100, 1990), company(2, "Zenith", 50, 2005)];
        let mut query = QueryState::default();
        query.set_sort_key(SortKey::EmployeesDesc);
        assert_eq!(names(&apply(&records, &query)), ["Acme", "Zenith"]);
        query.set_sort_key(SortKey::EmployeesAsc);
        assert_eq!(names(&apply(&records, &query)), ["Zenith", "Acme"]);
        query.set_sort_key(SortKey::FoundedAsc);
        assert_eq!(names(&apply(&records, &query)), ["Acme", "Zenith"]);
        query.set_sort_key(SortKey::FoundedDesc);
        assert_eq!(names(&apply(&records, &query)), ["Zenith", "Acme"]);
    }

    #[test]
    fn ties_keep_store_order() {
        let records = vec![
            company(1, "Beta", 10, 2000),
            company(2, "Alpha", 10, 2000),
            company(3, "Gamma", 10, 2000),
        ];
        let mut query = QueryState::default();
        query.set_sort_key(SortKey::EmployeesDesc);
        assert_eq!(filter_sort(&records, &query), vec![0, 1, 2]);
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let records = vec![
            company(1, "zeta", 1, 2000),
            company(2, "Alpha", 1, 2000),
            company(3, "beta", 1, 2000),
        ];
        let query = QueryState::default();
        assert_eq!(names(&apply(&records, &query)), ["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn search_and_filters_combine() {
        let records = vec![
            company(1, "Acme Berlin", 1, 2000),
            company(2, "Acme Oslo", 1, 2000),
            company(3, "Zenith", 1, 2000),
        ];
        let mut query = QueryState::default();
        query.set_search_term("ACME");
        assert_eq!(filter_sort(&records, &query), vec![0, 1]);
        query.set_location(Some("Oslo".to_string()));
        assert_eq!(filter_sort(&records, &query), vec![1]);
        query.set_industry(Some("Energy".to_string()));
        assert!(filter_sort(&records, &query).is_empty());
    }

    #[test]
    fn matches_checks_every_dimension() {
        let record = company(2, "Acme", 1, 2000);
        let mut query = QueryState::default();
        assert!(matches(&record, &query));
        query.set_search_term("cm");
        assert!(matches(&record, &query));
        query.set_location(Some("Berlin".to_string()));
        assert!(!matches(&record, &query));
    }
}
