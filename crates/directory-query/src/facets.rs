//! Distinct filter values across the whole dataset.

use std::collections::BTreeSet;
use std::sync::Arc;

use directory_model::{FilterField, Record};

/// Sorted distinct values of `field` across `records`.
///
/// Comparison is case-sensitive code-point order; duplicates collapse.
pub fn extract_facets(records: &[Record], field: FilterField) -> Vec<String> {
    records
        .iter()
        .map(|record| field.value_of(record))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Facet values for every filterable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSet {
    pub locations: Arc<[String]>,
    pub industries: Arc<[String]>,
}

impl FacetSet {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            locations: extract_facets(records, FilterField::Location).into(),
            industries: extract_facets(records, FilterField::Industry).into(),
        }
    }

    pub fn get(&self, field: FilterField) -> &Arc<[String]> {
        match field {
            FilterField::Location => &self.locations,
            FilterField::Industry => &self.industries,
        }
    }
}
