//! Query parameters for the filter/sort pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ModelError, Record};

/// Field a sort key orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Employees,
    Founded,
}

/// Ordering direction of a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    EmployeesAsc,
    EmployeesDesc,
    FoundedAsc,
    FoundedDesc,
}

impl SortKey {
    pub const fn all() -> &'static [SortKey] {
        &[
            Self::NameAsc,
            Self::NameDesc,
            Self::EmployeesAsc,
            Self::EmployeesDesc,
            Self::FoundedAsc,
            Self::FoundedDesc,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::EmployeesAsc => "employees-asc",
            Self::EmployeesDesc => "employees-desc",
            Self::FoundedAsc => "founded-asc",
            Self::FoundedDesc => "founded-desc",
        }
    }

    /// Label for selection controls.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::EmployeesAsc => "Employees (Low to High)",
            Self::EmployeesDesc => "Employees (High to Low)",
            Self::FoundedAsc => "Founded (Oldest First)",
            Self::FoundedDesc => "Founded (Newest First)",
        }
    }

    pub const fn field(&self) -> SortField {
        match self {
            Self::NameAsc | Self::NameDesc => SortField::Name,
            Self::EmployeesAsc | Self::EmployeesDesc => SortField::Employees,
            Self::FoundedAsc | Self::FoundedDesc => SortField::Founded,
        }
    }

    pub const fn direction(&self) -> SortDirection {
        match self {
            Self::NameAsc | Self::EmployeesAsc | Self::FoundedAsc => SortDirection::Ascending,
            Self::NameDesc | Self::EmployeesDesc | Self::FoundedDesc => SortDirection::Descending,
        }
    }

    /// Parse a sort key, falling back to the default for unknown input.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ModelError::UnknownSortKey(s.to_string()))
    }
}

/// A record field that can be filtered by exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Location,
    Industry,
}

impl FilterField {
    pub const fn all() -> &'static [FilterField] {
        &[Self::Location, Self::Industry]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Industry => "industry",
        }
    }

    /// The value of this field on a record.
    pub fn value_of<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            Self::Location => &record.location,
            Self::Industry => &record.industry,
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "location" | "locations" => Ok(Self::Location),
            "industry" | "industries" => Ok(Self::Industry),
            _ => Err(ModelError::UnknownFilterField(s.to_string())),
        }
    }
}

/// Active search, filter, and sort parameters.
///
/// `search_term` is the effective (settled) term; raw keystrokes are held
/// by the search buffer until they settle. Each setter returns `true` when
/// the stored value changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    search_term: String,
    location: Option<String>,
    industry: Option<String>,
    sort_key: SortKey,
    favorites_only: bool,
}

impl QueryState {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    pub fn filter(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Location => self.location(),
            FilterField::Industry => self.industry(),
        }
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    /// True when any filtering dimension (search, location, industry,
    /// favorites) narrows the result set.
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty()
            || self.location.is_some()
            || self.industry.is_some()
            || self.favorites_only
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.search_term == term {
            return false;
        }
        self.search_term = term;
        true
    }

    /// Set the location filter. Empty strings clear it.
    pub fn set_location(&mut self, location: Option<String>) -> bool {
        replace_filter(&mut self.location, location)
    }

    /// Set the industry filter. Empty strings clear it.
    pub fn set_industry(&mut self, industry: Option<String>) -> bool {
        replace_filter(&mut self.industry, industry)
    }

    pub fn set_filter(&mut self, field: FilterField, value: Option<String>) -> bool {
        match field {
            FilterField::Location => self.set_location(value),
            FilterField::Industry => self.set_industry(value),
        }
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) -> bool {
        if self.sort_key == sort_key {
            return false;
        }
        self.sort_key = sort_key;
        true
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) -> bool {
        if self.favorites_only == favorites_only {
            return false;
        }
        self.favorites_only = favorites_only;
        true
    }
}

fn replace_filter(slot: &mut Option<String>, value: Option<String>) -> bool {
    let value = value.filter(|v| !v.is_empty());
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
