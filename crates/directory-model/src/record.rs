#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ModelError;

/// Identifier of a company record.
///
/// Source documents carry ids as JSON numbers or strings; both normalize to
/// the same textual form so `1` and `"1"` name the same record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyRecordId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawRecordId::deserialize(deserializer)? {
            RawRecordId::Unsigned(value) => Ok(Self(value.to_string())),
            RawRecordId::Signed(value) => Ok(Self(value.to_string())),
            RawRecordId::Text(value) => Self::new(value).map_err(serde::de::Error::custom),
        }
    }
}

/// A company in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub location: String,
    pub industry: String,
    pub employees: u64,
    /// Year the company was founded.
    pub founded: i32,
    #[serde(default)]
    pub description: String,
}

impl Record {
    /// Case-insensitive substring match against the company name.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn name_contains_lower(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.name.to_lowercase().contains(needle_lower)
    }
}
