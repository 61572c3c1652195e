//! Companies document decoding.
//!
//! Sources return either a bare array of records or an object with a
//! `companies` array. The cached snapshot reuses the object form and adds a
//! `fetched_at` timestamp, so both fresh and cached payloads go through
//! [`parse_document`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use directory_model::Record;

use crate::error::{FetchError, Result};

/// A decoded companies document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompaniesDocument {
    pub companies: Vec<Record>,
    /// Present only in documents written by the snapshot cache.
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Decode a companies document in either accepted shape.
pub fn parse_document(text: &str) -> Result<CompaniesDocument> {
    let value: Value = serde_json::from_str(text).map_err(|source| FetchError::Parse { source })?;
    match value {
        Value::Array(_) => Ok(CompaniesDocument {
            companies: decode_records(value)?,
            fetched_at: None,
        }),
        Value::Object(mut map) => {
            let fetched_at = map
                .get("fetched_at")
                .and_then(Value::as_str)
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|ts| ts.with_timezone(&Utc));
            match map.remove("companies") {
                Some(companies @ Value::Array(_)) => Ok(CompaniesDocument {
                    companies: decode_records(companies)?,
                    fetched_at,
                }),
                Some(other) => Err(FetchError::UnexpectedShape {
                    found: kind_of(&other),
                }),
                None => Err(FetchError::UnexpectedShape {
                    found: "object without a companies field",
                }),
            }
        }
        other => Err(FetchError::UnexpectedShape {
            found: kind_of(&other),
        }),
    }
}

#[derive(Serialize)]
struct CacheEnvelope<'a> {
    fetched_at: DateTime<Utc>,
    companies: &'a [Record],
}

/// Encode records in the object form used by the snapshot cache.
pub fn encode_cache_document(records: &[Record], fetched_at: DateTime<Utc>) -> Result<String> {
    serde_json::to_string(&CacheEnvelope {
        fetched_at,
        companies: records,
    })
    .map_err(|source| FetchError::Parse { source })
}

fn decode_records(value: Value) -> Result<Vec<Record>> {
    serde_json::from_value(value).map_err(|source| FetchError::Parse { source })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
