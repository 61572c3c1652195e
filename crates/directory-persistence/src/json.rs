//! Typed helpers over the string-valued store.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::adapter::{Persistence, Scope};
use crate::error::{Result, StorageError};

/// Read and decode a JSON value. Absent keys yield `Ok(None)`.
pub fn load_json<T, P>(store: &P, scope: Scope, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    P: Persistence + ?Sized,
{
    let Some(raw) = store.get(scope, key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Serialization {
            key: key.to_string(),
            source,
        })
}

/// Encode a value as JSON and store it.
pub fn save_json<T, P>(store: &mut P, scope: Scope, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    P: Persistence + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set(scope, key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn json_helpers_round_trip() {
        let mut store = MemoryStore::new();
        save_json(&mut store, Scope::Durable, "ids", &vec!["1", "2"]).unwrap();
        let ids: Option<Vec<String>> = load_json(&store, Scope::Durable, "ids").unwrap();
        assert_eq!(ids, Some(vec!["1".to_string(), "2".to_string()]));
        let missing: Option<Vec<String>> = load_json(&store, Scope::Durable, "none").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn undecodable_value_is_reported() {
        let mut store = MemoryStore::new();
        store.set_session("currentPage", "three").unwrap();
        let result: Result<Option<usize>> = load_json(&store, Scope::Session, "currentPage");
        assert!(matches!(result, Err(StorageError::Serialization { .. })));
    }
}
