//! Degrading wrapper around a storage backend.

use std::collections::BTreeSet;

use crate::adapter::{Persistence, Scope};
use crate::error::Result;
use crate::memory::MemoryStore;

/// Wraps a backend so storage failures never reach the caller.
///
/// A failed write keeps the value in memory for that key; later reads of
/// the key are served from memory for the rest of the process. A failed
/// read of a key that was never written here yields `None`.
#[derive(Debug)]
pub struct FallbackStore<S> {
    inner: S,
    memory: MemoryStore,
    degraded: BTreeSet<(Scope, String)>,
}

impl<S: Persistence> FallbackStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            memory: MemoryStore::new(),
            degraded: BTreeSet::new(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Whether `key` is currently held only in memory.
    pub fn is_degraded(&self, scope: Scope, key: &str) -> bool {
        self.degraded.contains(&(scope, key.to_string()))
    }

    /// Keys whose values are currently held only in memory.
    pub fn degraded_keys(&self) -> impl Iterator<Item = (Scope, &str)> {
        self.degraded.iter().map(|(scope, key)| (*scope, key.as_str()))
    }
}

impl<S: Persistence> Persistence for FallbackStore<S> {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        if self.is_degraded(scope, key) {
            return self.memory.get(scope, key);
        }
        match self.inner.get(scope, key) {
            Ok(value) => Ok(value),
            Err(error) => {
                tracing::warn!(%scope, key, %error, "storage read failed, treating value as absent");
                Ok(None)
            }
        }
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<()> {
        match self.inner.set(scope, key, value) {
            Ok(()) => {
                if self.degraded.remove(&(scope, key.to_string())) {
                    tracing::info!(%scope, key, "storage recovered for key");
                }
                Ok(())
            }
            Err(error) => {
                tracing::warn!(
                    %scope,
                    key,
                    %error,
                    "storage write failed, keeping value in memory only"
                );
                self.memory.set(scope, key, value)?;
                self.degraded.insert((scope, key.to_string()));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_writes_are_kept_in_memory() {
        let mut store = FallbackStore::new(MemoryStore::unavailable());
        store.set_durable("favoriteCompanies", "[\"1\"]").unwrap();
        assert!(store.is_degraded(Scope::Durable, "favoriteCompanies"));
        assert_eq!(
            store.get_durable("favoriteCompanies").unwrap().as_deref(),
            Some("[\"1\"]")
        );
        assert_eq!(store.get_durable("other").unwrap(), None);
    }

    #[test]
    fn quota_failure_degrades_only_that_key() {
        let mut store = FallbackStore::new(MemoryStore::with_quota(16));
        store.set_durable("a", "small").unwrap();
        store.set_durable("b", &"x".repeat(32)).unwrap();
        assert!(!store.is_degraded(Scope::Durable, "a"));
        assert!(store.is_degraded(Scope::Durable, "b"));
        assert_eq!(store.inner().get_durable("b").unwrap(), None);
        assert_eq!(store.get_durable("b").unwrap().map(|v| v.len()), Some(32));
        assert_eq!(store.degraded_keys().count(), 1);
    }
}
