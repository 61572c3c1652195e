//! In-memory storage.

use std::collections::BTreeMap;

use crate::adapter::{Persistence, Scope};
use crate::error::{Result, StorageError};

/// Storage held entirely in process memory.
///
/// Optionally enforces a byte quota per scope, or refuses every operation,
/// which lets tests exercise the degraded paths of the engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    durable: BTreeMap<String, String>,
    session: BTreeMap<String, String>,
    quota: Option<usize>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose scopes each hold at most `bytes` of keys and values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// A store that fails every read and write.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Drop all session values, as happens when a session ends.
    pub fn end_session(&mut self) {
        self.session.clear();
    }

    pub fn len(&self, scope: Scope) -> usize {
        self.map(scope).len()
    }

    pub fn is_empty(&self) -> bool {
        self.durable.is_empty() && self.session.is_empty()
    }

    fn map(&self, scope: Scope) -> &BTreeMap<String, String> {
        match scope {
            Scope::Durable => &self.durable,
            Scope::Session => &self.session,
        }
    }

    fn map_mut(&mut self, scope: Scope) -> &mut BTreeMap<String, String> {
        match scope {
            Scope::Durable => &mut self.durable,
            Scope::Session => &mut self.session,
        }
    }

    fn check_available(&self, scope: Scope) -> Result<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable {
                scope,
                reason: "storage disabled".to_string(),
            });
        }
        Ok(())
    }
}

impl Persistence for MemoryStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        self.check_available(scope)?;
        Ok(self.map(scope).get(key).cloned())
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<()> {
        self.check_available(scope)?;
        if let Some(quota) = self.quota {
            let others: usize = self
                .map(scope)
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let size = others + key.len() + value.len();
            if size > quota {
                return Err(StorageError::QuotaExceeded {
                    scope,
                    key: key.to_string(),
                    size,
                    quota,
                });
            }
        }
        self.map_mut(scope)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
