//! Favorites overlay.
//!
//! The set is loaded from durable storage once and written back after
//! every mutation. Write failures are logged and the in-memory set stays
//! authoritative for the session.

use std::collections::HashSet;

use tracing::{debug, warn};

use directory_model::{FAVORITES_KEY, RecordId};
use directory_persistence::{Persistence, Scope, load_json, save_json};

/// Set of favorited record ids.
///
/// Insertion order is kept for the stored list. `revision` increments on
/// every membership change so derived results can be cached against it.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    ids: Vec<RecordId>,
    index: HashSet<RecordId>,
    revision: u64,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stored set. Missing or unreadable values yield an empty set.
    pub fn load<P: Persistence + ?Sized>(storage: &P) -> Self {
        let stored: Vec<RecordId> = match load_json(storage, Scope::Durable, FAVORITES_KEY) {
            Ok(ids) => ids.unwrap_or_default(),
            Err(error) => {
                warn!(key = FAVORITES_KEY, %error, "could not load favorites");
                Vec::new()
            }
        };
        let mut favorites = Self::new();
        for id in stored {
            favorites.insert(id);
        }
        favorites.revision = 0;
        debug!(count = favorites.len(), "favorites loaded");
        favorites
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.index.contains(id)
    }

    pub fn list(&self) -> &[RecordId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Flip membership of `id`. Returns whether it is now a favorite.
    pub fn toggle<P: Persistence + ?Sized>(&mut self, id: &RecordId, storage: &mut P) -> bool {
        let now_favorite = if self.contains(id) {
            self.take(id);
            false
        } else {
            self.insert(id.clone());
            true
        };
        self.persist(storage);
        now_favorite
    }

    /// Add `id`. Returns `false` when it was already present.
    pub fn add<P: Persistence + ?Sized>(&mut self, id: &RecordId, storage: &mut P) -> bool {
        if !self.insert(id.clone()) {
            return false;
        }
        self.persist(storage);
        true
    }

    /// Remove `id`. Returns `false` when it was not present.
    pub fn remove<P: Persistence + ?Sized>(&mut self, id: &RecordId, storage: &mut P) -> bool {
        if !self.take(id) {
            return false;
        }
        self.persist(storage);
        true
    }

    fn insert(&mut self, id: RecordId) -> bool {
        if !self.index.insert(id.clone()) {
            return false;
        }
        self.ids.push(id);
        self.revision += 1;
        true
    }

    fn take(&mut self, id: &RecordId) -> bool {
        if !self.index.remove(id) {
            return false;
        }
        self.ids.retain(|existing| existing != id);
        self.revision += 1;
        true
    }

    fn persist<P: Persistence + ?Sized>(&self, storage: &mut P) {
        if let Err(error) = save_json(storage, Scope::Durable, FAVORITES_KEY, &self.ids) {
            warn!(key = FAVORITES_KEY, %error, "could not save favorites");
        }
    }
}
