//! Single-entry memoization keyed by input identity.

use std::cell::{Cell, RefCell};

/// Caches the value computed for the most recent key.
///
/// Interior mutability lets read-only accessors fill the cache.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: RefCell<Option<(K, V)>>,
    computations: Cell<u64>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: RefCell::new(None),
            computations: Cell::new(0),
        }
    }
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value for `key`, computing it when the key changed.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some((cached_key, value)) = self.slot.borrow().as_ref()
            && *cached_key == key
        {
            return value.clone();
        }
        let value = compute();
        self.computations.set(self.computations.get() + 1);
        *self.slot.borrow_mut() = Some((key, value.clone()));
        value
    }

    /// How many times a value has been computed.
    pub fn computations(&self) -> u64 {
        self.computations.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recomputes_only_on_key_change() {
        let memo: Memo<u64, u64> = Memo::new();
        assert_eq!(memo.get_or_compute(1, || 10), 10);
        assert_eq!(memo.get_or_compute(1, || 99), 10);
        assert_eq!(memo.computations(), 1);
        assert_eq!(memo.get_or_compute(2, || 20), 20);
        assert_eq!(memo.computations(), 2);
        assert_eq!(memo.get_or_compute(1, || 11), 11);
        assert_eq!(memo.computations(), 3);
    }
}
