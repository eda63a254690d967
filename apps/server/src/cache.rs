//! Shared read-mostly snapshot cache
//!
//! Holds an immutable, atomically swappable snapshot of a small ranked
//! result set. Readers clone an `Arc` under a read lock and never block
//! each other; a refresh builds the new vector off to the side and
//! swaps it in under a short write lock.

use std::sync::{Arc, PoisonError, RwLock};

/// A concurrently readable top-N snapshot.
#[derive(Debug)]
pub struct TopNCache<T> {
    snapshot: RwLock<Arc<Vec<T>>>,
}

impl<T> TopNCache<T> {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Current snapshot. Cheap; only an `Arc` clone under a read lock.
    pub fn get(&self) -> Arc<Vec<T>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot. Readers holding the previous `Arc` keep
    /// seeing the old data until they drop it.
    pub fn set(&self, items: Vec<T>) {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(items);
    }
}

impl<T> Default for TopNCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
