//! Per-dataset write locks.
//!
//! Every load-merge-save cycle on a dataset's tag document runs while holding
//! that dataset's lock, so concurrent updates within one process never lose
//! each other's tags. Other processes writing the same document are not
//! coordinated with: between processes the last writer wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Arena of locks keyed by dataset name, created on first use
#[derive(Debug, Default)]
pub struct DatasetLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DatasetLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for `dataset`; the same handle is returned on every call.
    #[must_use]
    pub fn handle(&self, dataset: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(dataset.to_string()).or_default())
    }

    /// Number of datasets that have had a lock created
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Acquire a handle's lock. A panic in a previous holder does not poison
/// the document: the next cycle re-reads it from disk.
pub fn acquire(handle: &Mutex<()>) -> MutexGuard<'_, ()> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}
