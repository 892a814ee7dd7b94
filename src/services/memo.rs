//! Content-hash memoization for derived tables.
//!
//! The computations themselves are pure; this is an optional wrapper the
//! presentation layer can use to skip recomputation across reruns. Keys must
//! cover every effective input, and a cache must not be shared across season
//! datasets.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::checksum::calculate_checksum;
use crate::db::error::{RepositoryError, RepositoryResult};

/// SHA-256 fingerprint of a computation's inputs.
pub fn fingerprint<T: Serialize>(inputs: &T) -> RepositoryResult<String> {
    let encoded = serde_json::to_string(inputs)
        .map_err(|e| RepositoryError::internal(format!("failed to encode memo key: {}", e)))?;
    Ok(calculate_checksum(&encoded))
}

/// Cache of computed values keyed by input fingerprint.
#[derive(Default)]
pub struct MemoCache<T> {
    entries: Mutex<HashMap<String, Arc<T>>>,
}

impl<T> MemoCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&self, key: &str, compute: impl FnOnce() -> T) -> Arc<T> {
        let mut entries = self.entries.lock();
        if let Some(hit) = entries.get(key) {
            return Arc::clone(hit);
        }
        let value = Arc::new(compute());
        entries.insert(key.to_string(), Arc::clone(&value));
        value
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop all cached values, e.g. when switching seasons.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
