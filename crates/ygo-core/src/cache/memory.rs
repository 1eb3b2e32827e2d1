//! In-memory cache backend
//!
//! A HashMap behind a read-write lock. Used by tests and when a persistent
//! cache is not wanted. Entries are lost when the process exits.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::cache::error::CacheResult;
use crate::cache::traits::{CachedResponse, ResponseCache};

/// In-memory response cache.
///
/// Lookups take a shared read lock; inserts hold the write lock only for
/// the single map insert.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CachedResponse>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently stored (for testing).
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> CacheResult<Option<CachedResponse>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, response: CachedResponse) -> CacheResult<()> {
        self.entries.write().insert(key.to_string(), response);
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn clear(&self) -> CacheResult<()> {
        self.entries.write().clear();
        Ok(())
    }

    fn len(&self) -> CacheResult<usize> {
        Ok(self.entries.read().len())
    }
}
