//! Cache trait definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::error::CacheResult;

/// A stored response body with its staleness deadline.
///
/// Timestamps are Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub body: Value,
    pub stored_at: i64,
    pub expires_at: i64,
}

impl CachedResponse {
    /// Response stored at `now_ms`, stale after `ttl_ms`
    pub fn new(body: Value, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            body,
            stored_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }
}

/// Response cache keyed by request signature.
///
/// Shared by every in-flight request, so implementations take `&self` and
/// must be safe for concurrent reads and writes. A `put` replaces the whole
/// entry for its key or leaves it untouched.
///
/// Backends:
/// - Testing / debug: in-memory (`MemoryCache`)
/// - Production: SQLite (`ygo-sqlite` crate)
pub trait ResponseCache: Send + Sync {
    /// Look up an entry, expired or not.
    fn get(&self, key: &str) -> CacheResult<Option<CachedResponse>>;

    /// Insert or replace the entry for `key`.
    fn put(&self, key: &str, response: CachedResponse) -> CacheResult<()>;

    /// Remove an entry. Returns `true` if it existed.
    fn remove(&self, key: &str) -> CacheResult<bool>;

    /// Remove every entry.
    fn clear(&self) -> CacheResult<()>;

    /// Number of stored entries, expired ones included.
    fn len(&self) -> CacheResult<usize>;

    fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Whether an entry is stale at `now_ms`
    fn is_expired(&self, response: &CachedResponse, now_ms: i64) -> bool {
        response.expires_at <= now_ms
    }
}
