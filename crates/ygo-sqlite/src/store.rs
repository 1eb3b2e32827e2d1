//! SQLite-backed response cache implementing the ResponseCache trait

use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OptionalExtension;
use ygo_core::cache::{CacheResult, CachedResponse, ResponseCache};

use crate::error::Result;

/// Connections kept open for a file-backed cache
const FILE_POOL_SIZE: u32 = 4;

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed response cache
///
/// Connections come from an r2d2 pool. A file-backed cache runs in WAL
/// mode, so lookups proceed in parallel with each other and with a writer.
pub struct SqliteCache {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteCache {
    /// Build a cache on an existing pool, applying migrations
    pub fn from_pool(pool: Pool<SqliteConnectionManager>) -> Result<Self> {
        let conn = pool.get()?;
        crate::migrate::migrate(&conn)?;
        drop(conn);
        Ok(Self { pool })
    }

    /// Create a new in-memory cache (for testing)
    ///
    /// Every in-memory connection is its own database, so the pool holds a
    /// single connection that is never recycled.
    pub fn in_memory() -> Result<Self> {
        let pool = Pool::builder()
            .max_size(1)
            .max_lifetime(None)
            .idle_timeout(None)
            .build(SqliteConnectionManager::memory())?;
        Self::from_pool(pool)
    }

    /// Open or create a file-backed cache
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
            conn.busy_timeout(BUSY_TIMEOUT)
        });
        let pool = Pool::builder()
            .max_size(FILE_POOL_SIZE)
            .connection_timeout(Duration::from_secs(5))
            .build(manager)?;
        Self::from_pool(pool)
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Delete every entry whose deadline has passed at `now_ms`.
    /// Returns the number of evicted entries.
    pub fn purge_expired(&self, now_ms: i64) -> Result<usize> {
        let removed = self
            .conn()?
            .execute("DELETE FROM responses WHERE expires_at <= ?", [now_ms])?;
        Ok(removed)
    }

    fn get_row(&self, key: &str) -> Result<Option<CachedResponse>> {
        let row: Option<(String, i64, i64)> = self
            .conn()?
            .query_row(
                "SELECT body, stored_at, expires_at FROM responses WHERE key = ?",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((body, stored_at, expires_at)) => Ok(Some(CachedResponse {
                body: serde_json::from_str(&body)?,
                stored_at,
                expires_at,
            })),
        }
    }

    fn put_row(&self, key: &str, response: &CachedResponse) -> Result<()> {
        let body = serde_json::to_string(&response.body)?;
        self.conn()?.execute(
            "INSERT OR REPLACE INTO responses (key, body, stored_at, expires_at)
             VALUES (?, ?, ?, ?)",
            rusqlite::params![key, body, response.stored_at, response.expires_at],
        )?;
        Ok(())
    }

    fn delete_row(&self, key: &str) -> Result<usize> {
        Ok(self
            .conn()?
            .execute("DELETE FROM responses WHERE key = ?", [key])?)
    }

    fn delete_all(&self) -> Result<()> {
        self.conn()?.execute("DELETE FROM responses", [])?;
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl ResponseCache for SqliteCache {
    fn get(&self, key: &str) -> CacheResult<Option<CachedResponse>> {
        Ok(self.get_row(key)?)
    }

    fn put(&self, key: &str, response: CachedResponse) -> CacheResult<()> {
        Ok(self.put_row(key, &response)?)
    }

    fn remove(&self, key: &str) -> CacheResult<bool> {
        Ok(self.delete_row(key)? > 0)
    }

    fn clear(&self) -> CacheResult<()> {
        Ok(self.delete_all()?)
    }

    fn len(&self) -> CacheResult<usize> {
        Ok(self.count()?)
    }
}
