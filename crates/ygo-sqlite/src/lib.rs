//! SQLite response cache for ygo-lookup
//!
//! Persistent implementation of the `ygo_core::cache::ResponseCache` trait,
//! so cached responses from the remote data service survive restarts.
//!
//! # Features
//!
//! - Implements `ResponseCache`
//! - Embedded, idempotent schema migrations
//! - In-memory databases for testing
//! - Pooled connections (r2d2) in WAL mode; each write is a single statement
//!
//! # Example
//!
//! ```rust,no_run
//! use ygo_sqlite::SqliteCache;
//! use ygo_core::cache::{CachedResponse, ResponseCache};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = SqliteCache::open("request_cache.sqlite")?;
//!
//! cache.put(
//!     "http://localhost:5000/names",
//!     CachedResponse::new(json!({"card_names": []}), 0, 60_000),
//! )?;
//!
//! let hit = cache.get("http://localhost:5000/names")?;
//! assert!(hit.is_some());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod migrate;
pub mod store;

// Re-export main types
pub use error::{Result, SqliteError};
pub use store::SqliteCache;
