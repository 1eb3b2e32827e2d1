//! Error types for the SQLite cache backend

use thiserror::Error;
use ygo_core::cache::CacheError;

/// Result type for SQLite cache operations
pub type Result<T> = std::result::Result<T, SqliteError>;

/// Errors that can occur in the SQLite cache
#[derive(Debug, Error)]
pub enum SqliteError {
    /// Database connection or query error
    #[error("SQLite error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connection pool error
    #[error("pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Convert SqliteError to CacheError for the cache trait
impl From<SqliteError> for CacheError {
    fn from(err: SqliteError) -> Self {
        match err {
            SqliteError::Json(e) => CacheError::Serialization(e.to_string()),
            SqliteError::Database(e) => CacheError::Backend(format!("SQLite: {}", e)),
            SqliteError::Pool(e) => CacheError::Backend(format!("pool: {}", e)),
            SqliteError::Migration(msg) => CacheError::Backend(format!("Migration: {}", msg)),
        }
    }
}
