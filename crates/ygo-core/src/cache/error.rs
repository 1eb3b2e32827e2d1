//! Cache error types

use thiserror::Error;

/// Errors that can occur in a cache backend
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// Storage backend error (database, filesystem, etc.)
    #[error("cache backend error: {0}")]
    Backend(String),

    /// Serialization/deserialization error
    #[error("cache serialization error: {0}")]
    Serialization(String),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
