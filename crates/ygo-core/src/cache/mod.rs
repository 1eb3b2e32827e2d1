//! Response cache abstraction
//!
//! The Cached Client stores parsed response bodies keyed by
//! [`RequestSignature`]. Backends implement [`ResponseCache`]:
//!
//! - **Memory**: `MemoryCache`, for tests and debug runs
//! - **SQLite**: persistent store in the `ygo-sqlite` crate
//!
//! # Example
//!
//! ```rust
//! use ygo_core::cache::{CachedResponse, MemoryCache, RequestSignature, ResponseCache};
//! use serde_json::json;
//!
//! let cache = MemoryCache::new();
//! let key = RequestSignature::new("http://localhost:5000/card_data", &[("name", "Kuriboh")]);
//!
//! cache.put(key.as_str(), CachedResponse::new(json!([]), 0, 60_000)).unwrap();
//! assert!(cache.get(key.as_str()).unwrap().is_some());
//! ```

mod error;
mod memory;
mod signature;
mod traits;

pub use error::{CacheError, CacheResult};
pub use memory::MemoryCache;
pub use signature::RequestSignature;
pub use traits::{CachedResponse, ResponseCache};
