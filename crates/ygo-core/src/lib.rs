//! ygo-lookup Core
//!
//! Network-free kernel shared by the client and storage crates:
//!
//! - `fuzzy` - weighted-ratio name matching over a name pool
//! - `index` - the process-wide name snapshot (`NameIndex`)
//! - `record` - entity records, identifiers and identifier batches
//! - `resolve` - archetype cross-reference precedence
//! - `cache` - response cache trait, request signatures, in-memory backend
//!
//! # Features
//!
//! - `parallel` - Parallel scoring via rayon for large name pools
//!
//! # Example
//!
//! ```rust
//! use ygo_core::{FuzzyMatcher, NameIndex};
//!
//! let index = NameIndex::new(
//!     vec!["Blue-Eyes White Dragon".into(), "Kuriboh".into()],
//!     vec!["Blue-Eyes".into()],
//!     vec![],
//! );
//!
//! let results = index.search("blue eyes", &FuzzyMatcher::new());
//! assert_eq!(results.cards[0].value, "Blue-Eyes White Dragon");
//! ```

pub mod cache;
pub mod fuzzy;
pub mod index;
pub mod record;
pub mod resolve;

// Re-export main types at crate root
pub use cache::{CacheError, CachedResponse, MemoryCache, RequestSignature, ResponseCache};
pub use fuzzy::{fuzzy_search, FuzzyMatch, FuzzyMatcher, MatchConfig, MatchResult};
pub use index::{EntityKind, NameIndex, NamePool, SearchResults};
pub use record::{
    ArchetypeLinks, EntityKey, EntityRecord, Identifier, IdentifierBatch, RecordError, SetLinks,
};
pub use resolve::{ArchetypePlan, ResolvedGroup};
