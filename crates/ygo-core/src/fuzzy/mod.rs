//! Fuzzy Name Matching
//!
//! Scores a query against a [`NamePool`](crate::NamePool) with a weighted
//! ratio and returns the best candidates above a threshold.
//!
//! # Strategies
//!
//! 1. Indel ratio over the whole strings
//! 2. Token sort / token set ratio (order-insensitive)
//! 3. Partial ratio and partial token ratio (for queries much shorter than
//!    the candidate)
//!
//! `weighted_ratio` picks the best of these with length-dependent scaling.
//!
//! # Example
//!
//! ```rust
//! use ygo_core::fuzzy::fuzzy_search;
//! use ygo_core::NamePool;
//!
//! let pool = NamePool::from(vec![
//!     "Blue-Eyes White Dragon".to_string(),
//!     "Red-Eyes Black Dragon".to_string(),
//!     "Kuriboh".to_string(),
//! ]);
//!
//! let matches = fuzzy_search("Dragon", &pool, 50, 10);
//! assert_eq!(matches.len(), 2);
//! ```

mod engine;
pub mod strategies;

pub use engine::{fuzzy_search, FuzzyMatch, FuzzyMatcher, MatchConfig, MatchResult};
