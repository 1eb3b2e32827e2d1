//! FuzzyMatcher - ranks a name pool against a query

use super::strategies;
use crate::index::NamePool;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A ranked match result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub value: String,
    pub score: f64,
}

/// Ranked matches, best first
pub type MatchResult = Vec<FuzzyMatch>;

/// Matcher configuration
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Scores must be strictly greater than this (0-100)
    pub threshold: u8,
    /// Maximum number of matches returned
    pub limit: usize,
    /// Pool size at which scoring goes parallel (with the `parallel` feature)
    pub parallel_threshold: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 50,
            limit: 10,
            parallel_threshold: 1000,
        }
    }
}

/// Score a query against every name in a pool and keep the best.
///
/// Stateless apart from its configuration; the pools live in
/// [`crate::NameIndex`].
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    config: MatchConfig,
}

impl FuzzyMatcher {
    /// Create a matcher with the default threshold (50) and limit (10)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Search a pool using the configured threshold and limit
    pub fn search(&self, query: &str, pool: &NamePool) -> MatchResult {
        self.search_with(query, pool, self.config.threshold, self.config.limit)
    }

    /// Search a pool with an explicit threshold and limit.
    ///
    /// Output is sorted by descending score; equal scores keep pool order.
    /// An empty result means nothing cleared the threshold.
    pub fn search_with(
        &self,
        query: &str,
        pool: &NamePool,
        threshold: u8,
        limit: usize,
    ) -> MatchResult {
        let query = strategies::process(query);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored = self.score_pool(&query, pool.processed(), f64::from(threshold));

        // Stable: ties stay in pool order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(idx, score)| FuzzyMatch {
                value: pool.names()[idx].clone(),
                score,
            })
            .collect()
    }

    /// Score every entry, keeping (pool index, score) pairs above threshold
    #[cfg(feature = "parallel")]
    fn score_pool(&self, query: &str, processed: &[String], threshold: f64) -> Vec<(usize, f64)> {
        if processed.len() >= self.config.parallel_threshold {
            // Indexed collect keeps pool order
            processed
                .par_iter()
                .enumerate()
                .map(|(idx, item)| (idx, strategies::weighted_ratio(query, item)))
                .filter(|(_, score)| *score > threshold)
                .collect()
        } else {
            score_sequential(query, processed, threshold)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn score_pool(&self, query: &str, processed: &[String], threshold: f64) -> Vec<(usize, f64)> {
        score_sequential(query, processed, threshold)
    }
}

fn score_sequential(query: &str, processed: &[String], threshold: f64) -> Vec<(usize, f64)> {
    processed
        .iter()
        .enumerate()
        .map(|(idx, item)| (idx, strategies::weighted_ratio(query, item)))
        .filter(|(_, score)| *score > threshold)
        .collect()
}

/// One-shot search without building a matcher
pub fn fuzzy_search(query: &str, pool: &NamePool, threshold: u8, limit: usize) -> MatchResult {
    FuzzyMatcher::new().search_with(query, pool, threshold, limit)
}
