//! Name Index
//!
//! Snapshot of every card, archetype and set name known to the remote
//! service. Built once from the `/names` listing and read-only afterwards;
//! a reload builds a new index rather than mutating this one.

use std::fmt;
use std::hash::{Hash, Hasher};

use ahash::AHasher;
use serde::{Deserialize, Serialize};

use crate::fuzzy::{FuzzyMatcher, MatchResult};
use crate::fuzzy::strategies::process;

/// The three entity kinds served by the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Card,
    Archetype,
    Set,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Card, EntityKind::Archetype, EntityKind::Set];

    /// Data endpoint path for this kind
    pub fn endpoint(self) -> &'static str {
        match self {
            EntityKind::Card => "/card_data",
            EntityKind::Archetype => "/arch_data",
            EntityKind::Set => "/set_data",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Card => "card",
            EntityKind::Archetype => "archetype",
            EntityKind::Set => "set",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered names of one entity kind, with their processed forms
/// precomputed for matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NamePool {
    names: Vec<String>,
    processed: Vec<String>,
}

impl NamePool {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn processed(&self) -> &[String] {
        &self.processed
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for NamePool {
    fn from(names: Vec<String>) -> Self {
        let processed = names.iter().map(|n| process(n)).collect();
        Self { names, processed }
    }
}

impl From<NamePool> for Vec<String> {
    fn from(pool: NamePool) -> Self {
        pool.names
    }
}

/// Search results across all three pools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub cards: MatchResult,
    pub archetypes: MatchResult,
    pub sets: MatchResult,
}

/// Name pools for every entity kind
///
/// Deserializes directly from the `/names` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameIndex {
    #[serde(rename = "card_names")]
    cards: NamePool,
    #[serde(rename = "arch_names")]
    archetypes: NamePool,
    #[serde(rename = "set_names")]
    sets: NamePool,
}

impl NameIndex {
    pub fn new(cards: Vec<String>, archetypes: Vec<String>, sets: Vec<String>) -> Self {
        Self {
            cards: cards.into(),
            archetypes: archetypes.into(),
            sets: sets.into(),
        }
    }

    pub fn pool(&self, kind: EntityKind) -> &NamePool {
        match kind {
            EntityKind::Card => &self.cards,
            EntityKind::Archetype => &self.archetypes,
            EntityKind::Set => &self.sets,
        }
    }

    /// Returns (card_count, archetype_count, set_count)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.cards.len(), self.archetypes.len(), self.sets.len())
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.archetypes.is_empty() && self.sets.is_empty()
    }

    /// Search all three pools with the same matcher
    pub fn search(&self, term: &str, matcher: &FuzzyMatcher) -> SearchResults {
        SearchResults {
            cards: matcher.search(term, &self.cards),
            archetypes: matcher.search(term, &self.archetypes),
            sets: matcher.search(term, &self.sets),
        }
    }

    /// Digest of every name in every pool, in order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = AHasher::default();
        for kind in EntityKind::ALL {
            kind.hash(&mut hasher);
            for name in self.pool(kind).names() {
                name.hash(&mut hasher);
            }
        }
        format!("{:016x}", hasher.finish())
    }
}
