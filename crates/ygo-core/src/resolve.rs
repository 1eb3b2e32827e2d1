//! Cross-reference precedence
//!
//! An entity listed under several archetype categories belongs to the
//! highest one only: members, then support, then related. Related is
//! reduced by the *original* support list, not the already-reduced one.
//!
//! Precedence is applied twice: on identifiers before fetching, so no
//! identifier is requested twice, and on the fetched records, so the
//! groups stay disjoint even when the service answers with records whose
//! identity differs from the requested identifier form.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::record::{ArchetypeLinks, EntityRecord, Identifier, IdentifierBatch};

/// Identifier batches to fetch for one archetype
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchetypePlan {
    pub members: IdentifierBatch,
    pub support: IdentifierBatch,
    pub related: IdentifierBatch,
}

impl ArchetypePlan {
    pub fn new(links: &ArchetypeLinks) -> Self {
        Self {
            members: links.members.clone(),
            support: links.support.without(&links.members),
            related: links.related.without(&links.members).without(&links.support),
        }
    }
}

/// Members, support and related records of an archetype, pairwise disjoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGroup {
    pub members: Vec<EntityRecord>,
    pub support: Vec<EntityRecord>,
    pub related: Vec<EntityRecord>,
}

impl ResolvedGroup {
    /// Build the group from fetched lists, dropping records already
    /// claimed by a higher category. Fetch order is kept within each list.
    pub fn assemble(
        members: Vec<EntityRecord>,
        support: Vec<EntityRecord>,
        related: Vec<EntityRecord>,
    ) -> Self {
        let member_keys: HashSet<_> = members.iter().filter_map(EntityRecord::identity).collect();
        let support_keys: HashSet<_> = support.iter().filter_map(EntityRecord::identity).collect();

        // Related is reduced by the full support list, so compute it first
        let related = related
            .into_iter()
            .filter(|r| !claimed(r, &members, &member_keys) && !claimed(r, &support, &support_keys))
            .collect();
        let support = support
            .into_iter()
            .filter(|r| !claimed(r, &members, &member_keys))
            .collect();

        Self {
            members,
            support,
            related,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len() + self.support.len() + self.related.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A record without identity falls back to whole-record equality
fn claimed(record: &EntityRecord, higher: &[EntityRecord], keys: &HashSet<Identifier>) -> bool {
    match record.identity() {
        Some(key) => keys.contains(&key),
        None => higher.contains(record),
    }
}
