//! Cross-Reference Resolver
//!
//! Turns the link lists of an archetype or set record into full card
//! records. Any failed sub-fetch fails the whole resolution with that
//! error; no partial group is returned.

use tracing::debug;
use ygo_core::{
    ArchetypeLinks, ArchetypePlan, EntityKind, EntityRecord, ResolvedGroup, SetLinks,
};

use crate::batch::fetch_cards;
use crate::client::CachedClient;
use crate::error::{ClientError, Result};

fn describe(kind: EntityKind, record: &EntityRecord) -> String {
    match record.identity() {
        Some(id) => format!("{} record {}", kind, id),
        None => format!("{} record", kind),
    }
}

/// Resolve an archetype into disjoint member, support and related cards.
///
/// The three batches are fetched concurrently; precedence is applied once
/// all of them have completed.
pub async fn resolve_archetype(client: &CachedClient, record: &EntityRecord) -> Result<ResolvedGroup> {
    let links = ArchetypeLinks::from_record(record)
        .map_err(|e| ClientError::record(describe(EntityKind::Archetype, record), e))?;
    let plan = ArchetypePlan::new(&links);

    debug!(
        "resolving archetype: {} members, {} support, {} related to fetch",
        plan.members.len(),
        plan.support.len(),
        plan.related.len()
    );

    let (members, support, related) = tokio::try_join!(
        fetch_cards(client, &plan.members),
        fetch_cards(client, &plan.support),
        fetch_cards(client, &plan.related),
    )?;

    Ok(ResolvedGroup::assemble(members, support, related))
}

/// Resolve a set into its cards, in fetched order.
pub async fn resolve_set(client: &CachedClient, record: &EntityRecord) -> Result<Vec<EntityRecord>> {
    let links = SetLinks::from_record(record)
        .map_err(|e| ClientError::record(describe(EntityKind::Set, record), e))?;

    debug!("resolving set: {} cards to fetch", links.contents.len());
    fetch_cards(client, &links.contents).await
}
