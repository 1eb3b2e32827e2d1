//! Batch Fetcher
//!
//! Resolves a whole [`IdentifierBatch`] with one request by joining the
//! identifiers into a single `id` query value.

use tracing::debug;
use ygo_core::{EntityKind, EntityRecord, Identifier, IdentifierBatch};

use crate::client::CachedClient;
use crate::error::{ClientError, Result};

/// Separator between batched identifiers
pub const SEPARATOR: &str = "|";

/// Fetch every record named in `batch` from the `kind` endpoint.
///
/// Records come back in the service's order, which need not match the
/// batch. An empty batch returns an empty list without a request, since
/// an unfiltered request would return everything.
pub async fn fetch_batch(
    client: &CachedClient,
    kind: EntityKind,
    batch: &IdentifierBatch,
) -> Result<Vec<EntityRecord>> {
    if batch.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(bad) = batch
        .ids()
        .iter()
        .find(|id| matches!(id, Identifier::Name(name) if name.contains(SEPARATOR)))
    {
        return Err(ClientError::InvalidIdentifier(bad.to_string()));
    }

    let joined = batch.join(SEPARATOR);
    debug!("fetching {} {}(s) in one batch", batch.len(), kind);

    client.get_as(kind.endpoint(), &[("id", joined.as_str())]).await
}

/// [`fetch_batch`] against the card endpoint
pub async fn fetch_cards(client: &CachedClient, batch: &IdentifierBatch) -> Result<Vec<EntityRecord>> {
    fetch_batch(client, EntityKind::Card, batch).await
}
