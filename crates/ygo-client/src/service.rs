//! CardService - the operations offered to the presentation layer
//!
//! Owns the Cached Client and the Name Index. Built once at startup; every
//! method takes `&self`, so one service can be shared by all request
//! handlers behind an `Arc`.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use ygo_core::{
    EntityKey, EntityKind, EntityRecord, FuzzyMatcher, NameIndex, ResolvedGroup, SearchResults,
};
use ygo_sqlite::{SqliteCache, SqliteError};

use crate::client::{now_ms, CachedClient};
use crate::config::{ClientConfig, GateConfig};
use crate::error::{ClientError, Result, StartupError};
use crate::gate;
use crate::resolver;
use crate::transport::HttpTransport;

/// Fetch `/names` and build the Name Index
pub async fn load_names(client: &CachedClient) -> Result<NameIndex> {
    let index: NameIndex = client.get_as("/names", &[]).await?;
    let (cards, archetypes, sets) = index.counts();
    info!(
        "name index loaded: {} cards, {} archetypes, {} sets (fingerprint {})",
        cards,
        archetypes,
        sets,
        index.fingerprint()
    );
    Ok(index)
}

/// Open the persistent cache and evict every entry already stale at
/// `now_ms`, so the table only grows by what is still fresh.
pub fn open_cache(path: &Path, now_ms: i64) -> std::result::Result<SqliteCache, SqliteError> {
    let cache = SqliteCache::open(path)?;
    let evicted = cache.purge_expired(now_ms)?;
    info!(
        "response cache at {} ({} stale entries evicted)",
        path.display(),
        evicted
    );
    Ok(cache)
}

pub struct CardService {
    client: CachedClient,
    index: Arc<NameIndex>,
    matcher: FuzzyMatcher,
}

impl CardService {
    /// Assemble a service from an existing client and index
    pub fn from_parts(client: CachedClient, index: impl Into<Arc<NameIndex>>) -> Self {
        Self {
            client,
            index: index.into(),
            matcher: FuzzyMatcher::new(),
        }
    }

    /// Replace the default matcher (threshold 50, limit 10)
    pub fn with_matcher(mut self, matcher: FuzzyMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Production startup: HTTP transport, SQLite cache unless disabled,
    /// then [`start`](Self::start).
    pub async fn startup(config: &ClientConfig) -> std::result::Result<Self, StartupError> {
        let transport = Arc::new(HttpTransport::new(config.request_timeout)?);
        let mut client = CachedClient::new(config.api_url.clone(), transport);

        if config.cache_enabled {
            let path = config.cache_path.clone();
            let cache = tokio::task::spawn_blocking(move || open_cache(&path, now_ms()))
                .await
                .map_err(|e| StartupError::Task(e.to_string()))??;
            client = client.with_cache(Arc::new(cache), config.cache_ttl);
        } else {
            info!("debug mode: response cache disabled");
        }

        Self::start(client, &config.gate).await
    }

    /// Run the Connection Gate, then load the Name Index.
    ///
    /// Must complete before any request is served.
    pub async fn start(
        client: CachedClient,
        gate_config: &GateConfig,
    ) -> std::result::Result<Self, StartupError> {
        let probe_url = client.endpoint_url("/connection");
        gate::await_ready(client.transport().as_ref(), &probe_url, gate_config).await?;

        let index = load_names(&client).await.map_err(StartupError::Names)?;
        Ok(Self::from_parts(client, index))
    }

    /// Every known name, per kind
    pub fn names(&self) -> &NameIndex {
        &self.index
    }

    /// Fuzzy search all three name pools
    pub fn search(&self, term: &str) -> SearchResults {
        self.index.search(term, &self.matcher)
    }

    /// Card by id or name
    pub async fn get_card(&self, key: &str) -> Result<EntityRecord> {
        self.lookup(EntityKind::Card, key).await
    }

    /// Archetype by id or name, with its resolved cross-references
    pub async fn get_archetype(&self, key: &str) -> Result<(EntityRecord, ResolvedGroup)> {
        let archetype = self.lookup(EntityKind::Archetype, key).await?;
        let group = resolver::resolve_archetype(&self.client, &archetype).await?;
        Ok((archetype, group))
    }

    /// Set by id or name, with its cards
    pub async fn get_set(&self, key: &str) -> Result<(EntityRecord, Vec<EntityRecord>)> {
        let set = self.lookup(EntityKind::Set, key).await?;
        let contents = resolver::resolve_set(&self.client, &set).await?;
        Ok((set, contents))
    }

    /// First record of a detail lookup; an empty list is `NotFound`
    async fn lookup(&self, kind: EntityKind, key: &str) -> Result<EntityRecord> {
        let key = EntityKey::parse(key);
        let (param, value) = key.query_param();

        let records: Vec<EntityRecord> = self
            .client
            .get_as(kind.endpoint(), &[(param, value.as_str())])
            .await?;

        records.into_iter().next().ok_or_else(|| ClientError::NotFound {
            kind,
            key: key.to_string(),
        })
    }
}
