//! Cached Client
//!
//! Wraps GET requests to the remote data service with a response cache
//! keyed by the canonical request signature, and translates every failure
//! into a [`ClientError`].

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use ygo_core::cache::{CacheError, CacheResult, CachedResponse, RequestSignature, ResponseCache};

use crate::error::{ClientError, Result};
use crate::transport::Transport;

/// Current time in Unix milliseconds
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Cache backends may block on disk I/O, so calls run on the blocking pool
async fn cache_get(cache: &Arc<dyn ResponseCache>, key: &str) -> CacheResult<Option<CachedResponse>> {
    let cache = Arc::clone(cache);
    let key = key.to_string();
    tokio::task::spawn_blocking(move || cache.get(&key))
        .await
        .map_err(|e| CacheError::Backend(format!("cache task failed: {}", e)))?
}

async fn cache_put(cache: &Arc<dyn ResponseCache>, key: &str, entry: CachedResponse) -> CacheResult<()> {
    let cache = Arc::clone(cache);
    let key = key.to_string();
    tokio::task::spawn_blocking(move || cache.put(&key, entry))
        .await
        .map_err(|e| CacheError::Backend(format!("cache task failed: {}", e)))?
}

/// API client with an optional response cache.
///
/// Without a cache every call goes to the network (debug mode).
pub struct CachedClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    cache: Option<Arc<dyn ResponseCache>>,
    ttl: Duration,
}

impl CachedClient {
    /// Uncached client for `base_url` (scheme and host, no trailing slash)
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            cache: None,
            ttl: Duration::ZERO,
        }
    }

    /// Store successful responses in `cache`, fresh for `ttl`
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.ttl = ttl;
        self
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Absolute URL of an endpoint path
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Canonical signature (and cache key) of a request
    pub fn signature(&self, path: &str, params: &[(&str, &str)]) -> RequestSignature {
        RequestSignature::new(&self.endpoint_url(path), params)
    }

    /// GET `path` with `params` and return the parsed JSON body.
    ///
    /// A fresh cache entry is returned without a network call. Otherwise
    /// the response is fetched and, if it is a 2xx with a JSON body,
    /// cached. Failed requests never touch the cache.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let signature = self.signature(path, params);
        let key = signature.as_str();

        if let Some(cache) = &self.cache {
            match cache_get(cache, key).await {
                Ok(Some(entry)) if !cache.is_expired(&entry, now_ms()) => {
                    debug!("cache hit: {}", key);
                    return Ok(entry.body);
                }
                Ok(Some(_)) => debug!("cache expired: {}", key),
                Ok(None) => debug!("cache miss: {}", key),
                Err(e) => warn!("cache read failed for {}, fetching: {}", key, e),
            }
        }

        let response = self.transport.get(key).await?;
        if !response.is_success() {
            return Err(ClientError::BadStatus {
                url: key.to_string(),
                status: response.status,
            });
        }

        let body: Value = serde_json::from_str(&response.body).map_err(|e| ClientError::Decode {
            context: key.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(cache) = &self.cache {
            let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
            let entry = CachedResponse::new(body.clone(), now_ms(), ttl_ms);
            if let Err(e) = cache_put(cache, key, entry).await {
                warn!("cache write failed for {}: {}", key, e);
            }
        }

        Ok(body)
    }

    /// [`get`](Self::get) and deserialize the body into `T`
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let body = self.get(path, params).await?;
        serde_json::from_value(body).map_err(|e| ClientError::Decode {
            context: self.signature(path, params).to_string(),
            reason: e.to_string(),
        })
    }
}
