//! Scripted transport shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;
use ygo_client::{CachedClient, ClientError, Transport, TransportResponse};

pub const BASE_URL: &str = "http://api.test";

type Handler = dyn Fn(&Url) -> Result<TransportResponse, ClientError> + Send + Sync;

/// Transport answering from a closure, recording every requested URL
pub struct MockTransport {
    handler: Box<Handler>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&Url) -> Result<TransportResponse, ClientError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    /// Always answer `status` with `body`
    pub fn fixed(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| Ok(TransportResponse::new(status, body.clone())))
    }

    /// Serve the example catalog, see [`catalog`]
    pub fn catalog() -> Arc<Self> {
        Self::new(|url| Ok(catalog(url)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    /// Requests whose path is `path`
    pub fn calls_to(&self, path: &str) -> usize {
        self.urls()
            .iter()
            .filter(|u| Url::parse(u).map(|u| u.path() == path).unwrap_or(false))
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());

        let parsed = Url::parse(url).map_err(|e| ClientError::Unreachable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        (self.handler)(&parsed)
    }
}

pub fn client(transport: &Arc<MockTransport>) -> CachedClient {
    CachedClient::new(BASE_URL, transport.clone())
}

pub fn refused(url: &Url) -> ClientError {
    ClientError::Unreachable {
        url: url.to_string(),
        reason: "connection refused".into(),
    }
}

/// Decoded value of query parameter `key`
pub fn query(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub fn card(id: i64) -> Value {
    json!({"id": id, "name": format!("Card {}", id), "type": "Normal Monster"})
}

/// Card records for a `|`-joined id list, in request order
pub fn cards_for(ids: &str) -> Vec<Value> {
    ids.split('|')
        .filter_map(|id| id.parse().ok())
        .map(card)
        .collect()
}

fn ok(body: Value) -> TransportResponse {
    TransportResponse::new(200, body.to_string())
}

/// A small catalog:
///
/// - cards answer any `id` list
/// - archetype 1 "Blue-Eyes": members [1, 2], support [2, 3], related [3, 4]
/// - archetype 2 "Lonely": members [5], no support, related null
/// - set 10 "Legend of Blue Eyes": contents [4, 1]
pub fn catalog(url: &Url) -> TransportResponse {
    let id = query(url, "id");
    let name = query(url, "name");

    match url.path() {
        "/connection" => ok(json!({"status": "ok"})),
        "/names" => ok(json!({
            "card_names": ["Blue-Eyes White Dragon", "Dark Magician", "Kuriboh", "Red-Eyes Black Dragon"],
            "arch_names": ["Blue-Eyes", "Dark Magician", "Red-Eyes"],
            "set_names": ["Legend of Blue Eyes White Dragon", "Metal Raiders"],
        })),
        "/card_data" => match (id, name) {
            (Some(ids), _) => ok(Value::from(cards_for(&ids))),
            (None, Some(name)) if name == "Dark Magician" => {
                ok(json!([{"id": 46986414, "name": "Dark Magician"}]))
            }
            _ => ok(json!([])),
        },
        "/arch_data" => {
            let blue_eyes = json!({
                "id": 1, "name": "Blue-Eyes",
                "members": [1, 2], "support": [2, 3], "related": [3, 4],
            });
            let lonely = json!({
                "id": 2, "name": "Lonely",
                "members": [5], "support": [], "related": null,
            });
            match (id.as_deref(), name.as_deref()) {
                (Some("1"), _) | (_, Some("Blue-Eyes")) => ok(json!([blue_eyes])),
                (Some("2"), _) | (_, Some("Lonely")) => ok(json!([lonely])),
                _ => ok(json!([])),
            }
        }
        "/set_data" => match (id.as_deref(), name.as_deref()) {
            (Some("10"), _) | (_, Some("Legend of Blue Eyes")) => ok(json!([
                {"id": 10, "name": "Legend of Blue Eyes", "contents": [4, 1]}
            ])),
            _ => ok(json!([])),
        },
        _ => TransportResponse::new(404, "not found"),
    }
}
