//! ResponseCache behaviour of SqliteCache

use pretty_assertions::assert_eq;
use serde_json::json;
use ygo_core::cache::{CachedResponse, ResponseCache};
use ygo_sqlite::SqliteCache;

fn card_list() -> serde_json::Value {
    json!([
        {"id": 89631139, "name": "Blue-Eyes White Dragon", "atk": 3000},
        {"id": 40640057, "name": "Kuriboh", "atk": 300}
    ])
}

#[test]
fn test_put_and_get() {
    let cache = SqliteCache::in_memory().unwrap();
    let response = CachedResponse::new(card_list(), 1_700_000_000_000, 60_000);

    cache
        .put("http://api/card_data?id=89631139%7C40640057", response.clone())
        .unwrap();

    let hit = cache
        .get("http://api/card_data?id=89631139%7C40640057")
        .unwrap();
    assert_eq!(hit, Some(response));
}

#[test]
fn test_get_missing() {
    let cache = SqliteCache::in_memory().unwrap();
    assert!(cache.get("http://api/names").unwrap().is_none());
}

#[test]
fn test_put_replaces_entry() {
    let cache = SqliteCache::in_memory().unwrap();

    cache
        .put("k", CachedResponse::new(json!({"v": 1}), 0, 10))
        .unwrap();
    cache
        .put("k", CachedResponse::new(json!({"v": 2}), 20, 10))
        .unwrap();

    assert_eq!(cache.len().unwrap(), 1);
    let hit = cache.get("k").unwrap().unwrap();
    assert_eq!(hit.body, json!({"v": 2}));
    assert_eq!(hit.expires_at, 30);
}

#[test]
fn test_remove_and_clear() {
    let cache = SqliteCache::in_memory().unwrap();
    cache.put("a", CachedResponse::new(json!(1), 0, 10)).unwrap();
    cache.put("b", CachedResponse::new(json!(2), 0, 10)).unwrap();

    assert!(cache.remove("a").unwrap());
    assert!(!cache.remove("a").unwrap());
    assert_eq!(cache.len().unwrap(), 1);

    cache.clear().unwrap();
    assert!(cache.is_empty().unwrap());
}

#[test]
fn test_expiry_and_purge() {
    let cache = SqliteCache::in_memory().unwrap();
    cache.put("old", CachedResponse::new(json!(1), 0, 100)).unwrap();
    cache.put("new", CachedResponse::new(json!(2), 0, 10_000)).unwrap();

    let old = cache.get("old").unwrap().unwrap();
    assert!(cache.is_expired(&old, 100));

    let purged = cache.purge_expired(5_000).unwrap();
    assert_eq!(purged, 1);
    assert!(cache.get("old").unwrap().is_none());
    assert!(cache.get("new").unwrap().is_some());
}

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request_cache.sqlite");

    {
        let cache = SqliteCache::open(&path).unwrap();
        cache
            .put("http://api/names", CachedResponse::new(card_list(), 0, 60_000))
            .unwrap();
    }

    let cache = SqliteCache::open(&path).unwrap();
    let hit = cache.get("http://api/names").unwrap().unwrap();
    assert_eq!(hit.body, card_list());
}

#[test]
fn test_shared_across_threads() {
    use std::sync::Arc;

    let cache = Arc::new(SqliteCache::in_memory().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("http://api/card_data?id={}", i);
                    cache
                        .put(&key, CachedResponse::new(json!([{"id": i, "t": t}]), 0, 1_000))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len().unwrap(), 25);
}

#[test]
fn test_file_cache_concurrent_readers() {
    use std::sync::Arc;

    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(SqliteCache::open(dir.path().join("request_cache.sqlite")).unwrap());
    for i in 0..10 {
        let key = format!("http://api/card_data?id={}", i);
        cache
            .put(&key, CachedResponse::new(json!([{"id": i}]), 0, 60_000))
            .unwrap();
    }

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..10 {
                    let key = format!("http://api/card_data?id={}", i);
                    let hit = cache.get(&key).unwrap().unwrap();
                    assert_eq!(hit.body, json!([{"id": i}]));
                }
                // Writers interleave with readers
                cache
                    .put(&format!("http://api/set_data?id={}", t), CachedResponse::new(json!([]), 0, 60_000))
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len().unwrap(), 14);
}

#[test]
fn test_reopen_keeps_stale_rows_until_purged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request_cache.sqlite");

    {
        let cache = SqliteCache::open(&path).unwrap();
        for i in 0..100 {
            let key = format!("http://api/card_data?id={}", i);
            cache.put(&key, CachedResponse::new(json!([]), 0, 1)).unwrap();
        }
    }

    let cache = SqliteCache::open(&path).unwrap();
    assert_eq!(cache.len().unwrap(), 100);
    assert_eq!(cache.purge_expired(1).unwrap(), 100);
    assert!(cache.is_empty().unwrap());
}
