//! Connection gate retry timing, driven by tokio's paused clock

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use common::{refused, MockTransport};
use pretty_assertions::assert_eq;
use tokio::time::Instant;
use ygo_client::{await_ready, GateConfig, TransportResponse};

const PROBE: &str = "http://api.test/connection";

fn gate(max_attempts: u32) -> GateConfig {
    GateConfig {
        max_attempts,
        base_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(10),
    }
}

#[tokio::test(start_paused = true)]
async fn test_ready_immediately() {
    let transport = MockTransport::fixed(200, "ok");
    let start = Instant::now();

    let attempts = await_ready(transport.as_ref(), PROBE, &gate(5)).await.unwrap();

    assert_eq!(attempts, 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_retries_with_backoff() {
    let failures = AtomicU32::new(0);
    let transport = MockTransport::new(move |url| {
        if failures.fetch_add(1, Ordering::SeqCst) < 3 {
            Err(refused(url))
        } else {
            Ok(TransportResponse::new(200, "ok"))
        }
    });
    let start = Instant::now();

    let attempts = await_ready(transport.as_ref(), PROBE, &gate(30)).await.unwrap();

    assert_eq!(attempts, 4);
    assert_eq!(transport.calls(), 4);
    // 1s + 2s + 4s
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(7), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(8), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_non_success_status_is_retried() {
    let failures = AtomicU32::new(0);
    let transport = MockTransport::new(move |_| {
        if failures.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(TransportResponse::new(503, "starting"))
        } else {
            Ok(TransportResponse::new(200, "ok"))
        }
    });

    let attempts = await_ready(transport.as_ref(), PROBE, &gate(30)).await.unwrap();
    assert_eq!(attempts, 2);
}

#[tokio::test(start_paused = true)]
async fn test_gives_up_after_max_attempts() {
    let transport = MockTransport::new(|url| Err(refused(url)));
    let start = Instant::now();

    let err = await_ready(transport.as_ref(), PROBE, &gate(6)).await.unwrap_err();

    assert_eq!(err.attempts, 6);
    assert_eq!(err.url, PROBE);
    assert!(err.last_error.contains("connection refused"));
    assert_eq!(transport.calls(), 6);
    // 1 + 2 + 4 + 8 + 10, no wait after the last attempt
    assert!(start.elapsed() >= Duration::from_secs(25));
    assert!(start.elapsed() < Duration::from_secs(26));
}
