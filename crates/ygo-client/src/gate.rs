//! Connection Gate
//!
//! Blocks startup until the remote data service answers its probe
//! endpoint. Waits between attempts grow exponentially from
//! `base_delay`, capped at `max_delay`; there is no wait before the first
//! attempt.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::GateConfig;
use crate::error::Unreachable;
use crate::transport::Transport;

/// Wait after the `attempt`-th failed probe (1-based):
/// `base_delay * 2^(attempt - 1)`, capped at `max_delay`.
pub fn backoff_delay(config: &GateConfig, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(31);
    config
        .base_delay
        .checked_mul(1u32 << exponent)
        .map_or(config.max_delay, |delay| delay.min(config.max_delay))
}

/// Probe `probe_url` until it answers 2xx.
///
/// Returns the number of attempts used. After `max_attempts` failures
/// returns [`Unreachable`]; callers treat that as fatal.
pub async fn await_ready(
    transport: &dyn Transport,
    probe_url: &str,
    config: &GateConfig,
) -> Result<u32, Unreachable> {
    let max_attempts = config.max_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=max_attempts {
        info!("trying to connect to api at {} ({}/{})", probe_url, attempt, max_attempts);

        match transport.get(probe_url).await {
            Ok(response) if response.is_success() => {
                info!("api ready after {} attempt(s)", attempt);
                return Ok(attempt);
            }
            Ok(response) => last_error = format!("status {}", response.status),
            Err(e) => last_error = e.to_string(),
        }

        if attempt < max_attempts {
            let delay = backoff_delay(config, attempt);
            warn!(
                "api not ready ({}), retrying in {:.1}s",
                last_error,
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
        }
    }

    error!("api unreachable after {} attempts: {}", max_attempts, last_error);
    Err(Unreachable {
        url: probe_url.to_string(),
        attempts: max_attempts,
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_ms: u64, max_ms: u64) -> GateConfig {
        GateConfig {
            max_attempts: 10,
            base_delay: Duration::from_millis(base_ms),
            max_delay: Duration::from_millis(max_ms),
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let c = config(1000, 10_000);
        assert_eq!(backoff_delay(&c, 1), Duration::from_secs(1));
        assert_eq!(backoff_delay(&c, 2), Duration::from_secs(2));
        assert_eq!(backoff_delay(&c, 3), Duration::from_secs(4));
        assert_eq!(backoff_delay(&c, 4), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_capped() {
        let c = config(1000, 10_000);
        assert_eq!(backoff_delay(&c, 5), Duration::from_secs(10));
        assert_eq!(backoff_delay(&c, 40), Duration::from_secs(10));
        assert_eq!(backoff_delay(&c, u32::MAX), Duration::from_secs(10));
    }
}
