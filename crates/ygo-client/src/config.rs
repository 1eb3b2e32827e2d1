//! Client configuration
//!
//! Defaults match a local development setup; `from_env` overrides them
//! from the process environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_CACHE_PATH: &str = "request_cache.sqlite";

/// Connection Gate retry policy
#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    /// Probes before giving up (at least one is always made)
    pub max_attempts: u32,
    /// Wait after the first failed probe; doubles after each further failure
    pub base_delay: Duration,
    /// Upper bound for any single wait
    pub max_delay: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

/// Settings for talking to the remote data service
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the remote data service, without trailing slash
    pub api_url: String,
    /// `false` runs every request uncached (debug mode)
    pub cache_enabled: bool,
    /// SQLite file backing the response cache
    pub cache_path: PathBuf,
    /// How long a cached response stays fresh
    pub cache_ttl: Duration,
    /// Bound on every outbound request
    pub request_timeout: Duration,
    pub gate: GateConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_enabled: true,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            cache_ttl: Duration::from_secs(24 * 60 * 60),
            request_timeout: Duration::from_secs(10),
            gate: GateConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment.
    ///
    /// | variable | field |
    /// |---|---|
    /// | `API_URL` | `api_url` |
    /// | `YGO_DEBUG` | disables the cache when truthy |
    /// | `YGO_CACHE_PATH` | `cache_path` |
    /// | `YGO_CACHE_TTL_SECS` | `cache_ttl` |
    /// | `YGO_REQUEST_TIMEOUT_SECS` | `request_timeout` |
    /// | `YGO_CONNECT_ATTEMPTS` | `gate.max_attempts` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("API_URL") {
            config.api_url = normalize_api_url(&url);
        }
        if let Some(debug) = lookup("YGO_DEBUG") {
            config.cache_enabled = !is_truthy(&debug);
        }
        if let Some(path) = lookup("YGO_CACHE_PATH") {
            config.cache_path = PathBuf::from(path);
        }
        if let Some(secs) = lookup("YGO_CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(parse_number("YGO_CACHE_TTL_SECS", &secs)?);
        }
        if let Some(secs) = lookup("YGO_REQUEST_TIMEOUT_SECS") {
            let secs = parse_number("YGO_REQUEST_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(ConfigError {
                    var: "YGO_REQUEST_TIMEOUT_SECS",
                    value: secs.to_string(),
                    reason: "timeout must be positive".to_string(),
                });
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = lookup("YGO_CONNECT_ATTEMPTS") {
            let attempts = parse_number("YGO_CONNECT_ATTEMPTS", &attempts)?;
            config.gate.max_attempts = u32::try_from(attempts).map_err(|e| ConfigError {
                var: "YGO_CONNECT_ATTEMPTS",
                value: attempts.to_string(),
                reason: e.to_string(),
            })?;
        }

        Ok(config)
    }
}

/// Trim trailing slashes and add `http://` to a bare `host:port`
pub fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.gate.base_delay, Duration::from_secs(1));
        assert_eq!(config.gate.max_delay, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("API_URL", "api:5000/"),
            ("YGO_DEBUG", "true"),
            ("YGO_CACHE_PATH", "/tmp/cache.sqlite"),
            ("YGO_CACHE_TTL_SECS", "60"),
            ("YGO_REQUEST_TIMEOUT_SECS", "3"),
            ("YGO_CONNECT_ATTEMPTS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://api:5000");
        assert!(!config.cache_enabled);
        assert_eq!(config.cache_path, PathBuf::from("/tmp/cache.sqlite"));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.gate.max_attempts, 5);
    }

    #[test]
    fn test_debug_falsy_keeps_cache() {
        let config = ClientConfig::from_lookup(lookup(&[("YGO_DEBUG", "0")])).unwrap();
        assert!(config.cache_enabled);
    }

    #[test]
    fn test_invalid_number() {
        let err = ClientConfig::from_lookup(lookup(&[("YGO_CACHE_TTL_SECS", "soon")])).unwrap_err();
        assert_eq!(err.var, "YGO_CACHE_TTL_SECS");

        let err =
            ClientConfig::from_lookup(lookup(&[("YGO_REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();
        assert_eq!(err.var, "YGO_REQUEST_TIMEOUT_SECS");
    }

    #[test]
    fn test_normalize_api_url() {
        assert_eq!(normalize_api_url("localhost:5000"), "http://localhost:5000");
        assert_eq!(normalize_api_url("https://api.example/"), "https://api.example");
    }
}
