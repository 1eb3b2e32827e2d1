//! Canonical request signatures
//!
//! The signature is the full request URL with query parameters sorted by
//! name then value, so callers passing the same parameters in a different
//! order share one cache entry.

use std::fmt;

use url::form_urlencoded;

/// Canonical URL of a GET request; doubles as its cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestSignature {
    url: String,
}

impl RequestSignature {
    pub fn new<K, V>(endpoint: &str, params: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut sorted: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_ref()))
            .collect();
        sorted.sort_unstable();

        if sorted.is_empty() {
            return Self {
                url: endpoint.to_string(),
            };
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(sorted)
            .finish();

        Self {
            url: format!("{}?{}", endpoint, query),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for RequestSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
