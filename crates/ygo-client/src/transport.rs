//! Outbound HTTP seam
//!
//! Everything that talks to the network goes through [`Transport`], so the
//! client, gate and resolver can be driven by a scripted transport in tests.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ClientError;

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests.
///
/// Implementations map connection failures and timeouts to
/// [`ClientError::Unreachable`]; any response that arrives, whatever its
/// status, is returned as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, ClientError>;
}

/// reqwest-backed transport with a per-request timeout
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, ClientError> {
        let unreachable = |e: reqwest::Error| ClientError::Unreachable {
            url: url.to_string(),
            reason: if e.is_timeout() {
                format!("timed out: {}", e)
            } else {
                e.to_string()
            },
        };

        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(unreachable)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(unreachable)?;

        Ok(TransportResponse { status, body })
    }
}
