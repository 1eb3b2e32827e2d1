//! # ygo-lookup client
//!
//! Query-and-resolution core on top of a remote card data service:
//! - **gate**: blocks startup until the service answers
//! - **client**: cached, error-translating GET client
//! - **batch**: one request per identifier batch
//! - **resolver**: archetype and set cross-references
//! - **service**: `CardService`, the operations used by the presentation layer
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ygo_client::{CardService, ClientConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let service = CardService::startup(&config).await?;
//!
//! let results = service.search("blue eyes");
//! let (archetype, group) = service.get_archetype("Blue-Eyes").await?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod resolver;
pub mod service;
pub mod tracing;
pub mod transport;

// Re-export commonly used items at crate root
pub use batch::{fetch_batch, fetch_cards};
pub use client::CachedClient;
pub use config::{ClientConfig, GateConfig};
pub use error::{ClientError, ConfigError, ErrorKind, Result, StartupError, Unreachable};
pub use gate::await_ready;
pub use resolver::{resolve_archetype, resolve_set};
pub use service::CardService;
pub use transport::{HttpTransport, Transport, TransportResponse};
