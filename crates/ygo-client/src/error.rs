//! Error types for the client side.

use thiserror::Error;
use ygo_core::{EntityKind, RecordError};

/// Failure of a single request to the remote data service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Connection failure or timeout
    #[error("remote service unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    /// Non-2xx response
    #[error("remote service answered {status} for {url}")]
    BadStatus { url: String, status: u16 },

    /// Body was not the JSON shape the caller expected
    #[error("could not decode {context}: {reason}")]
    Decode { context: String, reason: String },

    /// Detail lookup returned an empty list
    #[error("no {kind} found for {key}")]
    NotFound { kind: EntityKind, key: String },

    /// Identifier cannot be sent in a batch
    #[error("identifier '{0}' contains the batch separator")]
    InvalidIdentifier(String),
}

/// Coarse classification of a [`ClientError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unreachable,
    BadStatus,
    DecodeError,
    NotFound,
    InvalidIdentifier,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Unreachable { .. } => ErrorKind::Unreachable,
            ClientError::BadStatus { .. } => ErrorKind::BadStatus,
            ClientError::Decode { .. } => ErrorKind::DecodeError,
            ClientError::NotFound { .. } => ErrorKind::NotFound,
            ClientError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
        }
    }

    pub(crate) fn record(context: impl Into<String>, err: RecordError) -> Self {
        ClientError::Decode {
            context: context.into(),
            reason: err.to_string(),
        }
    }
}

/// The remote service never became reachable during startup.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("remote service at {url} not reachable after {attempts} attempts (last error: {last_error})")]
pub struct Unreachable {
    pub url: String,
    pub attempts: u32,
    pub last_error: String,
}

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Anything that stops the service from starting. All of these are fatal.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Unreachable(#[from] Unreachable),

    #[error("failed to load name index: {0}")]
    Names(#[source] ClientError),

    #[error("failed to open response cache: {0}")]
    Cache(#[from] ygo_sqlite::SqliteError),

    #[error("startup task failed: {0}")]
    Task(String),

    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
