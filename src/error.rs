use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the archive client and its result type.
///
/// Malformed lines in the index response and non-success status codes are
/// not represented here: the former are dropped, the latter are parsed like
/// any other body.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be issued (connection, TLS, timeout, ...).
    #[error("failed to query web archive: {0}")]
    Request(#[source] BoxError),

    /// Headers arrived but the body could not be drained.
    #[error("failed to read web archive response: {0}")]
    BodyRead(#[source] BoxError),

    #[error("failed to serialize archive result: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid archive endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}
