//! Error types shared across the crate
//!
//! The library surfaces a small set of named error kinds; the binary wraps
//! them in `anyhow` context at the boundary.

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by the collection client, the controller, and the
/// persistence bridge.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or non-2xx response from the collection endpoint.
    /// The client never retries; the controller leaves previously displayed
    /// results in place when it sees this.
    #[error("collection request failed")]
    RemoteFetch(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// Persisted session data exists but cannot be parsed. Treated as "no
    /// saved state" by the session store's lenient load path.
    #[error("persisted session state is malformed")]
    MalformedPersistedState(#[source] serde_json::Error),

    /// The state directory could not be resolved or created.
    #[error("state directory unavailable")]
    StateDir(#[source] std::io::Error),

    /// Writing the session file failed.
    #[error("failed to persist session state")]
    Persist(#[source] std::io::Error),

    /// Reserved for facet-value validation against the catalog; no current
    /// operation raises it.
    #[error("invalid value {value:?} for facet {facet}")]
    InvalidFilter { facet: &'static str, value: String },

    /// Artwork details were requested with an empty object number.
    #[error("object number must not be empty")]
    InvalidObjectNumber,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::RemoteFetch(Box::new(err))
    }
}
