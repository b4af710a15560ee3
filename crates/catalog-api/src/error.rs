//! # Catalog Errors
//!
//! Every way a fetch can fail. The three kinds stay distinct here even though
//! the coordinator reports them all the same way, so logs and tests can tell a
//! dropped connection from a malformed body.

use crate::kind::ResourceKind;

/// Errors returned by a [`CatalogSource`](crate::CatalogSource).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Transport or connectivity failure before a status was received.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a status outside `200..300`.
    #[error("bad response: HTTP {status}")]
    BadResponse { status: u16 },

    /// The body was not a `{ info, results }` page of the expected kind.
    #[error("could not decode {kind} page: {source}")]
    Decode {
        kind: ResourceKind,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    pub fn is_network(&self) -> bool {
        matches!(self, CatalogError::Network(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, CatalogError::Decode { .. })
    }
}
