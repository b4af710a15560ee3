//! Error types for note storage.

use std::path::PathBuf;

/// Errors raised by a [`KeyValueStore`](super::KeyValueStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Note store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Note store at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Note store lock poisoned")]
    Poisoned,
}
