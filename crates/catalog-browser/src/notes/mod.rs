//! # Note Store
//!
//! Free-text notes attached to characters, kept in a flat string key-value
//! namespace.
//!
//! The namespace is abstracted behind [`KeyValueStore`] so the same
//! [`NoteStore`] works over a JSON file in production and an in-memory map in
//! tests.
//!
//! ## Implementations
//!
//! - [`JsonFileStore`]: one JSON object on disk, survives restarts.
//! - [`MemoryStore`]: a `HashMap`, gone when dropped.
//!
//! ## Keys
//!
//! Only characters carry notes, so the key space is `note:<id>`.

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use tracing::debug;

/// A synchronous string key-value namespace.
///
/// Each call is atomic on its own; no ordering is promised between calls made
/// from different threads.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Key under which the note for character `id` is stored.
pub fn note_key(id: u32) -> String {
    format!("note:{id}")
}

/// Notes keyed by character id.
#[derive(Debug, Clone)]
pub struct NoteStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The note for `id`, or an empty string if none was ever saved.
    pub fn load(&self, id: u32) -> Result<String, StoreError> {
        let note = self.store.load(&note_key(id))?.unwrap_or_default();
        debug!(id, len = note.len(), "Loaded note");
        Ok(note)
    }

    /// Saves `text` as the note for `id`, replacing any previous note.
    pub fn save(&self, id: u32, text: &str) -> Result<(), StoreError> {
        self.store.save(&note_key(id), text)?;
        debug!(id, len = text.len(), "Saved note");
        Ok(())
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}
