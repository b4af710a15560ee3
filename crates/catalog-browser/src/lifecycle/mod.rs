//! # System Lifecycle
//!
//! [`BrowserSystem`] wires the pieces together: it starts the coordinator
//! actor over a catalog source, owns the note store, and shuts everything
//! down in order.
//!
//! ```rust,ignore
//! let system = BrowserSystem::from_config(&config)?;
//! let outcome = system.coordinator.first_load().await?;
//! let state = system.coordinator.settled(outcome).await?;
//! system.notes.save(1, "remember this")?;
//! system.shutdown().await?;
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. Drop the client held by the system. Once every clone is gone the
//!    actor's mailbox closes.
//! 2. The actor cancels any load still in flight and leaves its loop.
//! 3. Await the actor task and report a panic as an error.

use crate::config::{BrowserConfig, ConfigError};
use crate::coordinator::{Coordinator, CoordinatorClient};
use crate::notes::{JsonFileStore, KeyValueStore, NoteStore};
use catalog_api::{CatalogSource, HttpCatalog};
use tracing::{error, info};

/// A running coordinator plus the note store front ends read beside it.
pub struct BrowserSystem<K: KeyValueStore> {
    /// Client for the coordinator actor.
    pub coordinator: CoordinatorClient,

    /// Notes, independent of the coordinator.
    pub notes: NoteStore<K>,

    handle: tokio::task::JoinHandle<()>,
}

impl BrowserSystem<JsonFileStore> {
    /// HTTP catalog and file-backed notes as configured.
    pub fn from_config(config: &BrowserConfig) -> Result<Self, ConfigError> {
        let source = HttpCatalog::with_base_url(config.api.base_url.clone());
        let store = JsonFileStore::new(config.notes_path()?);
        Ok(Self::start(source, store, config.coordinator.mailbox))
    }
}

impl<K: KeyValueStore> BrowserSystem<K> {
    /// Spawns the coordinator over `source`. Must be called inside a Tokio runtime.
    pub fn start<S: CatalogSource>(source: S, store: K, mailbox: usize) -> Self {
        let (actor, coordinator) = Coordinator::new(source, mailbox);
        let handle = tokio::spawn(actor.run());
        info!(mailbox, "Browser system started");

        Self {
            coordinator,
            notes: NoteStore::new(store),
            handle,
        }
    }

    /// Stops the coordinator and waits for it to exit.
    ///
    /// Clones of the coordinator client handed out earlier keep the actor
    /// alive; drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down browser system...");
        drop(self.coordinator);

        if let Err(e) = self.handle.await {
            error!("Coordinator task failed: {:?}", e);
            return Err(format!("Coordinator task failed: {:?}", e));
        }

        info!("Browser system shutdown complete.");
        Ok(())
    }
}
