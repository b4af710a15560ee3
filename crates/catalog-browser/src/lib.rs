//! # Catalog Browser
//!
//! Browsing state for a paginated catalog of characters, episodes and
//! locations, plus per-character notes.
//!
//! ## Modules
//!
//! - **[coordinator]**: the single-flight load coordinator. An actor owns the
//!   selected kind, page, search text, results and load state; front ends
//!   drive it through [`CoordinatorClient`](coordinator::CoordinatorClient).
//! - **[notes]**: [`NoteStore`](notes::NoteStore) over an injectable
//!   [`KeyValueStore`](notes::KeyValueStore).
//! - **[config]**: TOML configuration.
//! - **[lifecycle]**: [`BrowserSystem`](lifecycle::BrowserSystem), which starts
//!   and stops everything.
//!
//! The HTTP side lives in the `catalog-api` crate.

pub mod config;
pub mod coordinator;
pub mod lifecycle;
pub mod notes;
