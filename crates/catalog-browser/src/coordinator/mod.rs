//! # Load Coordinator
//!
//! Owns the selected resource kind, the current page, the search text and the
//! load status, and orchestrates fetches through a
//! [`CatalogSource`](catalog_api::CatalogSource).
//!
//! ## Structure
//!
//! - [`actor`]: the [`Coordinator`] task and its state machine
//! - [`client`]: [`CoordinatorClient`], the handle front ends use
//! - [`state`]: [`BrowserState`], [`LoadState`], [`LoadOutcome`]
//! - [`cancel`]: [`CancelToken`]
//!
//! ## State Machine
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Loaded
//!                   │  ▲            │
//!                  err └───load─────┤
//!                   ▼               │
//!               Failed(msg) ──load──┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use catalog_api::mock::{page_of, MockCatalog};
//! use catalog_api::ResourceKind;
//! use catalog_browser::coordinator::{self, LoadState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockCatalog::new();
//!     mock.expect_fetch(ResourceKind::Character)
//!         .return_ok(page_of(ResourceKind::Character, 2, None, None));
//!
//!     let (actor, client) = coordinator::new(mock.clone());
//!     tokio::spawn(actor.run());
//!
//!     let outcome = client.first_load().await.unwrap();
//!     let state = client.settled(outcome).await.unwrap();
//!     assert_eq!(state.load_state, LoadState::Loaded);
//!     assert_eq!(state.characters.len(), 2);
//! }
//! ```

pub mod actor;
pub mod cancel;
pub mod client;
pub mod error;
pub mod message;
pub mod state;

pub use actor::Coordinator;
pub use cancel::CancelToken;
pub use client::CoordinatorClient;
pub use error::CoordinatorError;
pub use message::LoadRequest;
pub use state::{BrowserState, LoadId, LoadOutcome, LoadState};

use catalog_api::CatalogSource;

/// Default capacity of the request mailbox.
pub const DEFAULT_MAILBOX: usize = 32;

/// Creates a coordinator over `source` and its client.
pub fn new<S: CatalogSource>(source: S) -> (Coordinator<S>, CoordinatorClient) {
    Coordinator::new(source, DEFAULT_MAILBOX)
}
