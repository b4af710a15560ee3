//! # Coordinator Messages
//!
//! The five browsing operations plus a snapshot query travel to the actor as
//! [`LoadRequest`]s. Finished fetches come back as [`Completion`]s on a
//! separate channel so they are applied by the same task that owns the state.

use super::cancel::CancelToken;
use super::state::{BrowserState, LoadId, LoadOutcome};
use catalog_api::{CatalogError, CatalogPage, ResourceKind};
use tokio::sync::oneshot;

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<T>;

/// Requests accepted by the coordinator.
#[derive(Debug)]
pub enum LoadRequest {
    SelectResource {
        kind: ResourceKind,
        respond_to: Response<LoadOutcome>,
    },
    FirstLoad {
        respond_to: Response<LoadOutcome>,
    },
    ApplySearch {
        text: String,
        respond_to: Response<LoadOutcome>,
    },
    NextPage {
        respond_to: Response<LoadOutcome>,
    },
    PrevPage {
        respond_to: Response<LoadOutcome>,
    },
    Snapshot {
        respond_to: Response<BrowserState>,
    },
}

/// A fetch that finished and was not cancelled at the time it returned.
#[derive(Debug)]
pub(crate) struct Completion {
    pub id: LoadId,
    pub token: CancelToken,
    pub kind: ResourceKind,
    pub result: Result<CatalogPage, CatalogError>,
}
