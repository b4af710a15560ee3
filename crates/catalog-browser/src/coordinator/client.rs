//! # Coordinator Client
//!
//! The only way front ends talk to the coordinator. Each operation resolves
//! once the actor has *dispatched* it; use [`CoordinatorClient::settled`] or
//! [`CoordinatorClient::subscribe`] to follow the load itself.

use super::error::CoordinatorError;
use super::message::{LoadRequest, Response};
use super::state::{BrowserState, LoadOutcome};
use catalog_api::ResourceKind;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Cheap-to-clone handle to a running [`Coordinator`](super::Coordinator).
#[derive(Clone)]
pub struct CoordinatorClient {
    sender: mpsc::Sender<LoadRequest>,
    watcher: watch::Receiver<BrowserState>,
}

impl CoordinatorClient {
    pub(crate) fn new(
        sender: mpsc::Sender<LoadRequest>,
        watcher: watch::Receiver<BrowserState>,
    ) -> Self {
        Self { sender, watcher }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> LoadRequest,
    ) -> Result<T, CoordinatorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| CoordinatorError::ActorClosed)?;
        response.await.map_err(|_| CoordinatorError::ActorDropped)
    }

    /// Switches to `kind`, clearing the search and going back to page 1.
    /// Selecting the current kind does nothing.
    #[instrument(skip(self))]
    pub async fn select_resource(&self, kind: ResourceKind) -> Result<LoadOutcome, CoordinatorError> {
        debug!("Sending request");
        self.request(|respond_to| LoadRequest::SelectResource { kind, respond_to })
            .await
    }

    /// Loads page 1 without a filter. Used on startup and for refresh.
    #[instrument(skip(self))]
    pub async fn first_load(&self) -> Result<LoadOutcome, CoordinatorError> {
        debug!("Sending request");
        self.request(|respond_to| LoadRequest::FirstLoad { respond_to })
            .await
    }

    /// Retries after a failure. Same as [`first_load`](Self::first_load).
    pub async fn retry(&self) -> Result<LoadOutcome, CoordinatorError> {
        self.first_load().await
    }

    /// Loads page 1 filtered by `text`; empty text means no filter.
    #[instrument(skip(self, text))]
    pub async fn apply_search(&self, text: impl Into<String>) -> Result<LoadOutcome, CoordinatorError> {
        let text = text.into();
        debug!(%text, "Sending request");
        self.request(|respond_to| LoadRequest::ApplySearch { text, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn next_page(&self) -> Result<LoadOutcome, CoordinatorError> {
        debug!("Sending request");
        self.request(|respond_to| LoadRequest::NextPage { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn prev_page(&self) -> Result<LoadOutcome, CoordinatorError> {
        debug!("Sending request");
        self.request(|respond_to| LoadRequest::PrevPage { respond_to })
            .await
    }

    /// Current state as seen by the actor, after all queued requests.
    pub async fn snapshot(&self) -> Result<BrowserState, CoordinatorError> {
        self.request(|respond_to| LoadRequest::Snapshot { respond_to })
            .await
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.watcher.clone()
    }

    /// Waits until the load behind `outcome` (or a later one) has settled.
    ///
    /// For [`LoadOutcome::Ignored`] this returns the current state at once.
    pub async fn settled(&self, outcome: LoadOutcome) -> Result<BrowserState, CoordinatorError> {
        let id = match outcome {
            LoadOutcome::Issued(id) => id,
            LoadOutcome::Ignored => return Ok(self.watcher.borrow().clone()),
        };
        let mut watcher = self.subscribe();
        let state = watcher
            .wait_for(|state| state.has_settled(id))
            .await
            .map_err(|_| CoordinatorError::ActorClosed)?;
        Ok(state.clone())
    }
}
