//! # Coordinator Actor
//!
//! The task that owns all browsing state. Requests are handled one at a time,
//! so nothing here needs a lock. Fetches run in their own tasks and report
//! back through the completion channel; the actor decides whether a result
//! still matters.

use super::cancel::CancelToken;
use super::client::CoordinatorClient;
use super::message::{Completion, LoadRequest};
use super::state::{BrowserState, LoadId, LoadOutcome, LoadState};
use catalog_api::{CatalogPage, CatalogSource, FetchQuery, ResourceKind};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The load currently allowed to change state.
struct InFlight {
    id: LoadId,
    token: CancelToken,
}

/// Single-flight load coordinator over a [`CatalogSource`].
///
/// # Ordering
///
/// Starting a load cancels the token of the previous one. A completion is
/// applied only if its token is still live *and* its id is the one in flight,
/// so the last load issued is the only one whose outcome is ever observed,
/// whatever order the responses arrive in.
pub struct Coordinator<S: CatalogSource> {
    receiver: mpsc::Receiver<LoadRequest>,
    completions: mpsc::UnboundedReceiver<Completion>,
    completion_sender: mpsc::UnboundedSender<Completion>,
    source: Arc<S>,
    state: BrowserState,
    in_flight: Option<InFlight>,
    next_id: LoadId,
    publisher: watch::Sender<BrowserState>,
}

impl<S: CatalogSource> Coordinator<S> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` bounds the request mailbox; callers wait when it is full.
    pub fn new(source: S, buffer_size: usize) -> (Self, CoordinatorClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (completion_sender, completions) = mpsc::unbounded_channel();
        let (publisher, watcher) = watch::channel(BrowserState::new());

        let actor = Self {
            receiver,
            completions,
            completion_sender,
            source: Arc::new(source),
            state: BrowserState::new(),
            in_flight: None,
            next_id: 0,
            publisher,
        };
        (actor, CoordinatorClient::new(sender, watcher))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        info!(kind = %self.state.selected, "Coordinator started");

        loop {
            tokio::select! {
                // Completions first: a response that already arrived belongs
                // to the state the next request will build on.
                biased;
                Some(done) = self.completions.recv() => self.apply(done),
                msg = self.receiver.recv() => match msg {
                    Some(request) => self.handle(request),
                    None => break,
                },
            }
        }

        if let Some(in_flight) = self.in_flight.take() {
            in_flight.token.cancel();
            debug!(load_id = in_flight.id, "Cancelled load on shutdown");
        }
        info!(last_load = self.next_id, "Shutdown");
    }

    fn handle(&mut self, request: LoadRequest) {
        match request {
            LoadRequest::SelectResource { kind, respond_to } => {
                let _ = respond_to.send(self.select_resource(kind));
            }
            LoadRequest::FirstLoad { respond_to } => {
                let _ = respond_to.send(self.first_load());
            }
            LoadRequest::ApplySearch { text, respond_to } => {
                let _ = respond_to.send(self.apply_search(text));
            }
            LoadRequest::NextPage { respond_to } => {
                let _ = respond_to.send(self.next_page());
            }
            LoadRequest::PrevPage { respond_to } => {
                let _ = respond_to.send(self.prev_page());
            }
            LoadRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.state.clone());
            }
        }
    }

    // --- Operations ---

    fn select_resource(&mut self, kind: ResourceKind) -> LoadOutcome {
        if kind == self.state.selected {
            debug!(%kind, "Already selected");
            return LoadOutcome::Ignored;
        }
        self.state.selected = kind;
        self.state.search_text.clear();
        self.state.page = 1;
        self.start_load()
    }

    fn first_load(&mut self) -> LoadOutcome {
        self.state.search_text.clear();
        self.state.page = 1;
        self.start_load()
    }

    fn apply_search(&mut self, text: String) -> LoadOutcome {
        self.state.search_text = text;
        self.state.page = 1;
        self.start_load()
    }

    fn next_page(&mut self) -> LoadOutcome {
        if !self.state.has_next() {
            debug!(page = self.state.page, "No next page");
            return LoadOutcome::Ignored;
        }
        self.state.page += 1;
        self.start_load()
    }

    fn prev_page(&mut self) -> LoadOutcome {
        if !self.state.has_prev() || self.state.page <= 1 {
            debug!(page = self.state.page, "No previous page");
            return LoadOutcome::Ignored;
        }
        self.state.page = self.state.page.saturating_sub(1).max(1);
        self.start_load()
    }

    // --- Load plumbing ---

    fn start_load(&mut self) -> LoadOutcome {
        if let Some(previous) = self.in_flight.take() {
            previous.token.cancel();
            debug!(load_id = previous.id, "Cancelled in-flight load");
        }

        self.next_id += 1;
        let id = self.next_id;
        let token = CancelToken::new();
        let query = FetchQuery {
            kind: self.state.selected,
            page: Some(self.state.page),
            name: self.state.name_filter(),
        };
        debug!(load_id = id, kind = %query.kind, page = self.state.page, name = ?query.name, "Load issued");

        self.in_flight = Some(InFlight {
            id,
            token: token.clone(),
        });
        self.state.load_state = LoadState::Loading;
        self.publish();

        let source = Arc::clone(&self.source);
        let completions = self.completion_sender.clone();
        tokio::spawn(async move {
            let result = source.fetch(&query).await;
            if token.is_cancelled() {
                debug!(load_id = id, "Fetch returned after cancellation");
                return;
            }
            let _ = completions.send(Completion {
                id,
                token,
                kind: query.kind,
                result,
            });
        });

        LoadOutcome::Issued(id)
    }

    fn apply(&mut self, done: Completion) {
        let current = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.id == done.id);
        if done.token.is_cancelled() || !current {
            debug!(load_id = done.id, "Discarded superseded load");
            return;
        }
        self.in_flight = None;

        let outcome = done.result.map_err(|e| e.to_string()).and_then(|page| {
            if page.kind() == self.state.selected {
                Ok(page)
            } else {
                Err(format!(
                    "received a {} page for a {} request",
                    page.kind(),
                    done.kind
                ))
            }
        });

        match outcome {
            Ok(page) => {
                let items = page.len();
                self.replace_results(page);
                self.state.load_state = LoadState::Loaded;
                info!(load_id = done.id, kind = %done.kind, page = self.state.page, items, "Loaded");
            }
            Err(message) => {
                warn!(load_id = done.id, kind = %done.kind, error = %message, "Load failed");
                self.state.load_state = LoadState::Failed(message);
            }
        }
        self.state.settled = Some(done.id);
        self.publish();
    }

    /// Items and page info come from the same response and are swapped together.
    fn replace_results(&mut self, page: CatalogPage) {
        match page {
            CatalogPage::Characters(page) => {
                self.state.characters = page.results;
                self.state.info = Some(page.info);
            }
            CatalogPage::Episodes(page) => {
                self.state.episodes = page.results;
                self.state.info = Some(page.info);
            }
            CatalogPage::Locations(page) => {
                self.state.locations = page.results;
                self.state.info = Some(page.info);
            }
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}
