//! # Test Doubles
//!
//! Two ways to stand in for the real catalog:
//!
//! | Double | Answers | Use Case |
//! |--------|---------|----------|
//! | [`MockCatalog`] | Immediately, from a queue of expectations | Checking *what* gets requested and how results are applied |
//! | [`ChannelSource`] | Whenever the test completes the [`PendingFetch`] | Checking behaviour when responses arrive late or out of order |
//!
//! ## Expectations
//!
//! ```rust
//! use catalog_api::mock::{page_of, MockCatalog};
//! use catalog_api::{CatalogSource, FetchQuery, ResourceKind};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockCatalog::new();
//!     mock.expect_fetch(ResourceKind::Episode)
//!         .return_ok(page_of(ResourceKind::Episode, 0, None, None));
//!
//!     let page = mock.fetch(&FetchQuery::new(ResourceKind::Episode)).await.unwrap();
//!     assert!(page.is_empty());
//!     mock.verify();
//! }
//! ```
//!
//! ## Manual completion
//!
//! ```rust
//! use catalog_api::mock::{create_mock_source, expect_fetch, page_of};
//! use catalog_api::{CatalogSource, FetchQuery, ResourceKind};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (source, mut pending) = create_mock_source(8);
//!     let task = tokio::spawn(async move {
//!         source.fetch(&FetchQuery::new(ResourceKind::Location).page(1)).await
//!     });
//!
//!     let fetch = expect_fetch(&mut pending).await.expect("Expected a fetch");
//!     assert_eq!(fetch.query.page, Some(1));
//!     fetch.respond(Ok(page_of(ResourceKind::Location, 0, None, None)));
//!
//!     assert!(task.await.unwrap().is_ok());
//! }
//! ```

use crate::error::CatalogError;
use crate::kind::ResourceKind;
use crate::model::{CatalogPage, Character, Episode, Location, Page, PageInfo};
use crate::query::FetchQuery;
use crate::source::CatalogSource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

struct Expectation {
    kind: ResourceKind,
    response: Result<CatalogPage, CatalogError>,
}

/// A catalog that answers from a queue of expectations, in order.
///
/// Every call is recorded and can be inspected with [`MockCatalog::calls`].
/// A call with no matching expectation panics.
#[derive(Clone, Default)]
pub struct MockCatalog {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    calls: Arc<Mutex<Vec<FetchQuery>>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects the next fetch to target `kind`.
    pub fn expect_fetch(&self, kind: ResourceKind) -> FetchExpectationBuilder {
        FetchExpectationBuilder {
            kind,
            expectations: self.expectations.clone(),
        }
    }

    /// Every query received so far.
    pub fn calls(&self) -> Vec<FetchQuery> {
        self.calls.lock().unwrap().clone()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn fetch(&self, query: &FetchQuery) -> Result<CatalogPage, CatalogError> {
        self.calls.lock().unwrap().push(query.clone());
        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(exp) if exp.kind == query.kind => exp.response,
            Some(exp) => panic!("Expected fetch of {}, got {}", exp.kind, query.kind),
            None => panic!("Unexpected fetch: {:?}", query),
        }
    }
}

/// Builder for fetch expectations.
pub struct FetchExpectationBuilder {
    kind: ResourceKind,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl FetchExpectationBuilder {
    /// Sets the expectation to return a page.
    pub fn return_ok(self, page: CatalogPage) {
        self.push(Ok(page));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<CatalogPage, CatalogError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            kind: self.kind,
            response,
        });
    }
}

// =============================================================================
// MANUAL COMPLETION
// =============================================================================

/// A fetch waiting for the test to answer it.
///
/// Dropping it without responding leaves the fetch hanging forever, which
/// models a request that never comes back.
#[derive(Debug)]
pub struct PendingFetch {
    pub query: FetchQuery,
    respond_to: oneshot::Sender<Result<CatalogPage, CatalogError>>,
}

impl PendingFetch {
    /// Completes the fetch. Returns `false` if the caller already gave up.
    pub fn respond(self, response: Result<CatalogPage, CatalogError>) -> bool {
        self.respond_to.send(response).is_ok()
    }
}

/// A catalog whose fetches block until the test responds to them.
#[derive(Clone)]
pub struct ChannelSource {
    sender: mpsc::Sender<PendingFetch>,
}

#[async_trait]
impl CatalogSource for ChannelSource {
    async fn fetch(&self, query: &FetchQuery) -> Result<CatalogPage, CatalogError> {
        let (respond_to, response) = oneshot::channel();
        let pending = PendingFetch {
            query: query.clone(),
            respond_to,
        };
        if self.sender.send(pending).await.is_err() {
            panic!("Mock receiver dropped while a fetch was issued");
        }
        match response.await {
            Ok(result) => result,
            Err(_) => std::future::pending().await,
        }
    }
}

/// Creates a [`ChannelSource`] and the receiver its fetches arrive on.
pub fn create_mock_source(buffer_size: usize) -> (ChannelSource, mpsc::Receiver<PendingFetch>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelSource { sender }, receiver)
}

/// Waits for the next fetch issued through a [`ChannelSource`].
pub async fn expect_fetch(receiver: &mut mpsc::Receiver<PendingFetch>) -> Option<PendingFetch> {
    receiver.recv().await
}

// =============================================================================
// FIXTURES
// =============================================================================

/// Page info with the given cursors. `count` doubles as the page item count.
pub fn info(count: u32, next: Option<&str>, prev: Option<&str>) -> PageInfo {
    PageInfo {
        count,
        pages: 1,
        next: next.map(str::to_string),
        prev: prev.map(str::to_string),
    }
}

pub fn character(id: u32, name: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        status: "Alive".to_string(),
        species: "Human".to_string(),
        image_url: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        episode_refs: vec!["https://rickandmortyapi.com/api/episode/1".to_string()],
    }
}

pub fn episode(id: u32, name: &str) -> Episode {
    Episode {
        id,
        name: name.to_string(),
        air_date: "December 2, 2013".to_string(),
        code: format!("S01E{id:02}"),
        character_refs: Vec::new(),
    }
}

pub fn location(id: u32, name: &str) -> Location {
    Location {
        id,
        name: name.to_string(),
        kind: "Planet".to_string(),
        dimension: "Dimension C-137".to_string(),
        resident_refs: Vec::new(),
    }
}

/// A page of `count` generated items of `kind` with the given cursors.
pub fn page_of(kind: ResourceKind, count: u32, next: Option<&str>, prev: Option<&str>) -> CatalogPage {
    let info = info(count, next, prev);
    let ids = 1..=count;
    match kind {
        ResourceKind::Character => CatalogPage::Characters(Page {
            info,
            results: ids.map(|id| character(id, &format!("Character {id}"))).collect(),
        }),
        ResourceKind::Episode => CatalogPage::Episodes(Page {
            info,
            results: ids.map(|id| episode(id, &format!("Episode {id}"))).collect(),
        }),
        ResourceKind::Location => CatalogPage::Locations(Page {
            info,
            results: ids.map(|id| location(id, &format!("Location {id}"))).collect(),
        }),
    }
}
