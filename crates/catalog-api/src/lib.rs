//! # Catalog API
//!
//! Typed access to a paginated REST catalog of characters, episodes and
//! locations.
//!
//! ## Core Abstractions
//!
//! - [`CatalogSource`]: the async trait everything else depends on. One call,
//!   one page, one attempt.
//! - [`HttpCatalog`]: the production source, built on `reqwest`.
//! - [`CatalogPage`]: a decoded page. Items and [`PageInfo`] arrive together
//!   and are meant to be replaced together.
//! - [`CatalogError`]: `Network`, `BadResponse` and `Decode`, kept apart so
//!   callers can tell them apart.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use catalog_api::{CatalogSource, FetchQuery, HttpCatalog, ResourceKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), catalog_api::CatalogError> {
//!     let catalog = HttpCatalog::new();
//!     let query = FetchQuery::new(ResourceKind::Character).page(1).name("rick");
//!     let page = catalog.fetch(&query).await?;
//!     println!("{} results, next page: {}", page.len(), page.info().has_next());
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockCatalog`](mock::MockCatalog) for
//! expectation-driven tests and [`ChannelSource`](mock::ChannelSource) for
//! tests that need to decide when (and in which order) responses arrive.

pub mod error;
pub mod http;
pub mod kind;
pub mod mock;
pub mod model;
pub mod query;
pub mod source;
pub mod tracing;

pub use error::CatalogError;
pub use http::{decode_page, HttpCatalog, BASE_URL};
pub use kind::{ResourceKind, UnknownKind};
pub use model::{CatalogPage, Character, Episode, Location, Page, PageInfo};
pub use query::FetchQuery;
pub use source::CatalogSource;
