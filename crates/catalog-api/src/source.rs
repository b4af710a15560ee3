//! # CatalogSource Trait
//!
//! The seam between whoever orchestrates loads and whatever serves pages.
//! Production code uses [`HttpCatalog`](crate::HttpCatalog); tests plug in the
//! doubles from [`mock`](crate::mock).

use crate::error::CatalogError;
use crate::model::CatalogPage;
use crate::query::FetchQuery;
use async_trait::async_trait;

/// Something that can answer a [`FetchQuery`] with one typed page.
///
/// Implementations perform exactly one attempt per call. Retrying, caching
/// and timeouts beyond the transport default are not part of the contract.
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    async fn fetch(&self, query: &FetchQuery) -> Result<CatalogPage, CatalogError>;
}
