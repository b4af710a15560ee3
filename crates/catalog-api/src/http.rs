//! # HTTP Catalog
//!
//! [`HttpCatalog`] issues `GET {base}/{kind}?page=..&name=..` with `reqwest`
//! and decodes the body into a [`CatalogPage`].

use crate::error::CatalogError;
use crate::kind::ResourceKind;
use crate::model::{CatalogPage, Page};
use crate::query::FetchQuery;
use crate::source::CatalogSource;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Public endpoint of the catalog.
pub const BASE_URL: &str = "https://rickandmortyapi.com/api";

/// [`CatalogSource`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Client against the public endpoint.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Client against another endpoint, e.g. a local test server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the list endpoint for `kind`, without query string.
    pub fn endpoint(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.base_url, kind.path())
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    #[instrument(skip(self), fields(kind = %query.kind, page = ?query.page))]
    async fn fetch(&self, query: &FetchQuery) -> Result<CatalogPage, CatalogError> {
        let url = self.endpoint(query.kind);
        debug!(%url, name = ?query.name, "Sending request");

        let response = self
            .http
            .get(&url)
            .query(&query.query_pairs())
            .send()
            .await
            .map_err(CatalogError::Network)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Unexpected status");
            return Err(CatalogError::BadResponse {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(CatalogError::Network)?;
        let page = decode_page(query.kind, &body)?;
        debug!(items = page.len(), "Decoded page");
        Ok(page)
    }
}

/// Decodes a `{ info, results }` body for `kind`.
pub fn decode_page(kind: ResourceKind, body: &[u8]) -> Result<CatalogPage, CatalogError> {
    match kind {
        ResourceKind::Character => decode(kind, body).map(CatalogPage::Characters),
        ResourceKind::Episode => decode(kind, body).map(CatalogPage::Episodes),
        ResourceKind::Location => decode(kind, body).map(CatalogPage::Locations),
    }
}

fn decode<T: DeserializeOwned>(kind: ResourceKind, body: &[u8]) -> Result<Page<T>, CatalogError> {
    serde_json::from_slice(body).map_err(|source| CatalogError::Decode { kind, source })
}
