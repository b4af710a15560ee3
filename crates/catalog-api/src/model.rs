//! # Catalog Model
//!
//! Typed views of the JSON the catalog returns. Every list endpoint answers
//! with the same envelope:
//!
//! ```json
//! { "info": { "count": 826, "pages": 42, "next": "...?page=2", "prev": null },
//!   "results": [ ... ] }
//! ```
//!
//! Field names on the wire follow the API; the Rust names follow the domain.

use crate::kind::ResourceKind;
use serde::{Deserialize, Serialize};

/// Pagination metadata returned with every page.
///
/// `next` and `prev` are opaque cursors (URLs). Only their presence matters
/// to callers: it decides whether the neighbouring page can be requested.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

impl PageInfo {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    /// Free-form; commonly "Alive", "Dead" or "unknown".
    pub status: String,
    pub species: String,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(rename = "episode")]
    pub episode_refs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    #[serde(rename = "episode")]
    pub code: String,
    #[serde(rename = "characters")]
    pub character_refs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub dimension: String,
    #[serde(rename = "residents")]
    pub resident_refs: Vec<String>,
}

/// The response envelope shared by all list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

/// A decoded page for one resource kind.
///
/// Items and [`PageInfo`] always travel together so a consumer can replace
/// both from the same response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogPage {
    Characters(Page<Character>),
    Episodes(Page<Episode>),
    Locations(Page<Location>),
}

impl CatalogPage {
    pub fn kind(&self) -> ResourceKind {
        match self {
            CatalogPage::Characters(_) => ResourceKind::Character,
            CatalogPage::Episodes(_) => ResourceKind::Episode,
            CatalogPage::Locations(_) => ResourceKind::Location,
        }
    }

    pub fn info(&self) -> &PageInfo {
        match self {
            CatalogPage::Characters(page) => &page.info,
            CatalogPage::Episodes(page) => &page.info,
            CatalogPage::Locations(page) => &page.info,
        }
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        match self {
            CatalogPage::Characters(page) => page.results.len(),
            CatalogPage::Episodes(page) => page.results.len(),
            CatalogPage::Locations(page) => page.results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
