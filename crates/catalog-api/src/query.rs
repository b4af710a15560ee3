//! # Fetch Queries

use crate::kind::ResourceKind;

/// Parameters of a single list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub kind: ResourceKind,
    pub page: Option<u32>,
    pub name: Option<String>,
}

impl FetchQuery {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            page: None,
            name: None,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the name filter. An empty string means "no filter".
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Query string pairs in request order: `page` first, then `name`.
    ///
    /// Absent values are left out entirely, as is an empty name.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            pairs.push(("name", name.to_string()));
        }
        pairs
    }
}
