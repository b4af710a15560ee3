//! # Browsing State
//!
//! [`BrowserState`] is everything a front end needs to draw the list screen.
//! The coordinator owns the only writable copy and publishes clones of it.

use catalog_api::{Character, Episode, Location, PageInfo, ResourceKind};

/// Progress of the most recent load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Human-readable description of why the load failed.
    Failed(String),
}

impl LoadState {
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed(_))
    }
}

/// Generation number of a load. Later loads have larger ids.
pub type LoadId = u64;

/// What the coordinator did with an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A fetch was started; its result will be applied unless superseded.
    Issued(LoadId),
    /// The operation had nothing to do and issued no request.
    Ignored,
}

impl LoadOutcome {
    pub fn is_issued(&self) -> bool {
        matches!(self, LoadOutcome::Issued(_))
    }
}

/// Snapshot of the coordinator's observable fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowserState {
    pub selected: ResourceKind,
    pub page: u32,
    pub search_text: String,
    pub load_state: LoadState,
    /// Pagination of the last successful load.
    pub info: Option<PageInfo>,
    pub characters: Vec<Character>,
    pub episodes: Vec<Episode>,
    pub locations: Vec<Location>,
    /// Id of the load that produced the current `Loaded`/`Failed` state.
    pub settled: Option<LoadId>,
}

impl BrowserState {
    pub(crate) fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// Whether a next page can be requested.
    pub fn has_next(&self) -> bool {
        self.info.as_ref().is_some_and(PageInfo::has_next)
    }

    /// Whether a previous page can be requested.
    pub fn has_prev(&self) -> bool {
        self.info.as_ref().is_some_and(PageInfo::has_prev)
    }

    /// Name filter derived from the search text, `None` when blank.
    pub fn name_filter(&self) -> Option<String> {
        if self.search_text.trim().is_empty() {
            None
        } else {
            Some(self.search_text.clone())
        }
    }

    /// Whether load `id`, or a load issued after it, has settled.
    pub fn has_settled(&self, id: LoadId) -> bool {
        self.settled.is_some_and(|settled| settled >= id)
    }

    /// Number of items held for the selected kind.
    pub fn item_count(&self) -> usize {
        match self.selected {
            ResourceKind::Character => self.characters.len(),
            ResourceKind::Episode => self.episodes.len(),
            ResourceKind::Location => self.locations.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = BrowserState::new();
        assert_eq!(state.page, 1);
        assert_eq!(state.load_state, LoadState::Idle);
        assert_eq!(state.selected, ResourceKind::Character);
        assert!(!state.has_next());
        assert!(!state.has_prev());
    }

    #[test]
    fn test_blank_search_has_no_filter() {
        let mut state = BrowserState::new();
        state.search_text = "   ".to_string();
        assert_eq!(state.name_filter(), None);
        state.search_text = "Morty".to_string();
        assert_eq!(state.name_filter().as_deref(), Some("Morty"));
    }
}
