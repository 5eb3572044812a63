//! Client-side request state machines.

use crate::{project_candidates, City, CityCandidate};

/// Shown when the backend rejects a search without saying why.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search cities";
/// Shown when a search never reached the backend.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Progress of one fetch owned by a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Errored,
}

impl<T> LoadState<T> {
    pub fn resolve<E>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(_) => LoadState::Errored,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// State of the search dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Results(Vec<City>),
    Empty,
    Errored(String),
}

impl SearchState {
    /// State entered when `query` is submitted. A blank query never reaches
    /// the backend and resets the dialog instead.
    pub fn submit(query: &str) -> Self {
        if query.trim().is_empty() {
            SearchState::Idle
        } else {
            SearchState::Searching
        }
    }

    /// Follows edits of the query field: clearing it resets the dialog.
    pub fn query_changed(self, query: &str) -> Self {
        if query.trim().is_empty() {
            SearchState::Idle
        } else {
            self
        }
    }

    pub fn found(candidates: Vec<CityCandidate>) -> Self {
        let cities = project_candidates(candidates);
        if cities.is_empty() {
            SearchState::Empty
        } else {
            SearchState::Results(cities)
        }
    }

    /// The backend answered with an error. `message` is the `error` field of
    /// its body when one could be read.
    pub fn rejected(message: Option<String>) -> Self {
        SearchState::Errored(message.unwrap_or_else(|| SEARCH_FAILED_MESSAGE.to_string()))
    }

    pub fn unreachable() -> Self {
        SearchState::Errored(NETWORK_ERROR_MESSAGE.to_string())
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching)
    }

    pub fn cities(&self) -> &[City] {
        match self {
            SearchState::Results(cities) => cities,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchState::Errored(message) => Some(message),
            _ => None,
        }
    }
}
