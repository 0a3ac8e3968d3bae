//! Types for the search state machine.

use crate::feed::{FeedItem, SearchError};

/// Observable state of a search controller.
///
/// Exactly one variant is active at a time. Written only by the
/// controller's driver task; consumers read it through
/// `SearchController::current_state` or a subscribed watch receiver.
///
/// Per effective query the transitions are observed in order
/// `Idle -> Loading -> (Loaded | Failed)`; an empty query collapses
/// straight to `Idle` from any prior state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// No effective query; nothing to show.
    Idle,
    /// A fetch for the latest effective query is in flight.
    Loading,
    /// The latest fetch settled with at least one item.
    Loaded(Vec<FeedItem>),
    /// The latest fetch settled with an error, including zero results.
    Failed(SearchError),
}

impl SearchState {
    /// Items when loaded, empty otherwise.
    pub fn items(&self) -> &[FeedItem] {
        match self {
            SearchState::Loaded(items) => items,
            _ => &[],
        }
    }

    /// Error when failed.
    pub fn error(&self) -> Option<&SearchError> {
        match self {
            SearchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}
