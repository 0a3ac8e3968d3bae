//! Types for the photo feed search system.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::description::{self, ParsedDescription};

/// A single photo entry from the public feed.
///
/// Identity is the `link` field: two items with the same link refer to the
/// same photo. Immutable once decoded from a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Photo title.
    pub title: String,
    /// Canonical photo page URL, unique per item.
    pub link: String,
    /// Direct image URL (the feed's nested `media.m` value).
    pub image_url: String,
    /// When the photo was taken, as reported by the feed (ISO-8601-like).
    pub date_taken: String,
    /// Raw HTML description snippet; see [`description::parse`].
    pub description: String,
    /// Author string as reported by the feed.
    pub author: String,
}

impl FeedItem {
    /// Stable identity for list diffing and de-duplication.
    pub fn id(&self) -> &str {
        &self.link
    }

    /// Structured fields extracted from the raw description snippet.
    ///
    /// Computed on demand. Unparseable snippets yield
    /// [`ParsedDescription::EMPTY`], never an error.
    pub fn parsed_description(&self) -> ParsedDescription {
        description::parse(&self.description)
    }

    /// `date_taken` parsed as an RFC 3339 timestamp, if well-formed.
    pub fn taken_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.date_taken).ok()
    }
}

/// One page of feed results for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPage {
    /// Items in feed order.
    pub items: Vec<FeedItem>,
}

/// Errors surfaced to consumers of the search pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Transport failure or non-2xx response.
    #[error("network error: {0}")]
    Network(String),

    /// The payload failed structural decoding.
    #[error("invalid response from the feed")]
    InvalidResponse,

    /// Well-formed response with zero items.
    #[error("no photos found for this search")]
    EmptyResults,
}

impl SearchError {
    /// Recovery hint for the presentation layer.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SearchError::Network(_) => "Check your internet connection and try again",
            SearchError::InvalidResponse => "Please try again later",
            SearchError::EmptyResults => "Try different search terms",
        }
    }
}

/// Trait for photo feed backends.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Fetch one page of items matching `query`, sent as a tag filter.
    ///
    /// A well-formed response with zero items is returned as an empty page,
    /// never as an error; mapping it to [`SearchError::EmptyResults`] is the
    /// controller's policy.
    async fn search(&self, query: &str) -> Result<FeedPage, SearchError>;
}
