//! Mock feed client for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::feed::{FeedClient, FeedItem, FeedPage, SearchError};

/// A recorded search for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    /// The query text that was searched.
    pub query: String,
    /// When the search started.
    pub started_at: Instant,
}

/// A query handler that produces items dynamically based on the query.
type QueryHandler = Box<dyn Fn(&str) -> Option<Vec<FeedItem>> + Send + Sync>;

/// Mock implementation of the [`FeedClient`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable items
/// - Track queries for assertions
/// - Simulate failures and slow responses
///
/// Queries are recorded before the simulated delay, so a fetch that is
/// cancelled mid-response still shows up in `recorded_queries`.
pub struct MockFeedClient {
    items: Arc<RwLock<Vec<FeedItem>>>,
    queries: Arc<RwLock<Vec<RecordedQuery>>>,
    next_error: Arc<RwLock<Option<SearchError>>>,
    response_delay: Arc<RwLock<Option<Duration>>>,
    query_handler: Arc<RwLock<Option<QueryHandler>>>,
}

impl std::fmt::Debug for MockFeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockFeedClient")
            .field("items", &"<items>")
            .field("queries", &"<queries>")
            .field("next_error", &"<next_error>")
            .field("response_delay", &"<response_delay>")
            .field("query_handler", &"<handler>")
            .finish()
    }
}

impl Default for MockFeedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFeedClient {
    /// Create a new mock client with no items configured.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            response_delay: Arc::new(RwLock::new(None)),
            query_handler: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the items to return for subsequent searches.
    pub async fn set_items(&self, items: Vec<FeedItem>) {
        *self.items.write().await = items;
    }

    /// Add a single item.
    pub async fn add_item(&self, item: FeedItem) {
        self.items.write().await.push(item);
    }

    /// Clear all configured items.
    pub async fn clear_items(&self) {
        self.items.write().await.clear();
    }

    /// Get recorded search queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.queries.read().await.clone()
    }

    /// Get the number of searches started.
    pub async fn search_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Configure the next search to fail with the given error.
    ///
    /// The error is consumed by the next search that reaches the point of
    /// responding; a search cancelled during the simulated delay leaves it
    /// in place.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    /// Simulate a slow backend: every search sleeps this long before
    /// responding.
    pub async fn set_response_delay(&self, delay: Duration) {
        *self.response_delay.write().await = Some(delay);
    }

    /// Clear the simulated delay.
    pub async fn clear_response_delay(&self) {
        *self.response_delay.write().await = None;
    }

    /// Set a handler that dynamically generates items based on the query
    /// string. Return `Some(items)` to answer the query, or `None` to fall
    /// back to the configured items.
    pub async fn set_query_handler<F>(&self, handler: F)
    where
        F: Fn(&str) -> Option<Vec<FeedItem>> + Send + Sync + 'static,
    {
        *self.query_handler.write().await = Some(Box::new(handler));
    }

    /// Clear the query handler.
    pub async fn clear_query_handler(&self) {
        *self.query_handler.write().await = None;
    }
}

#[async_trait]
impl FeedClient for MockFeedClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &str) -> Result<FeedPage, SearchError> {
        self.queries.write().await.push(RecordedQuery {
            query: query.to_string(),
            started_at: Instant::now(),
        });

        let delay = *self.response_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        {
            let handler = self.query_handler.read().await;
            if let Some(ref h) = *handler {
                if let Some(items) = h(query) {
                    return Ok(FeedPage { items });
                }
            }
        }

        Ok(FeedPage {
            items: self.items.read().await.clone(),
        })
    }
}
