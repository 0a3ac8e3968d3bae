//! Flickr public feed backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::FeedConfig;

use super::{FeedClient, FeedItem, FeedPage, SearchError};

/// Feed client backed by the Flickr public-photos feed.
pub struct FlickrFeedClient {
    client: Client,
    endpoint: String,
}

impl FlickrFeedClient {
    /// Create a new client from feed configuration.
    pub fn new(config: &FeedConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Build the feed URL for a query.
    fn build_feed_url(&self, query: &str) -> String {
        format!(
            "{}?format=json&nojsoncallback=1&tags={}",
            self.endpoint,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl FeedClient for FlickrFeedClient {
    fn name(&self) -> &str {
        "flickr"
    }

    async fn search(&self, query: &str) -> Result<FeedPage, SearchError> {
        let url = self.build_feed_url(query);
        debug!(query = query, "querying public feed");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Network("request timed out".to_string())
            } else if e.is_connect() {
                SearchError::Network(format!("connection failed: {}", e))
            } else {
                SearchError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Network(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let feed: WireFeed =
            serde_json::from_str(&body).map_err(|_| SearchError::InvalidResponse)?;

        debug!(
            query = query,
            items = feed.items.len(),
            "feed query complete"
        );

        Ok(FeedPage {
            items: feed.items.into_iter().map(FeedItem::from).collect(),
        })
    }
}

/// Wire format of the public feed payload. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct WireFeed {
    #[serde(default)]
    items: Vec<WireItem>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    #[serde(default)]
    title: String,
    link: String,
    media: WireMedia,
    #[serde(default)]
    date_taken: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    author: String,
}

/// The feed nests the image URL one level down as `media.m`.
#[derive(Debug, Deserialize)]
struct WireMedia {
    m: String,
}

impl From<WireItem> for FeedItem {
    fn from(item: WireItem) -> Self {
        Self {
            title: item.title,
            link: item.link,
            image_url: item.media.m,
            date_taken: item.date_taken,
            description: item.description,
            author: item.author,
        }
    }
}
