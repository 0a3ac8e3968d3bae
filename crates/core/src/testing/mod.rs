//! Testing utilities and mock implementations.
//!
//! Provides a controllable `FeedClient` mock and fixture builders so the
//! search pipeline can be exercised without real network traffic.

mod mock_client;

pub use mock_client::{MockFeedClient, RecordedQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::feed::FeedItem;

    /// Create a test feed item with reasonable defaults.
    ///
    /// The description snippet is well-formed, so `parsed_description()`
    /// returns populated fields.
    pub fn feed_item(title: &str, link: &str) -> FeedItem {
        FeedItem {
            title: title.to_string(),
            link: link.to_string(),
            image_url: "https://live.staticflickr.com/65535/54321_m.jpg".to_string(),
            date_taken: "2024-05-01T10:00:00-08:00".to_string(),
            description: description_html("tester", title),
            author: "nobody@flickr.com (\"tester\")".to_string(),
        }
    }

    /// A description snippet in the feed's fixed grammar.
    pub fn description_html(author: &str, title: &str) -> String {
        format!(
            concat!(
                r#" <p><a href="https://www.flickr.com/people/{author}/">{author}</a> posted a photo:</p> "#,
                r#"<p><a href="https://www.flickr.com/photos/{author}/54321/" title="{title}">"#,
                r#"<img src="https://live.staticflickr.com/65535/54321_m.jpg" width="240" height="160" alt="{title}" /></a></p>"#,
            ),
            author = author,
            title = title,
        )
    }
}
