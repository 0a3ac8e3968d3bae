//! Photo feed search core.
//!
//! Turns a stream of raw keystrokes into a stream of settled search results
//! against a public photo feed. The debounce/de-duplication/cancellation
//! state machine lives in [`controller`]; the feed boundary (client trait,
//! Flickr implementation, description micro-parser) lives in [`feed`].
//!
//! Presentation is out of scope: consumers observe [`SearchState`] through
//! [`SearchController::subscribe`] and render whatever it exposes.

pub mod config;
pub mod controller;
pub mod feed;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, FeedConfig,
    SearchConfig,
};
pub use controller::{SearchController, SearchState, DEFAULT_DEBOUNCE};
pub use feed::{
    FeedClient, FeedItem, FeedPage, FlickrFeedClient, ParsedDescription, SearchError,
};
