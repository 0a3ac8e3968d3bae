//! Photo feed abstraction.
//!
//! This module provides a `FeedClient` trait for querying public photo
//! feeds, a reqwest-backed Flickr implementation, and the description
//! micro-parser that extracts structured fields from the HTML snippet
//! embedded in each feed item.

pub mod description;
mod flickr;
mod types;

pub use description::ParsedDescription;
pub use flickr::FlickrFeedClient;
pub use types::*;
