//! Description micro-parser.
//!
//! The public feed embeds a small HTML snippet in each item's description:
//! an author anchor, a photo anchor, and a thumbnail image tag, always in
//! the same fixed grammar. This module extracts the structured fields from
//! that snippet with three narrow patterns instead of a general HTML parser.
//!
//! Parsing is total: input that does not contain all three patterns yields
//! [`ParsedDescription::EMPTY`], never an error.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use url::Url;

/// First anchor of the form `<a href="URL">NAME</a>`.
static AUTHOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a href="[^"]+">[^<]+</a>"#).expect("valid author pattern"));

/// Anchor of the form `<a href="URL" title="TITLE">`.
static PHOTO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a href="[^"]+" title="[^"]+">"#).expect("valid photo pattern"));

/// Image fragment of the form `<img src="URL" width="W" height="H"`.
static IMAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img src="[^"]+" width="\d+" height="\d+""#).expect("valid image pattern"));

/// Structured fields derived from a feed item's description snippet.
///
/// Either all three sub-patterns matched and every field is populated (URLs
/// individually degrade to `None` when their value does not parse), or none
/// matched and the value equals [`ParsedDescription::EMPTY`]. No
/// partial-match state is observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDescription {
    /// Link to the author's page.
    pub author_url: Option<Url>,
    /// Author display name, exact interior text (no entity decoding).
    pub author_name: String,
    /// Link to the photo page.
    pub photo_url: Option<Url>,
    /// Photo title from the anchor's `title` attribute.
    pub photo_title: String,
    /// Thumbnail image URL.
    pub thumbnail_url: Option<Url>,
    /// Thumbnail width in pixels; 0 when not numeric.
    pub thumbnail_width: u32,
    /// Thumbnail height in pixels; 0 when not numeric.
    pub thumbnail_height: u32,
}

impl ParsedDescription {
    /// The "no data" sentinel: all URLs absent, strings empty, dimensions 0.
    pub const EMPTY: Self = Self {
        author_url: None,
        author_name: String::new(),
        photo_url: None,
        photo_title: String::new(),
        thumbnail_url: None,
        thumbnail_width: 0,
        thumbnail_height: 0,
    };

    /// Whether this is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Default for ParsedDescription {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Parse a description snippet into its structured fields.
///
/// Matching is all-or-nothing: if any of the three patterns is missing the
/// whole parse degrades to [`ParsedDescription::EMPTY`].
pub fn parse(html: &str) -> ParsedDescription {
    let (Some(author), Some(photo), Some(image)) = (
        AUTHOR_PATTERN.find(html),
        PHOTO_PATTERN.find(html),
        IMAGE_PATTERN.find(html),
    ) else {
        return ParsedDescription::EMPTY;
    };

    let author = author.as_str();
    let photo = photo.as_str();
    let image = image.as_str();

    ParsedDescription {
        author_url: attribute(author, "href").and_then(|v| Url::parse(v).ok()),
        author_name: interior_text(author).to_string(),
        photo_url: attribute(photo, "href").and_then(|v| Url::parse(v).ok()),
        photo_title: attribute(photo, "title").unwrap_or_default().to_string(),
        thumbnail_url: attribute(image, "src").and_then(|v| Url::parse(v).ok()),
        thumbnail_width: dimension(image, "width"),
        thumbnail_height: dimension(image, "height"),
    }
}

/// Locate `name="value"` inside a matched fragment and return the interior
/// value. Used uniformly for href, title, src, width and height.
fn attribute<'a>(fragment: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    let start = fragment.find(&needle)? + needle.len();
    let rest = &fragment[start..];
    let end = rest.find('"')?;
    if end == 0 {
        None
    } else {
        Some(&rest[..end])
    }
}

/// Text between the tag's closing `>` and the `</a>` terminator.
fn interior_text(fragment: &str) -> &str {
    let Some(start) = fragment.find('>') else {
        return "";
    };
    let Some(end) = fragment.find("</a>") else {
        return "";
    };
    if start + 1 > end {
        return "";
    }
    &fragment[start + 1..end]
}

/// Numeric attribute value; non-numeric values degrade to 0 independently
/// of any URL outcome.
fn dimension(fragment: &str, name: &str) -> u32 {
    attribute(fragment, name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
