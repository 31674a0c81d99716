//! Metadata extraction module.
//!
//! Resolves the page fields used by the summary (title, description, site
//! name, content type, author, publish date) from Open Graph, Twitter Card,
//! schema.org-style and plain HTML meta tags.

pub mod meta_tags;

use crate::result::PageMetadata;

pub use meta_tags::{extract_meta, extract_title_element, parse_publish_date};

/// Meta keys tried for each field, highest priority first.
const TITLE_KEYS: &[&str] = &["og:title", "twitter:title"];
const DESCRIPTION_KEYS: &[&str] = &["og:description", "description", "twitter:description"];
const SITE_NAME_KEYS: &[&str] = &["og:site_name", "application-name"];
const CONTENT_TYPE_KEYS: &[&str] = &["og:type"];
const AUTHOR_KEYS: &[&str] = &["author", "article:author"];
const PUBLISHED_KEYS: &[&str] = &["article:published_time", "datePublished"];

/// Every key list above. Their meta patterns are compiled once.
pub(crate) const KEY_LISTS: [&[&str]; 6] = [
    TITLE_KEYS,
    DESCRIPTION_KEYS,
    SITE_NAME_KEYS,
    CONTENT_TYPE_KEYS,
    AUTHOR_KEYS,
    PUBLISHED_KEYS,
];

/// Extract all summary-relevant metadata from a document.
///
/// Each field takes the first non-empty value in its key list. The title
/// falls back to the `<title>` element. The publish date is only set when
/// the first non-empty date value parses.
///
/// # Examples
///
/// ```
/// use page_digest::metadata::extract_metadata;
///
/// let html = r#"<title>Fallback</title><meta name="twitter:title" content="Card title">"#;
/// let meta = extract_metadata(html);
/// assert_eq!(meta.title.as_deref(), Some("Card title"));
/// assert!(meta.description.is_none());
/// ```
#[must_use]
pub fn extract_metadata(html: &str) -> PageMetadata {
    let title = first_meta(html, TITLE_KEYS).or_else(|| non_empty(extract_title_element(html)));

    PageMetadata {
        title,
        description: first_meta(html, DESCRIPTION_KEYS),
        site_name: first_meta(html, SITE_NAME_KEYS),
        content_type: first_meta(html, CONTENT_TYPE_KEYS),
        author: first_meta(html, AUTHOR_KEYS),
        published: first_meta(html, PUBLISHED_KEYS).and_then(|raw| parse_publish_date(&raw)),
    }
}

/// First non-empty meta value among `keys`.
fn first_meta(html: &str, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| non_empty(extract_meta(html, key)))
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
