//! HTML meta tag lookup.
//!
//! Looks up `<meta>` values by `name=` or `property=` with flat regex
//! matching instead of a parsed tree. Every lookup rescans the document,
//! which keeps it stateless and tolerant of markup a strict parser rejects.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use super::KEY_LISTS;
use crate::entities::decode_entities;
use crate::patterns::TITLE_ELEMENT;

/// Captures a quoted, non-empty `content` value in group 1 (`"`) or 2 (`'`).
const CONTENT_ATTR: &str = r#"\scontent\s*=\s*(?:"([^"]+)"|'([^']+)')"#;

/// Which attribute carries the key and on which side of `content=` it sits.
#[derive(Debug, Clone, Copy)]
enum Variant {
    PropertyFirst,
    PropertyLast,
    NameFirst,
    NameLast,
}

impl Variant {
    /// Lookup order. The first variant that matches anywhere in the document wins.
    const PRIORITY: [Self; 4] = [
        Self::PropertyFirst,
        Self::PropertyLast,
        Self::NameFirst,
        Self::NameLast,
    ];

    fn pattern(self, key: &str) -> String {
        let key = regex::escape(key);
        let (attr, key_first) = match self {
            Self::PropertyFirst => ("property", true),
            Self::PropertyLast => ("property", false),
            Self::NameFirst => ("name", true),
            Self::NameLast => ("name", false),
        };
        let key_attr = format!(r#"\s{attr}\s*=\s*["']{key}["']"#);

        if key_first {
            format!(r"(?i)<meta\b[^>]*?{key_attr}[^>]*?{CONTENT_ATTR}")
        } else {
            format!(r"(?i)<meta\b[^>]*?{CONTENT_ATTR}[^>]*?{key_attr}")
        }
    }
}

/// Variant patterns for every key the metadata extractor asks for, in
/// lookup order.
static KEY_PATTERNS: LazyLock<HashMap<&'static str, Vec<Regex>>> = LazyLock::new(|| {
    KEY_LISTS
        .iter()
        .flat_map(|keys| keys.iter())
        .map(|&key| (key, compile_variants(key)))
        .collect()
});

/// The key is escaped, so compilation only fails on pathological sizes.
fn compile_variants(key: &str) -> Vec<Regex> {
    Variant::PRIORITY
        .iter()
        .filter_map(|variant| Regex::new(&variant.pattern(key)).ok())
        .collect()
}

/// Look up the `content` of the meta tag keyed by `key`.
///
/// `key` may appear as either a `property=` or a `name=` value, before or
/// after `content=`. Variants are tried in a fixed order: property before
/// content, content before property, name before content, content before
/// name. The value is entity-decoded and trimmed. Returns an empty string
/// when nothing matches.
///
/// # Examples
///
/// ```
/// use page_digest::metadata::extract_meta;
///
/// let html = r#"<meta content="Fish &amp; Chips" property="og:title">"#;
/// assert_eq!(extract_meta(html, "og:title"), "Fish & Chips");
/// assert_eq!(extract_meta(html, "og:description"), "");
/// ```
#[must_use]
pub fn extract_meta(html: &str, key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }

    let compiled;
    let patterns = match KEY_PATTERNS.get(key) {
        Some(patterns) => patterns,
        None => {
            compiled = compile_variants(key);
            &compiled
        }
    };

    for re in patterns {
        if let Some(caps) = re.captures(html) {
            let raw = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            return decode_entities(raw).trim().to_string();
        }
    }

    String::new()
}

/// Text of the first `<title>` element, entity-decoded and trimmed.
#[must_use]
pub fn extract_title_element(html: &str) -> String {
    TITLE_ELEMENT
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_entities(m.as_str()).trim().to_string())
        .unwrap_or_default()
}

/// Parse a publication date as RFC 3339, then as a bare `YYYY-MM-DD`.
///
/// RFC 3339 values keep the calendar date of their own offset, so
/// `2024-03-15T23:30:00-05:00` is March 15.
#[must_use]
pub fn parse_publish_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
