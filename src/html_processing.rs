//! HTML tag stripping and text cleanup.
//!
//! Turns raw HTML into approximate visible text with a fixed sequence of
//! regex passes. No tree is built, so malformed, unclosed, or truncated
//! markup degrades the output instead of failing.

use crate::entities::decode_entities;
use crate::patterns::{
    ANY_TAG, BOILERPLATE_BLOCKS, BRACE_SPAN, BRACKET_SPAN, NOSCRIPT_BLOCK, SCRIPT_BLOCK,
    STYLE_BLOCK, TAG_OPENER, UNTERMINATED_TAG, WHITESPACE_NORMALIZE,
};

/// Extract approximate visible text from an HTML document.
///
/// Steps, in order:
/// 1. Drop `<script>`, `<style>` and `<noscript>` blocks
/// 2. Drop `<nav>`, `<footer>`, `<header>`, `<aside>` and `<menu>` blocks
/// 3. Strip every remaining tag, including one left open at the end
/// 4. Decode entities
/// 5. Drop leftover `{...}` and `[...]` spans
/// 6. Collapse whitespace and trim
///
/// # Examples
///
/// ```
/// use page_digest::html_processing::extract_text;
///
/// let html = "<nav>Home</nav><script>var a = 1;</script><p>Fish &amp; chips</p>";
/// assert_eq!(extract_text(html), "Fish & chips");
/// ```
#[must_use]
pub fn extract_text(html: &str) -> String {
    let mut text = remove_non_content_blocks(html);
    text = strip_tags_with(&text, " ");

    let decoded = decode_entities(&text);
    // Decoded `&lt;` must not form something that reads as a tag.
    let decoded = TAG_OPENER.replace_all(&decoded, "< $1");

    let without_objects = BRACE_SPAN.replace_all(&decoded, " ");
    let without_arrays = BRACKET_SPAN.replace_all(&without_objects, " ");

    collapse_whitespace(&without_arrays)
}

/// Remove script-like and boilerplate blocks together with their contents.
#[must_use]
pub fn remove_non_content_blocks(html: &str) -> String {
    let mut out = html.to_string();
    for re in [&*SCRIPT_BLOCK, &*STYLE_BLOCK, &*NOSCRIPT_BLOCK]
        .into_iter()
        .chain(BOILERPLATE_BLOCKS.iter())
    {
        if re.is_match(&out) {
            out = re.replace_all(&out, " ").into_owned();
        }
    }
    out
}

/// Remove every tag from `html`, replacing each with `replacement`.
///
/// A tag cut off at the end of the input is dropped as well.
#[must_use]
pub fn strip_tags_with(html: &str, replacement: &str) -> String {
    let stripped = ANY_TAG.replace_all(html, replacement);
    UNTERMINATED_TAG.replace(&stripped, "").into_owned()
}

/// Collapse whitespace runs to single spaces and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE
        .replace_all(text, " ")
        .trim()
        .to_string()
}

/// Truncate `text` to at most `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Check whether `text` contains any of `markers`.
#[must_use]
pub fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| text.contains(marker))
}
