//! Compiled regex patterns and read-only lookup tables.
//!
//! All patterns are compiled once at first use via `LazyLock` and shared by
//! every analysis without synchronization. Patterns are organized by the
//! pipeline stage that uses them.

#![allow(clippy::expect_used)]

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Tag Stripping Patterns
// =============================================================================

/// Matches `<script>` blocks, JSON-LD included.
pub static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("SCRIPT_BLOCK regex")
});

/// Matches `<style>` blocks.
pub static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("STYLE_BLOCK regex")
});

/// Matches `<noscript>` blocks.
pub static NOSCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<noscript[^>]*>.*?</noscript>").expect("NOSCRIPT_BLOCK regex")
});

/// Matches boilerplate containers with their contents, one pattern per tag.
///
/// The regex crate has no backreferences, so each container gets its own
/// pattern instead of a single `<(nav|...)>.*?</\1>`.
pub static BOILERPLATE_BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["nav", "footer", "header", "aside", "menu"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}>"))
                .expect("BOILERPLATE_BLOCKS regex")
        })
        .collect()
});

/// Matches any complete tag.
pub static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]+>").expect("ANY_TAG regex")
});

/// Matches a tag left open at the end of the input (body cut at the size cap).
pub static UNTERMINATED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[\p{Alphabetic}/!?][^>]*\z").expect("UNTERMINATED_TAG regex")
});

/// Matches a `<` directly followed by a letter or slash.
pub static TAG_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([\p{Alphabetic}/])").expect("TAG_OPENER regex")
});

/// Matches residual inline script objects.
pub static BRACE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[^}]*\}").expect("BRACE_SPAN regex")
});

/// Matches residual inline script arrays.
pub static BRACKET_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]*\]").expect("BRACKET_SPAN regex")
});

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

// =============================================================================
// Entity Patterns
// =============================================================================

/// Matches the named entities we decode plus any decimal numeric entity.
///
/// One alternation so decoding is a single pass and never sees its own output.
pub static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(nbsp|amp|lt|gt|quot|apos|mdash|ndash|hellip|copy|reg|trade|#\d+);")
        .expect("ENTITY regex")
});

// =============================================================================
// Document Structure Patterns
// =============================================================================

/// Matches the first `<title>` element.
pub static TITLE_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("TITLE_ELEMENT regex")
});

/// Matches an `<article>` region; an unclosed one runs to the end of input.
pub static ARTICLE_REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<article\b[^>]*>(.*?)(?:</article>|\z)").expect("ARTICLE_REGION regex")
});

/// Matches `<p>` elements and captures their inner markup.
pub static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("PARAGRAPH regex")
});

// =============================================================================
// Lookup Tables
// =============================================================================

/// Substrings that mark leaked script content in an assembled summary.
pub const CODE_MARKERS: &[&str] = &["function", "window.", "{", "var ", "ytcfg", "ytplayer"];

/// Substrings that make extracted text unusable for keyword ranking.
pub const SCRIPT_LEAK_MARKERS: &[&str] = &["function", "window."];

/// Substrings that disqualify a paragraph candidate.
pub const PARAGRAPH_REJECT_MARKERS: &[&str] = &["{", "function", "var "];

/// Markup and script tokens never accepted as keywords.
pub const CODE_TERMS: &[&str] = &[
    "script", "style", "div", "span", "class", "href", "src", "img", "onclick", "onload",
];

/// English function words plus web boilerplate tokens.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
        "by", "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must",
        "shall", "can", "need", "dare", "ought", "used", "this", "that", "these", "those",
        "i", "you", "he", "she", "it", "we", "they", "what", "which", "who", "whom",
        "whose", "where", "when", "why", "how", "all", "each", "every", "both", "few",
        "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
        "so", "than", "too", "very", "just", "also", "now", "here", "there", "then",
        "once", "about", "into", "through", "during", "before", "after", "above", "below",
        "between", "under", "again", "further", "if", "because", "until", "while", "your",
        "our", "their", "my", "its", "his", "her", "up", "down", "out", "off", "over",
        "any", "get", "got", "like", "make", "made", "new", "one", "two", "first", "even",
        "way", "well", "back", "being", "want", "use", "using", "click", "page", "website",
        "http", "https", "www", "com", "org", "net", "function", "window", "var", "const",
        "let", "return", "true", "false", "null", "undefined",
    ]
    .into_iter()
    .collect()
});
