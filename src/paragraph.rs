//! First-paragraph fallback for pages without a description.

use crate::entities::decode_entities;
use crate::html_processing::{
    collapse_whitespace, contains_any, strip_tags_with, truncate_with_ellipsis,
};
use crate::patterns::{ARTICLE_REGION, PARAGRAPH, PARAGRAPH_REJECT_MARKERS};

/// Stripped paragraph text must be at least this long to be considered.
const MIN_CANDIDATE_CHARS: usize = 100;

/// Decoded text shorter than this is rejected.
const MIN_ACCEPTED_CHARS: usize = 50;

/// Only the first few long paragraphs are examined.
const MAX_CANDIDATES: usize = 5;

/// Longer paragraphs are cut here and get a trailing `...`.
const MAX_PARAGRAPH_CHARS: usize = 300;

/// Find the first believable content paragraph in `html`.
///
/// The search is limited to the first `<article>` when there is one. Among
/// the first five `<p>` elements with at least 100 characters of text, the
/// first that does not look like leaked script is returned, cut to 300
/// characters. Returns an empty string when nothing qualifies.
#[must_use]
pub fn first_paragraph(html: &str) -> String {
    let scope = ARTICLE_REGION
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or(html, |m| m.as_str());

    PARAGRAPH
        .captures_iter(scope)
        .filter_map(|caps| caps.get(1))
        .map(|inner| strip_tags_with(inner.as_str(), ""))
        .filter(|text| text.trim().chars().count() >= MIN_CANDIDATE_CHARS)
        .take(MAX_CANDIDATES)
        .map(|text| collapse_whitespace(&decode_entities(&text)))
        .find(|text| {
            !contains_any(text, PARAGRAPH_REJECT_MARKERS)
                && text.chars().count() >= MIN_ACCEPTED_CHARS
        })
        .map(|text| truncate_with_ellipsis(&text, MAX_PARAGRAPH_CHARS))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: &str = "Rust gives you fine-grained control over memory layout while \
                        keeping the compiler in charge of checking that every borrow is valid.";

    #[test]
    fn returns_first_long_paragraph() {
        let html = format!("<p>Too short.</p><p class=\"lead\">{LONG}</p><p>{LONG} again</p>");
        assert_eq!(first_paragraph(&html), LONG);
    }

    #[test]
    fn strips_inner_tags_and_decodes() {
        let html = format!("<p><b>Bold</b> start &amp; {LONG}</p>");
        assert_eq!(first_paragraph(&html), format!("Bold start & {LONG}"));
    }

    #[test]
    fn wrapped_source_lines_become_single_spaces() {
        let wrapped = LONG.replace(' ', "\n        ");
        let html = format!("<p>\n    {wrapped}\t&nbsp;</p>");
        assert_eq!(first_paragraph(&html), LONG);
    }

    #[test]
    fn prefers_article_region() {
        let html = format!(
            "<p>Outside the article: {LONG}</p><article><p>Inside: {LONG}</p></article>"
        );
        assert_eq!(first_paragraph(&html), format!("Inside: {LONG}"));
    }

    #[test]
    fn rejects_code_like_paragraphs() {
        let html = format!(
            "<p>var config = 1; {LONG}</p><p>function init() {LONG}</p><p>Prose: {LONG}</p>"
        );
        assert_eq!(first_paragraph(&html), format!("Prose: {LONG}"));
    }

    #[test]
    fn only_first_five_candidates_are_examined() {
        let code = format!("<p>{{ {LONG}</p>");
        let html = format!("{}<p>Sixth: {LONG}</p>", code.repeat(5));
        assert_eq!(first_paragraph(&html), "");
    }

    #[test]
    fn truncates_to_300_characters() {
        let html = format!("<p>{}</p>", "word ".repeat(100));
        let paragraph = first_paragraph(&html);
        assert!(paragraph.ends_with("..."));
        assert_eq!(paragraph.chars().count(), 303);
    }

    #[test]
    fn returns_empty_when_nothing_qualifies() {
        assert_eq!(first_paragraph(""), "");
        assert_eq!(first_paragraph("<p>short</p><div>no paragraphs</div>"), "");
        assert_eq!(first_paragraph(&format!("<p>{LONG}")), "");
    }
}
