//! Summary composition.
//!
//! Builds a short readable summary from page metadata, falling back to the
//! first content paragraph and then to a canned per-platform line. The
//! result is never empty and never carries leaked script markers.

use crate::html_processing::{contains_any, truncate_with_ellipsis};
use crate::metadata::extract_metadata;
use crate::paragraph::first_paragraph;
use crate::patterns::CODE_MARKERS;
use crate::result::PageMetadata;
use crate::url_utils::Platform;

/// Returned when nothing usable was found.
pub const NO_DESCRIPTION: &str = "No description available for this page.";

/// Descriptions longer than this are cut and get a trailing `...`.
const MAX_DESCRIPTION_CHARS: usize = 400;

/// Compose a summary for the page at `url` from its HTML.
///
/// # Examples
///
/// ```
/// use page_digest::summary::compose_summary;
///
/// let html = r#"<meta property="og:description" content="A great article about testing.">
///               <title>Test Page</title>"#;
/// assert_eq!(compose_summary(html, "https://example.com/post"), "A great article about testing.");
///
/// assert_eq!(
///     compose_summary("", "https://example.com"),
///     "No description available for this page."
/// );
/// ```
#[must_use]
pub fn compose_summary(html: &str, url: &str) -> String {
    compose_from_metadata(&extract_metadata(html), html, url)
}

/// Compose a summary from already-extracted metadata.
///
/// `html` is only consulted for the first-paragraph fallback when the
/// metadata has no description.
#[must_use]
pub fn compose_from_metadata(meta: &PageMetadata, html: &str, url: &str) -> String {
    let title = meta.title.as_deref().unwrap_or_default();
    let site_name = meta.site_name.as_deref().unwrap_or_default();

    let attribution = site_attribution(site_name, title);
    let mut fragments: Vec<String> = Vec::new();

    if let Some(kind) = meta
        .content_type
        .as_deref()
        .filter(|kind| !kind.is_empty() && *kind != "website")
    {
        fragments.push(format!("{}.", title_case(&kind.replace('_', " "))));
    }

    let description = meta.description.as_deref().map_or("", str::trim);
    if !description.is_empty() {
        fragments.push(truncate_with_ellipsis(description, MAX_DESCRIPTION_CHARS));
    }

    if let Some(author) = meta.author.as_deref().filter(|a| !a.is_empty()) {
        fragments.push(format!("By {author}."));
    }

    if let Some(date) = meta.published {
        fragments.push(format!("Published {}.", date.format("%B %-d, %Y")));
    }

    if description.is_empty() {
        let paragraph = first_paragraph(html);
        if !paragraph.is_empty() {
            fragments.push(paragraph);
        }
    }

    // A lone part only counts as informative when no site name is known.
    let parts = usize::from(attribution.is_some()) + fragments.len();
    if parts == 0 || (parts == 1 && !site_name.is_empty()) {
        if let Some(fragment) = Platform::detect(url).and_then(|p| p.fragment(title)) {
            fragments.push(fragment);
        }
    }

    let summary = attribution
        .into_iter()
        .chain(fragments)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    let summary = if contains_any(&summary, CODE_MARKERS) {
        tracing::debug!(url, "summary carried script markers, rebuilding from title");
        rebuild_from_title(site_name, title)
    } else {
        summary
    };

    if summary.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        summary
    }
}

/// `From {site}.` unless the site name is empty or just repeats the title.
fn site_attribution(site_name: &str, title: &str) -> Option<String> {
    (!site_name.is_empty() && site_name != title).then(|| format!("From {site_name}."))
}

/// Summary made of site attribution and title only, skipping any piece
/// that itself looks like script.
fn rebuild_from_title(site_name: &str, title: &str) -> String {
    site_attribution(site_name, title)
        .into_iter()
        .chain((!title.is_empty()).then(|| title.to_string()))
        .filter(|piece| !contains_any(piece, CODE_MARKERS))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first letter of every word.
///
/// A word starts after any character that is not alphanumeric, so
/// `video.other` becomes `Video.Other`.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meta() -> PageMetadata {
        PageMetadata::default()
    }

    #[test]
    fn composes_fragments_in_order() {
        let meta = PageMetadata {
            title: Some("Borrowing Explained".to_string()),
            description: Some("How references work.".to_string()),
            site_name: Some("Rust Weekly".to_string()),
            content_type: Some("article".to_string()),
            author: Some("Ferris Crab".to_string()),
            published: NaiveDate::from_ymd_opt(2024, 1, 5),
        };
        assert_eq!(
            compose_from_metadata(&meta, "", "https://example.com"),
            "From Rust Weekly. Article. How references work. By Ferris Crab. Published January 5, 2024."
        );
    }

    #[test]
    fn site_name_equal_to_title_is_not_repeated() {
        let meta = PageMetadata {
            title: Some("Example".to_string()),
            site_name: Some("Example".to_string()),
            description: Some("About us.".to_string()),
            ..meta()
        };
        assert_eq!(compose_from_metadata(&meta, "", "https://example.com"), "About us.");
    }

    #[test]
    fn content_type_is_title_cased_and_website_skipped() {
        let video = PageMetadata {
            content_type: Some("video.other".to_string()),
            ..meta()
        };
        assert_eq!(compose_from_metadata(&video, "", ""), "Video.Other.");

        let profile = PageMetadata {
            content_type: Some("music_song".to_string()),
            ..meta()
        };
        assert_eq!(compose_from_metadata(&profile, "", ""), "Music Song.");

        let website = PageMetadata {
            content_type: Some("website".to_string()),
            ..meta()
        };
        assert_eq!(compose_from_metadata(&website, "", ""), NO_DESCRIPTION);
    }

    #[test]
    fn long_description_is_truncated() {
        let meta = PageMetadata {
            description: Some("é".repeat(450)),
            ..meta()
        };
        let summary = compose_from_metadata(&meta, "", "");
        assert_eq!(summary, format!("{}...", "é".repeat(400)));
    }

    #[test]
    fn paragraph_fills_missing_description() {
        let paragraph = "Every value in Rust has a single owner, and the value is dropped \
                         when that owner goes out of scope, which frees its resources.";
        let html = format!("<article><p>{paragraph}</p></article>");
        let meta = PageMetadata {
            author: Some("Ferris".to_string()),
            ..meta()
        };
        assert_eq!(
            compose_from_metadata(&meta, &html, ""),
            format!("By Ferris. {paragraph}")
        );
    }

    #[test]
    fn platform_fragment_when_only_site_name_present() {
        let meta = PageMetadata {
            site_name: Some("GitHub".to_string()),
            title: Some("rust-lang/rust".to_string()),
            ..meta()
        };
        assert_eq!(
            compose_from_metadata(&meta, "", "https://github.com/rust-lang/rust"),
            "From GitHub. GitHub repository or page."
        );
    }

    #[test]
    fn platform_fragment_when_site_matches_title_and_one_fragment_remains() {
        let meta = PageMetadata {
            site_name: Some("GitHub".to_string()),
            title: Some("GitHub".to_string()),
            content_type: Some("article".to_string()),
            ..meta()
        };
        assert_eq!(
            compose_from_metadata(&meta, "", "https://github.com/about"),
            "Article. GitHub repository or page."
        );
    }

    #[test]
    fn two_parts_suppress_platform_fragment() {
        let meta = PageMetadata {
            site_name: Some("GitHub".to_string()),
            title: Some("rust-lang/rust".to_string()),
            content_type: Some("object".to_string()),
            ..meta()
        };
        assert_eq!(
            compose_from_metadata(&meta, "", "https://github.com/rust-lang/rust"),
            "From GitHub. Object."
        );
    }

    #[test]
    fn no_platform_fragment_when_summary_is_informative() {
        let meta = PageMetadata {
            description: Some("A photo of a cat.".to_string()),
            ..meta()
        };
        assert_eq!(
            compose_from_metadata(&meta, "", "https://www.instagram.com/p/1"),
            "A photo of a cat."
        );
    }

    #[test]
    fn youtube_without_title_falls_through() {
        assert_eq!(
            compose_from_metadata(&meta(), "", "https://www.youtube.com/watch?v=1"),
            NO_DESCRIPTION
        );
    }

    #[test]
    fn script_markers_trigger_title_rebuild() {
        let meta = PageMetadata {
            title: Some("Player".to_string()),
            site_name: Some("VideoSite".to_string()),
            description: Some("var ytcfg = {}; window.ytplayer = {}".to_string()),
            ..meta()
        };
        assert_eq!(
            compose_from_metadata(&meta, "", "https://example.com"),
            "From VideoSite. Player"
        );
    }

    #[test]
    fn rebuild_drops_pieces_that_carry_markers() {
        let meta = PageMetadata {
            title: Some("function() { return 1 }".to_string()),
            description: Some("{\"a\": 1}".to_string()),
            ..meta()
        };
        assert_eq!(compose_from_metadata(&meta, "", ""), NO_DESCRIPTION);
    }

    #[test]
    fn title_case_handles_separators() {
        assert_eq!(title_case("video movie"), "Video Movie");
        assert_eq!(title_case("books.book"), "Books.Book");
        assert_eq!(title_case(""), "");
    }
}
