//! # page-digest
//!
//! Heuristic web page summaries and keyword extraction.
//!
//! Given a URL, this library fetches the page once (bounded by a timeout and a
//! body size cap) and derives a short human-readable summary plus a ranked
//! list of keywords. Everything after the fetch is a set of regex scanners
//! over the raw markup. No DOM is built, so malformed or truncated HTML only
//! degrades the output and never fails it.
//!
//! ## Quick Start
//!
//! ```rust
//! use page_digest::{compose_summary, extract_keywords, extract_text, KeywordOptions};
//!
//! let html = r#"<html><head><title>My Article</title>
//! <meta property="og:description" content="Notes on parsing HTML with regexes.">
//! </head><body><p>regex regex parser parser</p></body></html>"#;
//!
//! let summary = compose_summary(html, "https://example.com/post");
//! assert_eq!(summary, "Notes on parsing HTML with regexes.");
//!
//! let keywords = extract_keywords(&extract_text(html), &KeywordOptions::default());
//! assert_eq!(keywords, vec!["regex", "parser"]);
//! ```
//!
//! Fetching is async:
//!
//! ```no_run
//! # async fn run() -> page_digest::Result<()> {
//! let analysis = page_digest::analyze("https://www.rust-lang.org").await?;
//! println!("{}", analysis.keywords_json());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Summary**: Open Graph, Twitter Card and plain meta tags, first-paragraph
//!   and per-platform fallbacks, with a guard against leaked script text
//! - **Keywords**: Frequency ranking with stop words and deterministic ties
//! - **Bounded fetch**: One GET with a timeout and a hard body cap
//! - **Enhancer hook**: Optional model-backed summary via [`SummaryEnhancer`]

mod error;
mod options;
mod patterns;
mod result;

/// HTML entity decoding.
pub mod entities;

/// Tag stripping and whitespace helpers.
pub mod html_processing;

/// Meta tag lookup and page metadata resolution.
pub mod metadata;

/// First-paragraph fallback.
pub mod paragraph;

/// Summary composition.
pub mod summary;

/// Keyword ranking.
pub mod keywords;

/// URL utilities and platform detection.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Optional model-backed summary enhancement.
pub mod enhance;

/// Bounded fetch and the analysis pipeline.
pub mod fetch;

// Public API - re-exports
pub use enhance::{OpenAiCompatEnhancer, PageContext, SummaryEnhancer};
pub use error::{Error, Result};
pub use fetch::{analyze, Analyzer, FetchedPage};
pub use html_processing::extract_text;
pub use keywords::{extract_keywords, rank_terms, KeywordOptions, RankedTerm};
pub use options::{Options, DEFAULT_USER_AGENT};
pub use result::{AnalysisReport, ContentAnalysis, PageMetadata};
pub use summary::compose_summary;
