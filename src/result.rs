//! Result types for analysis output.
//!
//! `ContentAnalysis` is the record handed to callers. `PageMetadata` and
//! `AnalysisReport` carry the intermediate values for diagnostics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary and keywords derived from one web page.
///
/// Serializes as `{"summary": "...", "keywords": ["..."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    /// Human-readable summary. Never empty.
    pub summary: String,

    /// Up to 15 unique keywords, most frequent first.
    pub keywords: Vec<String>,
}

impl ContentAnalysis {
    /// Keywords serialized as a JSON array, the form stored on bookmark records.
    ///
    /// ```
    /// use page_digest::ContentAnalysis;
    ///
    /// let analysis = ContentAnalysis {
    ///     summary: "A page.".to_string(),
    ///     keywords: vec!["rust".to_string(), "parser".to_string()],
    /// };
    /// assert_eq!(analysis.keywords_json(), r#"["rust","parser"]"#);
    /// ```
    #[must_use]
    pub fn keywords_json(&self) -> String {
        // Serializing a Vec<String> cannot fail.
        serde_json::to_string(&self.keywords).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Page fields resolved from meta tags.
///
/// All fields are optional as metadata may not be present in all documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// `og:title`, `twitter:title`, or the `<title>` element.
    pub title: Option<String>,

    /// `og:description`, `description`, or `twitter:description`.
    pub description: Option<String>,

    /// `og:site_name` or `application-name`.
    pub site_name: Option<String>,

    /// `og:type` (e.g. `article`, `video.other`).
    pub content_type: Option<String>,

    /// `author` or `article:author`.
    pub author: Option<String>,

    /// `article:published_time` or `datePublished`, when it parses.
    pub published: Option<NaiveDate>,
}

/// Full output of one fetch and analysis, for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The summary and keywords.
    pub analysis: ContentAnalysis,

    /// Metadata the summary was built from.
    pub metadata: PageMetadata,

    /// URL after redirects.
    pub final_url: String,

    /// HTTP status code of the response.
    pub status: u16,

    /// Number of body bytes analyzed.
    pub bytes_read: usize,

    /// Whether the body was cut at the size cap.
    pub truncated: bool,
}
