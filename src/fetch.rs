//! Fetch orchestration.
//!
//! [`Analyzer`] performs one bounded GET per call and runs the offline
//! pipeline over whatever body bytes arrived.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tracing::Instrument;

use crate::encoding::transcode_to_utf8;
use crate::enhance::{PageContext, SummaryEnhancer};
use crate::error::{Error, Result};
use crate::html_processing::{contains_any, extract_text};
use crate::keywords::extract_keywords;
use crate::metadata::extract_metadata;
use crate::options::Options;
use crate::patterns::CODE_MARKERS;
use crate::result::{AnalysisReport, ContentAnalysis, PageMetadata};
use crate::summary::compose_from_metadata;

/// Raw response of a bounded fetch.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects.
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    /// Body bytes, at most `max_body_bytes` of them.
    pub bytes: Vec<u8>,
    /// Whether the body was cut at the cap.
    pub truncated: bool,
}

/// Intermediate values of one offline analysis.
struct Digest {
    analysis: ContentAnalysis,
    metadata: PageMetadata,
    text: String,
}

/// Fetches pages and turns them into summaries and keywords.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use page_digest::Analyzer;
///
/// # async fn run() -> page_digest::Result<()> {
/// let analyzer = Analyzer::new()?;
/// let analysis = analyzer.analyze("https://www.rust-lang.org").await?;
/// println!("{}", analysis.summary);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Analyzer {
    client: reqwest::Client,
    options: Options,
    enhancer: Option<Arc<dyn SummaryEnhancer>>,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("options", &self.options)
            .field("enhancer", &self.enhancer.is_some())
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Analyzer with default [`Options`].
    pub fn new() -> Result<Self> {
        Self::with_options(Options::default())
    }

    /// Analyzer with custom options. Options are validated first.
    pub fn with_options(options: Options) -> Result<Self> {
        options.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(options.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()
            .map_err(Error::Client)?;
        Ok(Self {
            client,
            options,
            enhancer: None,
        })
    }

    /// Attach an enhancer whose output replaces the heuristic summary.
    #[must_use]
    pub fn with_enhancer(mut self, enhancer: Arc<dyn SummaryEnhancer>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The HTTP client, for sharing with an enhancer.
    #[must_use]
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Fetch `url` and return its summary and keywords.
    ///
    /// Only transport failures are errors. Non-2xx responses and bodies cut
    /// at the size cap are analyzed like any other page.
    pub async fn analyze(&self, url: &str) -> Result<ContentAnalysis> {
        self.analyze_detailed(url).await.map(|report| report.analysis)
    }

    /// Like [`Analyzer::analyze`], also returning metadata and fetch details.
    pub async fn analyze_detailed(&self, url: &str) -> Result<AnalysisReport> {
        let span = tracing::info_span!("analyze", url);
        async move {
            let page = self.fetch_page(url).await?;
            let html = transcode_to_utf8(&page.bytes, page.content_type.as_deref());
            let mut digest = self.digest(&html, url);

            let enhanced = self.enhanced_summary(url, &digest).await;
            if let Some(summary) = enhanced {
                digest.analysis.summary = summary;
            }

            Ok(AnalysisReport {
                analysis: digest.analysis,
                metadata: digest.metadata,
                final_url: page.final_url,
                status: page.status,
                bytes_read: page.bytes.len(),
                truncated: page.truncated,
            })
        }
        .instrument(span)
        .await
    }

    /// One GET, reading at most `max_body_bytes` of the body.
    ///
    /// A body that fails mid-stream ends the read; the bytes received so far
    /// are returned.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        let resp = self.client.get(url).send().await?;
        let final_url = resp.url().to_string();
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let max_bytes = self.options.max_body_bytes;
        let mut truncated = false;
        let mut bytes = Vec::new();
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    tracing::warn!(error = %e, received = bytes.len(), "body read failed, analyzing partial body");
                    break;
                }
            };
            if bytes.len().saturating_add(chunk.len()) > max_bytes {
                let can_take = max_bytes.saturating_sub(bytes.len());
                bytes.extend_from_slice(&chunk[..can_take]);
                truncated = true;
                break;
            }
            bytes.extend_from_slice(&chunk);
        }

        if truncated {
            tracing::debug!(max_bytes, "body truncated at cap");
        }
        tracing::info!(status, bytes = bytes.len(), truncated, "fetched page");

        Ok(FetchedPage {
            final_url,
            status,
            content_type,
            bytes,
            truncated,
        })
    }

    /// Analyze HTML that is already in hand. Never fails.
    ///
    /// ```
    /// use page_digest::Analyzer;
    ///
    /// let analyzer = Analyzer::new().unwrap();
    /// let html = r#"<meta property="og:description" content="A great article about testing.">
    ///               <p>testing testing code code</p>"#;
    /// let analysis = analyzer.analyze_html(html, "https://example.com");
    /// assert_eq!(analysis.summary, "A great article about testing.");
    /// assert_eq!(analysis.keywords, vec!["testing", "code"]);
    /// ```
    #[must_use]
    pub fn analyze_html(&self, html: &str, url: &str) -> ContentAnalysis {
        self.digest(html, url).analysis
    }

    /// [`Analyzer::analyze_html`] followed by the attached enhancer, if any.
    ///
    /// Enhancer failures keep the heuristic summary, so this never fails
    /// either.
    pub async fn analyze_html_enhanced(&self, html: &str, url: &str) -> ContentAnalysis {
        let mut digest = self.digest(html, url);
        let enhanced = self.enhanced_summary(url, &digest).await;
        if let Some(summary) = enhanced {
            digest.analysis.summary = summary;
        }
        digest.analysis
    }

    fn digest(&self, html: &str, url: &str) -> Digest {
        let metadata = extract_metadata(html);
        let summary = compose_from_metadata(&metadata, html, url);
        let text = extract_text(html);
        let keywords = extract_keywords(&text, &self.options.keyword_options());
        tracing::debug!(text_chars = text.len(), keywords = keywords.len(), "analyzed document");

        Digest {
            analysis: ContentAnalysis { summary, keywords },
            metadata,
            text,
        }
    }

    /// The enhancer's summary, when one is attached and its output is clean.
    async fn enhanced_summary(&self, url: &str, digest: &Digest) -> Option<String> {
        let enhancer = self.enhancer.as_ref()?;
        let page = PageContext::new(
            url,
            digest.metadata.title.as_deref().unwrap_or_default(),
            digest.metadata.description.as_deref().unwrap_or_default(),
            &digest.analysis.summary,
            &digest.text,
        );

        match enhancer.enhance(&page).await {
            Ok(summary) => {
                let summary = summary.trim();
                if summary.is_empty() || contains_any(summary, CODE_MARKERS) {
                    tracing::debug!("enhancer output rejected, keeping heuristic summary");
                    None
                } else {
                    Some(summary.to_string())
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "summary enhancer failed, keeping heuristic summary");
                None
            }
        }
    }
}

/// Analyze `url` with a default [`Analyzer`].
pub async fn analyze(url: &str) -> Result<ContentAnalysis> {
    Analyzer::new()?.analyze(url).await
}
