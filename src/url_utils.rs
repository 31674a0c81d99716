//! URL utilities: hostname extraction and known-platform detection.

use url::Url;

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    // Must start with http:// or https://
    let lower = s.to_ascii_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Lower-cased hostname of an absolute URL, without a leading `www.`.
#[must_use]
pub fn extract_hostname(url_str: &str) -> Option<String> {
    let (_, parsed) = is_absolute_url(url_str);
    let host = parsed?.host_str()?.to_ascii_lowercase();
    let host = host.trim_end_matches('.');
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Sites whose pages get a canned summary fragment when metadata is thin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    YouTube,
    Instagram,
    LinkedIn,
    Twitter,
    GitHub,
}

impl Platform {
    /// Detection order, with the domains each platform serves from.
    const DOMAINS: [(Self, &'static [&'static str]); 5] = [
        (Self::YouTube, &["youtube.com", "youtu.be"]),
        (Self::Instagram, &["instagram.com"]),
        (Self::LinkedIn, &["linkedin.com"]),
        (Self::Twitter, &["twitter.com", "x.com"]),
        (Self::GitHub, &["github.com"]),
    ];

    /// Detect the platform a URL belongs to.
    ///
    /// Absolute URLs are matched on their host, subdomains included, so
    /// `box.com` is not mistaken for `x.com`. Anything that does not parse
    /// falls back to a substring check on the lower-cased text.
    ///
    /// ```
    /// use page_digest::url_utils::Platform;
    ///
    /// assert_eq!(Platform::detect("https://m.youtube.com/watch?v=1"), Some(Platform::YouTube));
    /// assert_eq!(Platform::detect("https://x.com/rustlang"), Some(Platform::Twitter));
    /// assert_eq!(Platform::detect("https://dropbox.com/s/x.com"), None);
    /// ```
    #[must_use]
    pub fn detect(url_str: &str) -> Option<Self> {
        match extract_hostname(url_str) {
            Some(host) => Self::DOMAINS.iter().find_map(|(platform, domains)| {
                domains
                    .iter()
                    .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
                    .then_some(*platform)
            }),
            None => {
                let lower = url_str.to_lowercase();
                Self::DOMAINS.iter().find_map(|(platform, domains)| {
                    domains
                        .iter()
                        .any(|domain| lower.contains(domain))
                        .then_some(*platform)
                })
            }
        }
    }

    /// Summary fragment for this platform.
    ///
    /// YouTube names the video, so it needs a title and yields nothing without one.
    #[must_use]
    pub fn fragment(self, title: &str) -> Option<String> {
        match self {
            Self::YouTube if title.is_empty() => None,
            Self::YouTube => Some(format!("YouTube video: {title}")),
            Self::Instagram => Some("Instagram post.".to_string()),
            Self::LinkedIn => Some("LinkedIn content.".to_string()),
            Self::Twitter => Some("Twitter/X post.".to_string()),
            Self::GitHub => Some("GitHub repository or page.".to_string()),
        }
    }
}
