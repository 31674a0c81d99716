//! Configuration options for fetching and analysis.
//!
//! The `Options` struct bounds the outbound fetch and tunes keyword ranking.
//! Values can come from code, from JSON via serde, or from the environment.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keywords::KeywordOptions;

/// Desktop browser user agent. Some sites serve reduced markup to agents
/// they do not recognize.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration options for page analysis.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use page_digest::Options;
///
/// // Use defaults
/// let options = Options::default();
/// assert_eq!(options.max_body_bytes, 500_000);
///
/// // Customize specific fields
/// let options = Options {
///     timeout_secs: 5,
///     max_keywords: 10,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Whole-request timeout for the page fetch, in seconds.
    ///
    /// Default: `15`
    pub timeout_secs: u64,

    /// Hard cap on body bytes read. Anything past it is never downloaded.
    ///
    /// Default: `500_000`
    pub max_body_bytes: usize,

    /// Maximum number of keywords returned.
    ///
    /// Default: `15`
    pub max_keywords: usize,

    /// Minimum occurrences for a word to become a keyword.
    ///
    /// Default: `2`
    pub min_keyword_frequency: usize,

    /// Shortest keyword, in characters.
    ///
    /// Default: `3`
    pub min_keyword_len: usize,

    /// Longest keyword, in characters.
    ///
    /// Default: `25`
    pub max_keyword_len: usize,

    /// User agent sent with the fetch.
    ///
    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_body_bytes: 500_000,
            max_keywords: 15,
            min_keyword_frequency: 2,
            min_keyword_len: 3,
            max_keyword_len: 25,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Options {
    /// Defaults overlaid with `PAGE_DIGEST_*` environment variables.
    ///
    /// Reads `PAGE_DIGEST_TIMEOUT_SECS`, `PAGE_DIGEST_MAX_BODY_BYTES`,
    /// `PAGE_DIGEST_MAX_KEYWORDS`, `PAGE_DIGEST_MIN_KEYWORD_FREQUENCY` and
    /// `PAGE_DIGEST_USER_AGENT`. Unset or blank variables keep the default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Options::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(value) = read("PAGE_DIGEST_TIMEOUT_SECS") {
            options.timeout_secs = parse_var("PAGE_DIGEST_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read("PAGE_DIGEST_MAX_BODY_BYTES") {
            options.max_body_bytes = parse_var("PAGE_DIGEST_MAX_BODY_BYTES", &value)?;
        }
        if let Some(value) = read("PAGE_DIGEST_MAX_KEYWORDS") {
            options.max_keywords = parse_var("PAGE_DIGEST_MAX_KEYWORDS", &value)?;
        }
        if let Some(value) = read("PAGE_DIGEST_MIN_KEYWORD_FREQUENCY") {
            options.min_keyword_frequency =
                parse_var("PAGE_DIGEST_MIN_KEYWORD_FREQUENCY", &value)?;
        }
        if let Some(value) = read("PAGE_DIGEST_USER_AGENT") {
            options.user_agent = value.trim().to_string();
        }

        options.validate()?;
        Ok(options)
    }

    /// Reject settings that would make every fetch fail or every keyword
    /// list empty.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than zero".into()));
        }
        if self.max_body_bytes == 0 {
            return Err(Error::Config("max_body_bytes must be greater than zero".into()));
        }
        if self.min_keyword_len == 0 || self.min_keyword_len > self.max_keyword_len {
            return Err(Error::Config(format!(
                "keyword length range {}..={} is empty",
                self.min_keyword_len, self.max_keyword_len
            )));
        }
        Ok(())
    }

    /// The keyword tunables as [`KeywordOptions`].
    #[must_use]
    pub fn keyword_options(&self) -> KeywordOptions {
        KeywordOptions {
            max_keywords: self.max_keywords,
            min_frequency: self.min_keyword_frequency,
            min_len: self.min_keyword_len,
            max_len: self.max_keyword_len,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{name}: cannot parse {value:?}")))
}
