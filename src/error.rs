//! Error types for page-digest.
//!
//! Extraction itself is total and never fails; errors only come from the
//! network, client setup, configuration, or an optional summary enhancer.

/// Error type for analysis operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure while fetching the page (DNS, connect, TLS, timeout).
    ///
    /// The underlying `reqwest` error is surfaced unmodified.
    #[error(transparent)]
    Fetch(#[from] reqwest::Error),

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(reqwest::Error),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The optional summary enhancer failed.
    #[error("summary enhancer failed: {0}")]
    Enhancer(String),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
