//! Character encoding detection and transcoding.
//!
//! Fetched bodies are raw bytes. This module picks a charset (byte order
//! mark, then the HTTP `Content-Type` header, then the document's own meta
//! declaration, then UTF-8), converts to UTF-8 lossily, and treats binary
//! payloads as empty text so downstream stages only ever see a `&str`.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match `charset=...` inside a Content-Type value
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Only the head of the document is searched for a declaration.
const SNIFF_LEN: usize = 1024;

/// Check whether a body looks like binary data rather than markup.
///
/// Single-byte and UTF-8 text never contains NUL bytes, so one near the
/// start is taken as a binary payload (image, archive, PDF, ...). Callers
/// must not apply this to UTF-16 bodies.
#[must_use]
pub fn looks_binary(body: &[u8]) -> bool {
    body[..body.len().min(SNIFF_LEN)].contains(&0)
}

/// Detect the character encoding of an HTML body.
///
/// Order of precedence:
/// 1. Byte order mark
/// 2. `charset` parameter of the HTTP `Content-Type` header
/// 3. `<meta charset>` or `<meta http-equiv="Content-Type">` in the first 1024 bytes
/// 4. UTF-8
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(body) {
        return encoding;
    }

    if let Some(encoding) = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_LEN)]);
    charset_from_meta(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Extract the charset label from a `Content-Type` value.
fn charset_from_content_type(content_type: &str) -> Option<String> {
    CONTENT_TYPE_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the charset label declared by a meta tag.
///
/// Covers both `<meta charset="...">` and the `http-equiv` form, whose
/// `content` attribute carries `text/html; charset=...`.
fn charset_from_meta(head: &str) -> Option<String> {
    CHARSET_META_RE
        .captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Transcode a fetched body to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than failing. Binary
/// payloads decode to an empty string. A body whose BOM or header declares
/// UTF-16 is never treated as binary.
///
/// # Examples
///
/// ```
/// use page_digest::encoding::transcode_to_utf8;
///
/// let html = b"<html><body>Hello, World!</body></html>";
/// assert!(transcode_to_utf8(html, None).contains("Hello, World!"));
///
/// let latin1 = b"<p>Caf\xE9</p>";
/// assert_eq!(transcode_to_utf8(latin1, Some("text/html; charset=ISO-8859-1")), "<p>Caf\u{e9}</p>");
///
/// assert_eq!(transcode_to_utf8(b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR", None), "");
/// ```
#[must_use]
pub fn transcode_to_utf8(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);
    let wide = encoding == UTF_16LE || encoding == UTF_16BE;
    if !wide && looks_binary(body) {
        return String::new();
    }

    // `decode` also strips a BOM when present.
    let (decoded, _encoding_used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}
