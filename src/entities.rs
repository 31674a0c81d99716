//! HTML character entity decoding.
//!
//! Only a fixed table of named entities is decoded. Any other decimal
//! numeric entity becomes a space. Unknown named entities are left alone.

use crate::patterns::ENTITY;

/// Decode the supported HTML entities in `text`.
///
/// Decoding is a single left-to-right pass, so text produced by a
/// substitution is never decoded again: `&amp;lt;` becomes `&lt;`.
///
/// # Examples
///
/// ```
/// use page_digest::entities::decode_entities;
///
/// assert_eq!(decode_entities("Fish &amp; Chips &mdash; &#8220;fresh&#8221;"), "Fish & Chips \u{2014}  fresh ");
/// assert_eq!(decode_entities("&amp;lt;"), "&lt;");
/// ```
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            match &caps[1] {
                "nbsp" => " ",
                "amp" => "&",
                "lt" => "<",
                "gt" => ">",
                "quot" => "\"",
                "#39" | "apos" => "'",
                "mdash" => "\u{2014}",
                "ndash" => "\u{2013}",
                "hellip" => "...",
                "copy" => "\u{a9}",
                "reg" => "\u{ae}",
                "trade" => "\u{2122}",
                // Remaining numeric entities.
                _ => " ",
            }
        })
        .into_owned()
}
