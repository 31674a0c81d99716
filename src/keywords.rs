//! Frequency-based keyword ranking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::html_processing::contains_any;
use crate::patterns::{CODE_TERMS, SCRIPT_LEAK_MARKERS, STOP_WORDS};

/// Tunables for keyword ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordOptions {
    /// Maximum number of keywords returned.
    ///
    /// Default: `15`
    pub max_keywords: usize,

    /// A token must occur at least this many times.
    ///
    /// Default: `2`
    pub min_frequency: usize,

    /// Shortest accepted token, in characters.
    ///
    /// Default: `3`
    pub min_len: usize,

    /// Longest accepted token, in characters.
    ///
    /// Default: `25`
    pub max_len: usize,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            max_keywords: 15,
            min_frequency: 2,
            min_len: 3,
            max_len: 25,
        }
    }
}

/// A ranked keyword with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTerm {
    pub term: String,
    pub count: usize,
}

/// Rank the most frequent meaningful words in `text`.
///
/// Returns at most `options.max_keywords` lower-cased words, most frequent
/// first. Ties keep the order in which the words first appear. Text that
/// looks like leaked script yields no keywords.
///
/// # Examples
///
/// ```
/// use page_digest::keywords::{extract_keywords, KeywordOptions};
///
/// let keywords = extract_keywords("cats cats cats dogs dogs birds", &KeywordOptions::default());
/// assert_eq!(keywords, vec!["cats", "dogs"]);
/// ```
#[must_use]
pub fn extract_keywords(text: &str, options: &KeywordOptions) -> Vec<String> {
    rank_terms(text, options)
        .into_iter()
        .map(|ranked| ranked.term)
        .collect()
}

/// Same ranking as [`extract_keywords`], keeping the counts.
#[must_use]
pub fn rank_terms(text: &str, options: &KeywordOptions) -> Vec<RankedTerm> {
    if contains_any(text, SCRIPT_LEAK_MARKERS) {
        return Vec::new();
    }

    let lower = text.to_lowercase();

    // Terms in first-seen order; the map only points into it.
    let mut terms: Vec<RankedTerm> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for token in lower.split(|c: char| !c.is_alphanumeric()) {
        if !is_candidate(token, options) {
            continue;
        }
        match index.get(token) {
            Some(&slot) => terms[slot].count += 1,
            None => {
                index.insert(token, terms.len());
                terms.push(RankedTerm {
                    term: token.to_string(),
                    count: 1,
                });
            }
        }
    }

    terms.retain(|ranked| ranked.count >= options.min_frequency);
    // Stable, so equal counts stay in first-seen order.
    terms.sort_by(|a, b| b.count.cmp(&a.count));
    terms.truncate(options.max_keywords);
    terms
}

/// Whether `word` (lower-case) is on the stop-word list.
#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

fn is_candidate(token: &str, options: &KeywordOptions) -> bool {
    let len = token.chars().count();
    if len < options.min_len || len > options.max_len {
        return false;
    }
    if is_stop_word(token) || CODE_TERMS.contains(&token) {
        return false;
    }
    let digits = token.chars().filter(char::is_ascii_digit).count();
    digits * 2 <= len
}
