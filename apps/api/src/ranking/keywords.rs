//! Keyword Extractor: turns free text into a normalized set of significant tokens.

use std::collections::BTreeSet;

/// Tokens shorter than this are dropped.
pub const MIN_TOKEN_LEN: usize = 2;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his",
    "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most",
    "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our",
    "ours", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "us", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// `+` and `#` survive so that "C++" and "C#" stay distinct tokens.
fn is_separator(c: char) -> bool {
    !(c.is_alphanumeric() || c == '+' || c == '#' || c == '.')
}

/// Extracts the lowercase, stop-word-filtered keyword set of `text`.
///
/// Dots are kept inside tokens ("node.js") but trimmed from the ends, so
/// sentence punctuation does not leak into keywords.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    text.split(is_separator)
        .map(|raw| raw.trim_matches('.').to_lowercase())
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN && !is_stop_word(token))
        .collect()
}
