//! Word normalization.
//!
//! Normalization lower-cases text, treats hyphens and dashes as whitespace,
//! splits on whitespace and strips punctuation from both ends of every token.
//! Tokens that end up empty are dropped.
//!
//! # Examples
//!
//! ```
//! use cardprint::analysis::normalize::normalize;
//!
//! assert_eq!(
//!     normalize("Word-based, \"semantic\" -- fingerprints!"),
//!     vec!["word", "based", "semantic", "fingerprints"]
//! );
//! assert!(normalize("").is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// A normalized word together with the text it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedWord {
    /// The token as written, outer punctuation removed, casing kept.
    pub original: String,
    /// The lower-cased normalized word.
    pub normalized: String,
}

/// Word characters are alphanumerics and the underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into (original, normalized) pairs.
fn tokens(text: &str) -> impl Iterator<Item = AlignedWord> + '_ {
    text.split(|c: char| c.is_whitespace() || c == '-' || c == '—')
        .filter_map(|token| {
            let trimmed = token.trim_matches(|c: char| !is_word_char(c));
            if trimmed.is_empty() {
                return None;
            }
            Some(AlignedWord {
                original: trimmed.to_string(),
                normalized: trimmed.to_lowercase(),
            })
        })
}

/// Normalize text into an ordered sequence of lower-cased words.
pub fn normalize(text: &str) -> Vec<String> {
    tokens(text).map(|word| word.normalized).collect()
}

/// Normalize text, keeping each surviving word aligned with its original
/// spelling.
///
/// The normalized words are exactly those returned by [`normalize`].
pub fn normalize_with_originals(text: &str) -> Vec<AlignedWord> {
    tokens(text).collect()
}

/// Normalize text and join the words with single spaces.
pub fn normalized_text(text: &str) -> String {
    normalize(text).join(" ")
}

/// Upper-case the first character of a word.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Hello, World!"), vec!["hello", "world"]);
        assert_eq!(normalize("one--two—three-four"), vec!["one", "two", "three", "four"]);
        assert_eq!(normalize("  spaced\t\nout  "), vec!["spaced", "out"]);
        assert_eq!(normalize("don't (stop)"), vec!["don't", "stop"]);
    }

    #[test]
    fn test_normalize_drops_punctuation_only_tokens() {
        assert_eq!(normalize("a & b ... c"), vec!["a", "b", "c"]);
        assert!(normalize("!!! ---").is_empty());
        assert!(normalize("").is_empty());
    }

    #[test]
    fn test_normalize_with_originals() {
        let words = normalize_with_originals("The Cat, in-the HAT.");
        let originals: Vec<_> = words.iter().map(|w| w.original.as_str()).collect();
        let normalized: Vec<_> = words.iter().map(|w| w.normalized.as_str()).collect();

        assert_eq!(originals, vec!["The", "Cat", "in", "the", "HAT"]);
        assert_eq!(normalized, vec!["the", "cat", "in", "the", "hat"]);
        assert_eq!(normalized, normalize("The Cat, in-the HAT."));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("complexity"), "Complexity");
        assert_eq!(title_case("élan"), "Élan");
        assert_eq!(title_case(""), "");
    }
}
