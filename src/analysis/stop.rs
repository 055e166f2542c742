//! English stop words.
//!
//! Stop words are common words that carry little signal on their own. They
//! stay in the normalized and stemmed text of a run (so phrases can still be
//! matched and reconstructed verbatim), but they are removed before terms are
//! counted for fingerprints.
//!
//! # Examples
//!
//! ```
//! use cardprint::analysis::stop::{is_stop_word, remove_stop_words};
//!
//! assert!(is_stop_word("the"));
//! assert!(!is_stop_word("fingerprint"));
//! assert_eq!(remove_stop_words(&["the", "quick", "fox"]), vec!["quick", "fox"]);
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do",
    "does", "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from",
    "further", "had", "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "isn't",
    "it", "it's", "its", "itself", "just", "let's", "me", "more", "most", "much", "must", "my",
    "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
    "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "shouldn't", "so", "some", "such", "than", "that", "that's", "the", "their", "theirs",
    "them", "themselves", "then", "there", "there's", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "were",
    "weren't", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "won't", "would", "wouldn't", "you", "your", "yours", "yourself", "yourselves",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DEFAULT_ENGLISH_STOP_WORDS.iter().copied().collect());

/// Whether a normalized word is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    DEFAULT_ENGLISH_STOP_WORDS_SET.contains(word)
}

/// Remove stop words from a sequence of normalized words.
pub fn remove_stop_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words
        .iter()
        .map(AsRef::as_ref)
        .filter(|word| !is_stop_word(word))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("a"));
        assert!(is_stop_word("don't"));
        assert!(!is_stop_word("The")); // only normalized words match
        assert!(!is_stop_word("complexity"));
    }

    #[test]
    fn test_remove_stop_words() {
        let words = ["this", "is", "a", "test", "of", "the", "system"];
        assert_eq!(remove_stop_words(&words), vec!["test", "system"]);

        let empty: [&str; 0] = [];
        assert!(remove_stop_words(&empty).is_empty());
    }
}
