//! N-gram helpers.
//!
//! N-grams are whitespace-separated word windows. Terms in fingerprints and
//! query clauses are n-grams over stemmed words; these helpers extract them,
//! test whole-word containment and map a stemmed n-gram back to the words
//! that produced it in a run's original text.

use crate::analysis::run::ProcessedRun;
use crate::analysis::stop::is_stop_word;

/// N-gram size used when a caller has no preference.
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// Sliding window of `size` consecutive words.
///
/// Returns no n-grams when the text has fewer than `size` words, when the
/// text is absent, or when `size` is zero.
///
/// # Examples
///
/// ```
/// use cardprint::analysis::ngram::ngrams;
///
/// assert_eq!(ngrams("one two three", 2), vec!["one two", "two three"]);
/// assert!(ngrams("one", 2).is_empty());
/// assert!(ngrams(None::<&str>, 2).is_empty());
/// ```
pub fn ngrams<'a>(text: impl Into<Option<&'a str>>, size: usize) -> Vec<String> {
    let Some(text) = text.into() else {
        return Vec::new();
    };
    if size == 0 {
        return Vec::new();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    words.windows(size).map(|window| window.join(" ")).collect()
}

/// Whether the words of `ngram` appear contiguously, as whole words, in
/// `container`.
///
/// # Examples
///
/// ```
/// use cardprint::analysis::ngram::ngram_within_other;
///
/// assert!(ngram_within_other("bar baz", "foo bar baz sed"));
/// assert!(!ngram_within_other("juic", "organic juice drink"));
/// ```
pub fn ngram_within_other(ngram: &str, container: &str) -> bool {
    let needle: Vec<&str> = ngram.split_whitespace().collect();
    if needle.is_empty() {
        return false;
    }

    let haystack: Vec<&str> = container.split_whitespace().collect();
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_slice())
}

/// Find the words of `run` that a stemmed n-gram was built from.
///
/// Stems are compared position by position. Stop words in the run may sit
/// between the matched words (fingerprint n-grams are built with stop words
/// removed) and are kept in the output. Returns an empty string when the run
/// has no match.
pub fn extract_original_ngram_from_run(target: &str, run: &ProcessedRun) -> String {
    let target: Vec<&str> = target.split_whitespace().collect();
    if target.is_empty() {
        return String::new();
    }

    let words = run.words();
    for start in 0..words.len() {
        if is_stop_word(&words[start].normalized) || words[start].stemmed != target[0] {
            continue;
        }

        let mut matched = 1;
        let mut end = start;
        let mut pos = start + 1;
        while matched < target.len() && pos < words.len() {
            if is_stop_word(&words[pos].normalized) {
                pos += 1;
                continue;
            }
            if words[pos].stemmed != target[matched] {
                break;
            }
            matched += 1;
            end = pos;
            pos += 1;
        }

        if matched == target.len() {
            return words[start..=end]
                .iter()
                .map(|word| word.original.as_str())
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    String::new()
}
