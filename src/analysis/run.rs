//! Runs: paragraph-level chunks of a text field.
//!
//! A field's text is split into runs, and every run is processed once into a
//! [`ProcessedRun`] holding its original, normalized, stemmed and
//! stop-word-free forms. N-grams never cross a run boundary.

use serde::{Deserialize, Serialize};

use crate::analysis::normalize::{AlignedWord, normalize, normalize_with_originals};
use crate::analysis::stem::{stem, stem_join};
use crate::analysis::stop::remove_stop_words;

/// Split plain text into runs, one per non-blank line.
///
/// Absent or empty input yields no runs, and blank lines (including a
/// trailing newline) never produce an empty run.
///
/// # Examples
///
/// ```
/// use cardprint::analysis::run::split_runs;
///
/// assert!(split_runs(None::<&str>).is_empty());
/// assert!(split_runs("").is_empty());
/// assert_eq!(split_runs("A\nB\n"), vec!["A", "B"]);
/// ```
pub fn split_runs<'a>(text: impl Into<Option<&'a str>>) -> Vec<String> {
    let Some(text) = text.into() else {
        return Vec::new();
    };

    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// A single word of a run in all of its forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunWord {
    /// Spelling in the original text, outer punctuation removed.
    pub original: String,
    /// Lower-cased normalized word.
    pub normalized: String,
    /// Stem of the normalized word.
    pub stemmed: String,
}

/// One run of text in every representation the engine needs.
///
/// All fields are computed once at construction; the value is immutable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRun {
    original: String,
    normalized: String,
    stemmed: String,
    without_stop_words: String,
    content_stems: String,
}

impl ProcessedRun {
    /// Process a raw run of text.
    pub fn new(run: &str) -> Self {
        let words = normalize(run);
        let content_words = remove_stop_words(&words);

        ProcessedRun {
            original: run.to_string(),
            normalized: words.join(" "),
            stemmed: stem_join(&words),
            without_stop_words: content_words.join(" "),
            content_stems: stem_join(&content_words),
        }
    }

    /// The raw run text.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Normalized words joined by single spaces.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Stemmed normalized words joined by single spaces.
    pub fn stemmed(&self) -> &str {
        &self.stemmed
    }

    /// Normalized words with stop words removed.
    pub fn without_stop_words(&self) -> &str {
        &self.without_stop_words
    }

    /// Stems of the non-stop words, the unit fingerprints are counted in.
    pub fn content_stems(&self) -> &str {
        &self.content_stems
    }

    /// True iff the run has no normalized words.
    pub fn is_empty(&self) -> bool {
        self.normalized.trim().is_empty()
    }

    /// Every word of the run with its original spelling, normalized form and
    /// stem, in order.
    pub fn words(&self) -> Vec<RunWord> {
        normalize_with_originals(&self.original)
            .into_iter()
            .map(|AlignedWord { original, normalized }| RunWord {
                stemmed: stem(&normalized),
                original,
                normalized,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_runs() {
        assert!(split_runs(None::<&str>).is_empty());
        assert!(split_runs("").is_empty());
        assert!(split_runs("\n\n").is_empty());
        assert_eq!(split_runs("A\nB\n"), vec!["A", "B"]);
        assert_eq!(split_runs("A\r\n\r\nB"), vec!["A", "B"]);
        assert_eq!(split_runs("single"), vec!["single"]);
    }

    #[test]
    fn test_processed_run() {
        let run = ProcessedRun::new("The Cats are running-fast!");

        assert_eq!(run.original(), "The Cats are running-fast!");
        assert_eq!(run.normalized(), "the cats are running fast");
        assert_eq!(run.stemmed(), "the cat ar run fast");
        assert_eq!(run.without_stop_words(), "cats running fast");
        assert_eq!(run.content_stems(), "cat run fast");
        assert!(!run.is_empty());
    }

    #[test]
    fn test_empty_run() {
        assert!(ProcessedRun::new("").is_empty());
        assert!(ProcessedRun::new(" ... ").is_empty());
        assert_eq!(ProcessedRun::new("--").stemmed(), "");
    }

    #[test]
    fn test_run_words_are_aligned() {
        let run = ProcessedRun::new("Cat in the Hats.");
        let words = run.words();

        assert_eq!(words.len(), 4);
        assert_eq!(words[3].original, "Hats");
        assert_eq!(words[3].normalized, "hats");
        assert_eq!(words[3].stemmed, "hat");
    }
}
