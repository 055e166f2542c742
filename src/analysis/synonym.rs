//! Synonym and concept phrase rewriting.
//!
//! Before a run is normalized, every known alias phrase in it is rewritten to
//! its canonical phrase, so "ml", "machine-learning" and "Machine Learning"
//! all count as the same term. Matching is case-insensitive, whole-word, and
//! tolerant of hyphens or dashes between the words of a phrase. Longer
//! phrases win over shorter ones that start at the same place.

use std::borrow::Cow;
use std::collections::HashMap;

use ahash::AHashMap;
use regex::{Captures, Regex, RegexBuilder};

use crate::analysis::normalize::{normalize, normalized_text};
use crate::error::{CardprintError, Result};

/// Map from a canonical phrase to the phrases that mean the same thing.
pub type SynonymMap = HashMap<String, Vec<String>>;

/// Compiled size limit for the alias alternation.
const REGEX_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Rewrites alias phrases to canonical phrases.
#[derive(Debug, Clone, Default)]
pub struct PhraseRewriter {
    pattern: Option<Regex>,
    /// Normalized alias -> canonical phrase as written by the caller.
    canonical: AHashMap<String, String>,
}

impl PhraseRewriter {
    /// Build a rewriter from `(alias, canonical)` pairs.
    ///
    /// Later pairs override earlier ones for the same normalized alias.
    /// Aliases that normalize to nothing, or to their own canonical phrase,
    /// are ignored.
    pub fn new<I, A, C>(replacements: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: Into<String>,
    {
        let mut canonical: AHashMap<String, String> = AHashMap::new();
        for (alias, target) in replacements {
            let target = target.into();
            let key = normalized_text(alias.as_ref());
            if key.is_empty() || key == normalized_text(&target) {
                continue;
            }
            canonical.insert(key, target);
        }

        if canonical.is_empty() {
            return Ok(Self::default());
        }

        let mut aliases: Vec<&String> = canonical.keys().collect();
        aliases.sort_by(|a, b| {
            let words = |s: &str| s.split(' ').count();
            words(b)
                .cmp(&words(a))
                .then_with(|| b.len().cmp(&a.len()))
                .then_with(|| a.cmp(b))
        });

        let alternation = aliases
            .iter()
            .map(|alias| {
                alias
                    .split(' ')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"[\s\-—]+")
            })
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| CardprintError::config(format!("Failed to compile phrase map: {e}")))?;

        log::debug!("Compiled phrase rewriter with {} aliases", canonical.len());

        Ok(PhraseRewriter {
            pattern: Some(pattern),
            canonical,
        })
    }

    /// Build a rewriter that maps every synonym to its canonical key.
    ///
    /// A synonym that is itself a key of the map is left alone.
    pub fn from_synonyms(synonyms: &SynonymMap) -> Result<Self> {
        Self::new(synonym_pairs(synonyms))
    }

    /// Number of alias phrases.
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    /// Whether the rewriter knows no aliases.
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Canonical phrase for an alias, if any.
    pub fn canonical_for(&self, alias: &str) -> Option<&str> {
        self.canonical
            .get(&normalized_text(alias))
            .map(String::as_str)
    }

    /// Rewrite every alias occurrence in `text`.
    pub fn rewrite<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(text);
        };

        pattern.replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            match self.canonical.get(&normalize(matched).join(" ")) {
                Some(canonical) => canonical.clone(),
                None => matched.to_string(),
            }
        })
    }
}

/// `(alias, canonical)` pairs for a synonym map, in a stable order.
pub fn synonym_pairs(synonyms: &SynonymMap) -> Vec<(String, String)> {
    let keys: ahash::AHashSet<String> = synonyms.keys().map(|k| normalized_text(k)).collect();

    let mut canonicals: Vec<&String> = synonyms.keys().collect();
    canonicals.sort();

    let mut pairs = Vec::new();
    for canonical in canonicals {
        for alias in &synonyms[canonical] {
            if keys.contains(&normalized_text(alias)) {
                continue;
            }
            pairs.push((alias.clone(), canonical.clone()));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_aliases() {
        let rewriter = PhraseRewriter::new([
            ("ml", "machine learning"),
            ("statistical learning", "machine learning"),
        ])
        .unwrap();

        assert_eq!(rewriter.len(), 2);
        assert_eq!(
            rewriter.rewrite("ML and Statistical-Learning, not html."),
            "machine learning and machine learning, not html."
        );
    }

    #[test]
    fn test_longest_alias_wins() {
        let rewriter =
            PhraseRewriter::new([("game", "games"), ("game theory", "decision science")]).unwrap();

        assert_eq!(
            rewriter.rewrite("Game-Theory of a game"),
            "decision science of a games"
        );
    }

    #[test]
    fn test_identity_and_empty_aliases_are_ignored() {
        let rewriter =
            PhraseRewriter::new([("Cat", "cat"), ("--", "dash"), ("kitty", "cat")]).unwrap();

        assert_eq!(rewriter.len(), 1);
        assert_eq!(rewriter.canonical_for("Kitty"), Some("cat"));
        assert_eq!(rewriter.rewrite("Cat kitty"), "Cat cat");
    }

    #[test]
    fn test_empty_rewriter_borrows() {
        let rewriter = PhraseRewriter::default();
        assert!(matches!(rewriter.rewrite("anything"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_synonym_pairs_skip_keys() {
        let mut synonyms = SynonymMap::new();
        synonyms.insert("car".to_string(), vec!["automobile".into(), "auto".into()]);
        synonyms.insert("auto".to_string(), vec!["self".into()]);

        let pairs = synonym_pairs(&synonyms);
        assert_eq!(
            pairs,
            vec![
                ("self".to_string(), "auto".to_string()),
                ("automobile".to_string(), "car".to_string()),
            ]
        );

        let rewriter = PhraseRewriter::from_synonyms(&synonyms).unwrap();
        assert_eq!(rewriter.rewrite("an Automobile"), "an car");
    }
}
