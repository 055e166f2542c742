//! The fingerprint value type.

use std::cmp::Ordering;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::card::annotate::ProcessedCard;
use crate::card::types::CardId;
use crate::fingerprint::pretty;

/// One weighted term of a fingerprint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FingerprintItem {
    /// Stemmed n-gram.
    pub term: String,
    /// Non-negative weight.
    pub weight: f64,
}

/// Ranked mapping from stemmed n-gram to weight.
///
/// Items are sorted by descending weight with ties broken by ascending
/// term, hold no duplicate terms and have strictly positive weights. A
/// fingerprint also keeps the processed cards it was derived from so that
/// its terms can be rendered back into readable phrases.
#[derive(Clone, Debug, Default)]
pub struct Fingerprint {
    items: Vec<FingerprintItem>,
    sources: Arc<[Arc<ProcessedCard>]>,
}

fn rank(a: &FingerprintItem, b: &FingerprintItem) -> Ordering {
    b.weight
        .total_cmp(&a.weight)
        .then_with(|| a.term.cmp(&b.term))
}

impl Fingerprint {
    /// Build a fingerprint from accumulated term weights.
    ///
    /// Non-positive and non-finite weights are dropped. When `max_terms` is
    /// set only the highest-ranked terms are kept.
    pub fn from_weights(
        weights: AHashMap<String, f64>,
        sources: Arc<[Arc<ProcessedCard>]>,
        max_terms: Option<usize>,
    ) -> Self {
        let mut items: Vec<FingerprintItem> = weights
            .into_iter()
            .filter(|(_, weight)| weight.is_finite() && *weight > 0.0)
            .map(|(term, weight)| FingerprintItem { term, weight })
            .collect();
        items.sort_by(rank);
        if let Some(max_terms) = max_terms {
            items.truncate(max_terms);
        }

        Fingerprint { items, sources }
    }

    /// Sum several fingerprints, each scaled by its weight, and re-rank.
    ///
    /// Sources are merged in order with duplicates removed.
    pub fn combine<'a, I>(parts: I, max_terms: Option<usize>) -> Self
    where
        I: IntoIterator<Item = (&'a Fingerprint, f64)>,
    {
        let mut weights: AHashMap<String, f64> = AHashMap::new();
        let mut sources: Vec<Arc<ProcessedCard>> = Vec::new();
        let mut seen: AHashSet<CardId> = AHashSet::new();

        for (fingerprint, scale) in parts {
            for item in &fingerprint.items {
                *weights.entry(item.term.clone()).or_insert(0.0) += item.weight * scale;
            }
            for source in fingerprint.sources.iter() {
                if seen.insert(source.id().clone()) {
                    sources.push(Arc::clone(source));
                }
            }
        }

        Fingerprint::from_weights(weights, sources.into(), max_terms)
    }

    /// Ranked items.
    pub fn items(&self) -> &[FingerprintItem] {
        &self.items
    }

    /// Terms in rank order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.term.as_str())
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the fingerprint has no terms.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Weight of a term, 0 if absent.
    pub fn weight(&self, term: &str) -> f64 {
        self.items
            .iter()
            .find(|item| item.term == term)
            .map(|item| item.weight)
            .unwrap_or(0.0)
    }

    /// Cards the fingerprint was derived from.
    pub fn sources(&self) -> &[Arc<ProcessedCard>] {
        &self.sources
    }

    /// Copy holding only the `n` highest-ranked terms.
    pub fn truncated(&self, n: usize) -> Self {
        Fingerprint {
            items: self.items.iter().take(n).cloned().collect(),
            sources: Arc::clone(&self.sources),
        }
    }

    /// Sum over shared terms of the product of both weights.
    ///
    /// Zero when no term is shared; never negative.
    pub fn semantic_overlap(&self, other: &Fingerprint) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let lookup: AHashMap<&str, f64> = large
            .items
            .iter()
            .map(|item| (item.term.as_str(), item.weight))
            .collect();

        small
            .items
            .iter()
            .filter_map(|item| lookup.get(item.term.as_str()).map(|w| w * item.weight))
            .sum()
    }

    /// Terms rendered as readable phrases, in rank order.
    ///
    /// Each stem is shown as its most frequent spelling in the source cards,
    /// title-cased. With `include_stop_word_phrases`, multi-word terms are
    /// instead recovered from the original text, keeping any stop words
    /// that sat between the words in lower case.
    pub fn pretty_items(&self, include_stop_word_phrases: bool) -> Vec<String> {
        pretty::pretty_items(self, include_stop_word_phrases)
    }

    /// Readable phrases with every phrase that is contained word for word
    /// in an earlier phrase removed.
    pub fn deduped_pretty_phrases(&self) -> Vec<String> {
        pretty::deduped_phrases(&self.pretty_items(false))
    }

    /// [`deduped_pretty_phrases`](Self::deduped_pretty_phrases) joined by
    /// single spaces.
    pub fn deduped_pretty_items(&self) -> String {
        self.deduped_pretty_phrases().join(" ")
    }
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint(pairs: &[(&str, f64)]) -> Fingerprint {
        let weights = pairs
            .iter()
            .map(|(term, weight)| (term.to_string(), *weight))
            .collect();
        Fingerprint::from_weights(weights, Arc::from(Vec::new()), None)
    }

    #[test]
    fn test_ranking_and_tie_break() {
        let fp = fingerprint(&[("b", 1.0), ("a", 1.0), ("c", 2.0), ("zero", 0.0)]);

        assert_eq!(fp.terms().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert_eq!(fp.weight("c"), 2.0);
        assert_eq!(fp.weight("zero"), 0.0);
        assert_eq!(fp.truncated(1).len(), 1);
    }

    #[test]
    fn test_max_terms() {
        let weights = [("a", 3.0), ("b", 2.0), ("c", 1.0)]
            .iter()
            .map(|(t, w)| (t.to_string(), *w))
            .collect();
        let fp = Fingerprint::from_weights(weights, Arc::from(Vec::new()), Some(2));
        assert_eq!(fp.terms().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_semantic_overlap() {
        let a = fingerprint(&[("x", 2.0), ("y", 1.0)]);
        let b = fingerprint(&[("y", 3.0), ("z", 5.0)]);
        let c = fingerprint(&[("q", 1.0)]);

        assert_eq!(a.semantic_overlap(&b), 3.0);
        assert_eq!(b.semantic_overlap(&a), 3.0);
        assert_eq!(a.semantic_overlap(&c), 0.0);
        assert_eq!(a.semantic_overlap(&Fingerprint::default()), 0.0);
    }

    #[test]
    fn test_combine() {
        let a = fingerprint(&[("x", 2.0), ("y", 1.0)]);
        let b = fingerprint(&[("y", 3.0)]);
        let combined = Fingerprint::combine([(&a, 1.0), (&b, 0.5)], None);

        assert_eq!(combined.terms().collect::<Vec<_>>(), vec!["y", "x"]);
        assert_eq!(combined.weight("y"), 2.5);
    }
}
