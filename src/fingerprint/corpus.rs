//! Corpus statistics: document frequency and inverse document frequency.

use ahash::{AHashMap, AHashSet};

use crate::analysis::ngram::ngrams;
use crate::analysis::run::ProcessedRun;
use crate::card::annotate::ProcessedCard;

/// Every `1..=max_size` word n-gram of a run's content stems, paired with
/// its length in words.
pub(crate) fn run_terms(run: &ProcessedRun, max_size: usize) -> impl Iterator<Item = (String, usize)> + '_ {
    (1..=max_size).flat_map(move |size| {
        ngrams(run.content_stems(), size)
            .into_iter()
            .map(move |term| (term, size))
    })
}

/// Document frequencies of every term in a fixed set of cards.
///
/// A term's document frequency is the number of cards in which it occurs at
/// least once, in any field.
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    document_frequency: AHashMap<String, usize>,
    num_cards: usize,
}

impl CorpusStats {
    /// Count document frequencies over the given cards.
    pub fn from_cards<'a, I>(cards: I, max_ngram_size: usize) -> Self
    where
        I: IntoIterator<Item = &'a ProcessedCard>,
    {
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut num_cards = 0;

        for card in cards {
            num_cards += 1;
            let Some(nlp) = card.nlp() else {
                continue;
            };

            let mut seen: AHashSet<String> = AHashSet::new();
            for (_, runs) in nlp.iter() {
                for run in runs {
                    seen.extend(run_terms(run, max_ngram_size).map(|(term, _)| term));
                }
            }
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        CorpusStats {
            document_frequency,
            num_cards,
        }
    }

    /// Number of cards the statistics were computed from.
    pub fn num_cards(&self) -> usize {
        self.num_cards
    }

    /// Number of distinct terms.
    pub fn num_terms(&self) -> usize {
        self.document_frequency.len()
    }

    /// Number of cards containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Smoothed inverse document frequency, `ln((N + 1) / (df + 1)) + 1`.
    ///
    /// Always at least 1, and strictly larger for rarer terms.
    pub fn idf(&self, term: &str) -> f64 {
        let n = self.num_cards as f64;
        let df = self.document_frequency(term) as f64;
        ((n + 1.0) / (df + 1.0)).ln() + 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::synonym::SynonymMap;
    use crate::card::annotate::Annotator;
    use crate::card::card::{Card, FallbackTextMap};
    use crate::card::concept::ConceptMap;
    use crate::card::field::FieldConfiguration;

    fn processed(cards: Vec<Card>) -> Vec<ProcessedCard> {
        let annotator =
            Annotator::new(FieldConfiguration::default(), &ConceptMap::new(), SynonymMap::new())
                .unwrap();
        cards
            .into_iter()
            .map(|card| annotator.annotate(card, FallbackTextMap::new()))
            .collect()
    }

    #[test]
    fn test_run_terms() {
        let run = ProcessedRun::new("red apples and green apples");
        let terms: Vec<(String, usize)> = run_terms(&run, 2).collect();

        assert_eq!(terms[0], ("red".to_string(), 1));
        assert!(terms.contains(&("appl green".to_string(), 2)));
        assert_eq!(terms.iter().filter(|(_, size)| *size == 2).count(), 3);
    }

    #[test]
    fn test_document_frequency_counts_cards_once() {
        let cards = processed(vec![
            Card::builder("a").title("apple apple").body("<p>apple pie</p>").build(),
            Card::builder("b").title("apple tart").build(),
            Card::builder("c").title("pear").build(),
        ]);
        let stats = CorpusStats::from_cards(&cards, 3);

        assert_eq!(stats.num_cards(), 3);
        assert_eq!(stats.document_frequency("appl"), 2);
        assert_eq!(stats.document_frequency("appl pie"), 1);
        assert_eq!(stats.document_frequency("pear"), 1);
        assert_eq!(stats.document_frequency("plum"), 0);
    }

    #[test]
    fn test_idf_orders_rare_terms_higher() {
        let cards = processed(vec![
            Card::builder("a").title("common rare").build(),
            Card::builder("b").title("common").build(),
        ]);
        let stats = CorpusStats::from_cards(&cards, 1);

        assert!(stats.idf("rare") > stats.idf("common"));
        assert!(stats.idf("common") >= 1.0);
        assert!(stats.idf("unseen") > stats.idf("rare"));
    }
}
