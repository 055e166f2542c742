//! Rendering fingerprint terms as readable phrases.

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::ngram::{extract_original_ngram_from_run, ngram_within_other};
use crate::analysis::normalize::title_case;
use crate::analysis::stop::is_stop_word;
use crate::card::annotate::ProcessedCard;
use crate::card::field::TextField;
use crate::fingerprint::fingerprint::Fingerprint;

/// Most frequent spelling of every stem in the given cards.
///
/// Spellings are normalized (lower-case) words; equally frequent spellings
/// resolve to the lexicographically smallest.
pub fn inflections<'a, I>(cards: I) -> AHashMap<String, String>
where
    I: IntoIterator<Item = &'a ProcessedCard>,
{
    let mut counts: AHashMap<String, BTreeMap<String, usize>> = AHashMap::new();
    for card in cards {
        let Some(nlp) = card.nlp() else {
            continue;
        };
        for (_, runs) in nlp.iter() {
            for word in runs.iter().flat_map(|run| run.words()) {
                *counts
                    .entry(word.stemmed)
                    .or_default()
                    .entry(word.normalized)
                    .or_insert(0) += 1;
            }
        }
    }

    counts
        .into_iter()
        .filter_map(|(stem, spellings)| {
            // Equal counts prefer the smaller word.
            let best = spellings
                .into_iter()
                .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))?;
            Some((stem, best.0))
        })
        .collect()
}

fn render_term(term: &str, inflections: &AHashMap<String, String>) -> String {
    term.split_whitespace()
        .map(|stem| title_case(inflections.get(stem).map(String::as_str).unwrap_or(stem)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find the original words of a multi-word term in the cards' runs and
/// title-case them, keeping stop words in lower case.
fn recover_phrase(term: &str, cards: &[Arc<ProcessedCard>]) -> Option<String> {
    for card in cards {
        for field in TextField::ALL {
            for run in card.runs(field) {
                let original = extract_original_ngram_from_run(term, run);
                if original.is_empty() {
                    continue;
                }
                let phrase = original
                    .split_whitespace()
                    .map(|word| {
                        let lower = word.to_lowercase();
                        if is_stop_word(&lower) {
                            lower
                        } else {
                            title_case(&lower)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                return Some(phrase);
            }
        }
    }
    None
}

/// Render every term of a fingerprint, in rank order.
pub fn pretty_items(fingerprint: &Fingerprint, include_stop_word_phrases: bool) -> Vec<String> {
    let sources = fingerprint.sources();
    let inflections = inflections(sources.iter().map(Arc::as_ref));

    fingerprint
        .terms()
        .map(|term| {
            if include_stop_word_phrases
                && term.contains(' ')
                && let Some(phrase) = recover_phrase(term, sources)
            {
                return phrase;
            }
            render_term(term, &inflections)
        })
        .collect()
}

/// Drop every phrase whose words appear contiguously in a phrase kept
/// before it. Comparison ignores case.
pub fn deduped_phrases(phrases: &[String]) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    let mut kept_lower: Vec<String> = Vec::new();

    for phrase in phrases {
        let lower = phrase.to_lowercase();
        if lower.trim().is_empty() || kept_lower.iter().any(|k| ngram_within_other(&lower, k)) {
            continue;
        }
        kept.push(phrase.clone());
        kept_lower.push(lower);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::synonym::SynonymMap;
    use crate::card::annotate::Annotator;
    use crate::card::card::{Card, FallbackTextMap};
    use crate::card::concept::ConceptMap;
    use crate::card::field::FieldConfiguration;

    fn processed(card: Card) -> ProcessedCard {
        Annotator::new(FieldConfiguration::default(), &ConceptMap::new(), SynonymMap::new())
            .unwrap()
            .annotate(card, FallbackTextMap::new())
    }

    #[test]
    fn test_inflections_prefer_most_frequent() {
        let card = processed(
            Card::builder("c")
                .title("Running runs")
                .body("<p>runs and runs</p>")
                .build(),
        );
        let inflections = inflections([&card]);

        assert_eq!(inflections["run"], "runs");
    }

    #[test]
    fn test_inflection_ties_pick_smallest() {
        let card = processed(Card::builder("c").title("cats cat").build());
        assert_eq!(inflections([&card])["cat"], "cat");
    }

    #[test]
    fn test_render_term() {
        let mut inflections = AHashMap::new();
        inflections.insert("complex".to_string(), "complexity".to_string());

        assert_eq!(render_term("complex system", &inflections), "Complexity System");
    }

    #[test]
    fn test_deduped_phrases() {
        let phrases: Vec<String> = ["Machine Learning", "Learning", "Deep Learning", "machine", "Deep"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(
            deduped_phrases(&phrases),
            vec!["Machine Learning", "Deep Learning"]
        );
    }
}
