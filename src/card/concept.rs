//! Concept phrases and concept-reference suggestion.

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::ngram::ngram_within_other;
use crate::analysis::normalize::{normalize, normalized_text};
use crate::analysis::stem::stem_join;
use crate::card::annotate::ProcessedCard;
use crate::card::card::Card;
use crate::card::field::TextField;
use crate::card::types::{CardId, CardType};

/// Map from concept phrase to the concept card it names.
///
/// Phrases are keyed by their normalized text, so "Machine-Learning" and
/// "machine learning" are the same key. The first phrase registered for a
/// card is that card's canonical phrase; every other phrase is rewritten to
/// it during annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConceptMap {
    phrases: BTreeMap<String, CardId>,
    canonical: BTreeMap<CardId, String>,
}

impl ConceptMap {
    /// Create an empty concept map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from every concept card: the title is the canonical
    /// phrase and the alternate titles are aliases.
    pub fn from_cards<'a, I>(cards: I) -> Self
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let mut map = ConceptMap::new();
        for card in cards {
            if card.card_type != CardType::Concept {
                continue;
            }
            map.insert(&card.title, card.id.clone());
            for alternate in &card.title_alternates {
                map.insert(alternate, card.id.clone());
            }
        }
        map
    }

    /// Register a phrase for a concept card. Phrases that normalize to
    /// nothing are ignored; re-registering a phrase moves it to `id`.
    pub fn insert<S: AsRef<str>>(&mut self, phrase: S, id: CardId) {
        let phrase = phrase.as_ref().trim();
        let key = normalized_text(phrase);
        if key.is_empty() {
            return;
        }
        self.canonical
            .entry(id.clone())
            .or_insert_with(|| phrase.to_string());
        self.phrases.insert(key, id);
    }

    /// Concept card named by a phrase.
    pub fn get(&self, phrase: &str) -> Option<&CardId> {
        self.phrases.get(&normalized_text(phrase))
    }

    /// Canonical phrase of a concept card.
    pub fn canonical_phrase(&self, id: &CardId) -> Option<&str> {
        self.canonical.get(id).map(String::as_str)
    }

    /// `(normalized phrase, card id)` pairs in phrase order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CardId)> {
        self.phrases.iter().map(|(phrase, id)| (phrase.as_str(), id))
    }

    /// `(alias, canonical phrase)` pairs for every phrase that is not its
    /// card's canonical phrase.
    pub fn alias_pairs(&self) -> Vec<(String, String)> {
        self.phrases
            .iter()
            .filter_map(|(phrase, id)| {
                let canonical = self.canonical.get(id)?;
                (normalized_text(canonical) != *phrase).then(|| (phrase.clone(), canonical.clone()))
            })
            .collect()
    }

    /// Number of phrases.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether the map has no phrases.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Concept cards whose phrase appears in an annotated card but which the
/// card does not reference yet.
///
/// A phrase matches when its stems occur as contiguous whole words in any
/// run of any non-derived field. The card itself is never suggested.
/// Returns ids sorted and de-duplicated; an unannotated card yields none.
pub fn suggested_concept_references(card: &ProcessedCard, concepts: &ConceptMap) -> Vec<CardId> {
    let Some(nlp) = card.nlp() else {
        return Vec::new();
    };

    let runs: Vec<&str> = TextField::ALL
        .iter()
        .flat_map(|field| nlp.runs(*field))
        .filter(|run| !run.is_empty())
        .map(|run| run.stemmed())
        .collect();

    let mut suggestions = BTreeSet::new();
    for (phrase, id) in concepts.iter() {
        if id == card.id() || card.card().references_card(id) || suggestions.contains(id) {
            continue;
        }
        let stemmed = stem_join(&normalize(phrase));
        if runs.iter().any(|run| ngram_within_other(&stemmed, run)) {
            suggestions.insert(id.clone());
        }
    }

    log::trace!(
        "Card {} has {} concept suggestions",
        card.id(),
        suggestions.len()
    );
    suggestions.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::annotate::Annotator;
    use crate::card::card::FallbackTextMap;
    use crate::card::field::FieldConfiguration;
    use crate::card::types::ReferenceType;

    fn concept(id: &str, title: &str, alternates: &[&str]) -> Card {
        let mut builder = Card::builder(id).card_type(CardType::Concept).title(title);
        for alternate in alternates {
            builder = builder.title_alternate(*alternate);
        }
        builder.build()
    }

    #[test]
    fn test_from_cards() {
        let cards = vec![
            concept("ml", "Machine Learning", &["ML", "statistical learning"]),
            Card::builder("x").title("Not a concept").build(),
        ];
        let map = ConceptMap::from_cards(&cards);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("machine-learning"), Some(&CardId::from("ml")));
        assert_eq!(map.get("not a concept"), None);
        assert_eq!(
            map.canonical_phrase(&CardId::from("ml")),
            Some("Machine Learning")
        );
        assert_eq!(
            map.alias_pairs(),
            vec![
                ("ml".to_string(), "Machine Learning".to_string()),
                (
                    "statistical learning".to_string(),
                    "Machine Learning".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_suggested_concept_references() {
        let cards = vec![
            concept("ml", "Machine Learning", &["ML"]),
            concept("graph", "Graphs", &[]),
            concept("cat", "Cats", &[]),
        ];
        let concepts = ConceptMap::from_cards(&cards);
        let annotator =
            Annotator::new(FieldConfiguration::default(), &concepts, Default::default()).unwrap();

        let card = Card::builder("note")
            .title("Using ML on a graph")
            .body("<p>Cats everywhere</p>")
            .reference("cat", ReferenceType::Concept, "")
            .build();
        let processed = annotator.annotate(card, FallbackTextMap::new());

        assert_eq!(
            suggested_concept_references(&processed, &concepts),
            vec![CardId::from("graph"), CardId::from("ml")]
        );

        let own = annotator.annotate(cards[0].clone(), FallbackTextMap::new());
        assert!(suggested_concept_references(&own, &concepts).is_empty());
    }
}
