//! Fingerprint generation over a fixed set of cards.

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::card::annotate::ProcessedCard;
use crate::card::field::FieldConfiguration;
use crate::card::types::CardId;
use crate::error::{CardprintError, Result};
use crate::fingerprint::config::FingerprintConfig;
use crate::fingerprint::corpus::{CorpusStats, run_terms};
use crate::fingerprint::fingerprint::Fingerprint;

/// Builds, caches and compares fingerprints for one set of cards.
///
/// Corpus statistics are computed once from exactly the cards given to
/// [`new`](Self::new). Fingerprints are cached per card id for the life of
/// the generator; build a new generator to see different cards.
///
/// # Example
///
/// ```
/// use cardprint::card::{Annotator, Card, ConceptMap, FallbackTextMap, FieldConfiguration};
/// use cardprint::fingerprint::{FingerprintConfig, FingerprintGenerator};
///
/// let fields = FieldConfiguration::default();
/// let annotator = Annotator::new(fields.clone(), &ConceptMap::new(), Default::default()).unwrap();
/// let cards = vec![
///     annotator.annotate(Card::builder("a").title("Graph theory").build(), FallbackTextMap::new()),
///     annotator.annotate(Card::builder("b").title("Set theory").build(), FallbackTextMap::new()),
/// ];
///
/// let generator = FingerprintGenerator::new(cards, fields, FingerprintConfig::default()).unwrap();
/// let fingerprint = generator.fingerprint_for_card_id(&"a".into()).unwrap();
/// assert_eq!(fingerprint.items()[0].term, "graph");
/// ```
#[derive(Debug)]
pub struct FingerprintGenerator {
    cards: BTreeMap<CardId, Arc<ProcessedCard>>,
    fields: FieldConfiguration,
    config: FingerprintConfig,
    stats: CorpusStats,
    cache: Mutex<AHashMap<CardId, Fingerprint>>,
}

impl FingerprintGenerator {
    /// Create a generator over a set of annotated cards.
    ///
    /// Unannotated cards count as empty. When two cards share an id the
    /// later one wins.
    pub fn new<I>(cards: I, fields: FieldConfiguration, config: FingerprintConfig) -> Result<Self>
    where
        I: IntoIterator<Item = ProcessedCard>,
    {
        config.validate()?;

        let mut by_id: BTreeMap<CardId, Arc<ProcessedCard>> = BTreeMap::new();
        for card in cards {
            if !card.is_annotated() {
                log::warn!("Card {} is not annotated and will count as empty", card.id());
            }
            if let Some(previous) = by_id.insert(card.id().clone(), Arc::new(card)) {
                log::warn!("Duplicate card id {}, keeping the last one", previous.id());
            }
        }

        let stats = CorpusStats::from_cards(by_id.values().map(Arc::as_ref), config.max_ngram_size);
        log::debug!(
            "Built corpus statistics for {} cards with {} distinct terms",
            stats.num_cards(),
            stats.num_terms()
        );

        Ok(FingerprintGenerator {
            cards: by_id,
            fields,
            config,
            stats,
            cache: Mutex::new(AHashMap::new()),
        })
    }

    /// The corpus statistics.
    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    /// The field configuration.
    pub fn fields(&self) -> &FieldConfiguration {
        &self.fields
    }

    /// The fingerprint configuration.
    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the generator has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// A card by id.
    pub fn card(&self, id: &CardId) -> Option<&Arc<ProcessedCard>> {
        self.cards.get(id)
    }

    /// Card ids in ascending order.
    pub fn card_ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.keys()
    }

    /// Cards in ascending id order.
    pub fn cards(&self) -> impl Iterator<Item = &ProcessedCard> {
        self.cards.values().map(Arc::as_ref)
    }

    /// Number of cached fingerprints.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Fingerprint of a single card.
    ///
    /// Returns [`CardprintError::NotFound`] for an id outside the corpus.
    pub fn fingerprint_for_card_id(&self, id: &CardId) -> Result<Fingerprint> {
        if let Some(fingerprint) = self.cache.lock().get(id) {
            return Ok(fingerprint.clone());
        }

        let card = self
            .cards
            .get(id)
            .ok_or_else(|| CardprintError::not_found(format!("card '{id}'")))?;
        let fingerprint = self.compute(card);

        self.cache
            .lock()
            .entry(id.clone())
            .or_insert_with(|| fingerprint.clone());
        Ok(fingerprint)
    }

    fn compute(&self, card: &Arc<ProcessedCard>) -> Fingerprint {
        let mut tf: AHashMap<String, f64> = AHashMap::new();

        if let Some(nlp) = card.nlp() {
            for (field, runs) in nlp.iter() {
                let Some(field_weight) = self.fields.relative_weight(field) else {
                    continue;
                };
                if field_weight <= 0.0 {
                    continue;
                }
                for run in runs {
                    for (term, size) in run_terms(run, self.config.max_ngram_size) {
                        *tf.entry(term).or_insert(0.0) += field_weight / size as f64;
                    }
                }
            }
        }

        for (term, weight) in tf.iter_mut() {
            *weight *= self.stats.idf(term);
        }

        let fingerprint =
            Fingerprint::from_weights(tf, Arc::from(vec![Arc::clone(card)]), self.config.max_terms);
        log::trace!("Fingerprint for {} has {} terms", card.id(), fingerprint.len());
        fingerprint
    }

    /// Sum of the listed cards' fingerprints, each with weight 1.
    pub fn fingerprint_for_card_id_list(&self, ids: &[CardId]) -> Result<Fingerprint> {
        let weighted: Vec<(CardId, f64)> = ids.iter().map(|id| (id.clone(), 1.0)).collect();
        self.fingerprint_for_weighted_card_ids(&weighted)
    }

    /// Sum of the listed cards' fingerprints scaled by the given weights.
    ///
    /// Terms are re-ranked after summing; IDF is not applied again.
    pub fn fingerprint_for_weighted_card_ids(&self, ids: &[(CardId, f64)]) -> Result<Fingerprint> {
        let parts = ids
            .iter()
            .map(|(id, weight)| Ok((self.fingerprint_for_card_id(id)?, *weight)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Fingerprint::combine(
            parts.iter().map(|(fingerprint, weight)| (fingerprint, *weight)),
            self.config.max_terms,
        ))
    }

    /// Fingerprints of every card, keyed by id.
    pub fn fingerprints(&self) -> Result<BTreeMap<CardId, Fingerprint>> {
        let ids: Vec<&CardId> = self.cards.keys().collect();
        let fingerprints = ids
            .par_iter()
            .map(|id| Ok(((*id).clone(), self.fingerprint_for_card_id(id)?)))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Fingerprint cache holds {} entries", self.cached_len());
        Ok(fingerprints.into_iter().collect())
    }

    /// Every other card ranked by fingerprint overlap with `id`.
    ///
    /// Cards for which `filter` returns false are left out.
    pub fn closest_overlapping_items(
        &self,
        id: &CardId,
        filter: Option<&dyn Fn(&CardId) -> bool>,
    ) -> Result<Vec<(CardId, f64)>> {
        let target = self.fingerprint_for_card_id(id)?;
        let candidates = self.fingerprints()?;
        Ok(closest_overlapping(id, &target, &candidates, filter))
    }

    /// Title synthesized from the combined fingerprint of the given cards:
    /// the first `max_phrases` deduplicated phrases, space-joined.
    pub fn title_for_card_ids(&self, ids: &[CardId], max_phrases: usize) -> Result<String> {
        let fingerprint = self.fingerprint_for_card_id_list(ids)?;
        Ok(fingerprint
            .deduped_pretty_phrases()
            .into_iter()
            .take(max_phrases)
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// Rank `candidates` by overlap with `target`.
///
/// The card `id` itself and cards rejected by `filter` are excluded. Every
/// other candidate is present, with a score of exactly 0 when it shares no
/// term. Sorted by descending score, then ascending id.
pub fn closest_overlapping(
    id: &CardId,
    target: &Fingerprint,
    candidates: &BTreeMap<CardId, Fingerprint>,
    filter: Option<&dyn Fn(&CardId) -> bool>,
) -> Vec<(CardId, f64)> {
    let mut scores: Vec<(CardId, f64)> = candidates
        .iter()
        .filter(|(other, _)| *other != id)
        .filter(|(other, _)| filter.is_none_or(|keep| keep(*other)))
        .map(|(other, fingerprint)| (other.clone(), target.semantic_overlap(fingerprint)))
        .collect();

    scores.sort_by(|(a_id, a), (b_id, b)| b.total_cmp(a).then_with(|| a_id.cmp(b_id)));
    scores
}
