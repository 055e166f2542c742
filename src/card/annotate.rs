//! Card annotation: turning a card's text fields into processed runs.
//!
//! ```text
//! field text → split runs (HTML aware) → rewrite phrases → ProcessedRun
//! ```
//!
//! Fields that are derived for the card's type get an empty run list so a
//! value computed from the fingerprint never feeds back into it.
//!
//! Phrase rewriting happens before a run is processed, so a run's
//! `original` text is the rewritten one. Every spelling of a concept or
//! synonym then renders as its canonical phrase.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::html::split_html_runs;
use crate::analysis::run::{ProcessedRun, split_runs};
use crate::analysis::synonym::{PhraseRewriter, SynonymMap, synonym_pairs};
use crate::card::card::{Card, FallbackTextMap};
use crate::card::concept::ConceptMap;
use crate::card::field::{FieldConfiguration, FieldDescriptor, TextField};
use crate::card::types::{CardId, ReferenceType};
use crate::error::Result;

/// Processed runs of every annotated field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NlpInfo {
    fields: BTreeMap<TextField, Vec<ProcessedRun>>,
}

impl NlpInfo {
    /// Runs of a field in document order; empty when the field is absent.
    pub fn runs(&self, field: TextField) -> &[ProcessedRun] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Annotated fields and their runs.
    pub fn iter(&self) -> impl Iterator<Item = (TextField, &[ProcessedRun])> {
        self.fields
            .iter()
            .map(|(field, runs)| (*field, runs.as_slice()))
    }

    /// Whether a field was annotated, even if it came out empty.
    pub fn contains(&self, field: TextField) -> bool {
        self.fields.contains_key(&field)
    }

    fn insert(&mut self, field: TextField, runs: Vec<ProcessedRun>) {
        self.fields.insert(field, runs);
    }
}

/// A card together with everything needed to annotate it.
#[derive(Clone, Debug)]
pub struct ProcessedCard {
    card: Card,
    nlp: Option<NlpInfo>,
    fallback_text: FallbackTextMap,
    synonyms: Arc<SynonymMap>,
}

impl ProcessedCard {
    /// The underlying card.
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// The card id.
    pub fn id(&self) -> &CardId {
        &self.card.id
    }

    /// Annotation result, if annotation has run.
    pub fn nlp(&self) -> Option<&NlpInfo> {
        self.nlp.as_ref()
    }

    /// Whether annotation has already run.
    pub fn is_annotated(&self) -> bool {
        self.nlp.is_some()
    }

    /// Runs of a field; empty for unannotated cards and absent fields.
    pub fn runs(&self, field: TextField) -> &[ProcessedRun] {
        self.nlp.as_ref().map(|nlp| nlp.runs(field)).unwrap_or(&[])
    }

    /// Fallback text used for inbound references.
    pub fn fallback_text(&self) -> &FallbackTextMap {
        &self.fallback_text
    }

    /// Synonym map snapshot used during annotation.
    pub fn synonyms(&self) -> &SynonymMap {
        &self.synonyms
    }
}

/// Annotates cards against a fixed field configuration, concept map and
/// synonym map.
///
/// The phrase rewriter is compiled once at construction; annotation itself
/// is a pure function of the card and its fallback text.
#[derive(Debug)]
pub struct Annotator {
    fields: FieldConfiguration,
    rewriter: PhraseRewriter,
    synonyms: Arc<SynonymMap>,
}

impl Annotator {
    /// Create an annotator.
    ///
    /// Synonyms are rewritten to their canonical key and concept aliases to
    /// their concept's canonical phrase. A concept alias wins over a
    /// synonym with the same text.
    pub fn new(
        fields: FieldConfiguration,
        concepts: &ConceptMap,
        synonyms: SynonymMap,
    ) -> Result<Self> {
        let mut pairs = synonym_pairs(&synonyms);
        pairs.extend(concepts.alias_pairs());
        let rewriter = PhraseRewriter::new(pairs)?;

        Ok(Annotator {
            fields,
            rewriter,
            synonyms: Arc::new(synonyms),
        })
    }

    /// The field configuration.
    pub fn fields(&self) -> &FieldConfiguration {
        &self.fields
    }

    /// Wrap a card without annotating it yet.
    pub fn process(&self, card: Card, fallback_text: FallbackTextMap) -> ProcessedCard {
        ProcessedCard {
            card,
            nlp: None,
            fallback_text,
            synonyms: Arc::clone(&self.synonyms),
        }
    }

    /// Wrap and annotate a card.
    pub fn annotate(&self, card: Card, fallback_text: FallbackTextMap) -> ProcessedCard {
        let mut processed = self.process(card, fallback_text);
        self.ensure_annotated(&mut processed);
        processed
    }

    /// Annotate a processed card unless it already is.
    pub fn ensure_annotated(&self, card: &mut ProcessedCard) {
        if card.is_annotated() {
            return;
        }
        card.nlp = Some(self.nlp_info(&card.card, &card.fallback_text));
    }

    /// Annotate a batch of cards in parallel. Output order matches input.
    pub fn annotate_all(
        &self,
        cards: Vec<Card>,
        fallback_by_card: &HashMap<CardId, FallbackTextMap>,
    ) -> Vec<ProcessedCard> {
        log::debug!("Annotating {} cards", cards.len());

        cards
            .into_par_iter()
            .map(|card| {
                let fallback = fallback_by_card.get(&card.id).cloned().unwrap_or_default();
                self.annotate(card, fallback)
            })
            .collect()
    }

    fn nlp_info(&self, card: &Card, fallback: &FallbackTextMap) -> NlpInfo {
        let mut nlp = NlpInfo::default();
        for descriptor in self.fields.iter() {
            let runs = if descriptor.is_derived_for(card.card_type) {
                Vec::new()
            } else {
                self.field_runs(card, descriptor, fallback)
            };
            nlp.insert(descriptor.field, runs);
        }
        nlp
    }

    fn field_runs(
        &self,
        card: &Card,
        descriptor: &FieldDescriptor,
        fallback: &FallbackTextMap,
    ) -> Vec<ProcessedRun> {
        let text = card.field_text(descriptor.field, fallback);
        let runs = if descriptor.is_html {
            split_html_runs(&text)
        } else {
            split_runs(text.as_str())
        };

        runs.iter()
            .map(|run| ProcessedRun::new(&self.rewriter.rewrite(run)))
            .collect()
    }
}

/// Fallback text for a card's unannotated inbound references.
///
/// For every reference type that takes its missing text from the
/// referencing card, the titles of those referencing cards are collected,
/// one per line, in reference order. Sources that `lookup` cannot resolve
/// or that have no title are skipped.
pub fn fallback_text_for_card<'a, F>(card: &Card, lookup: F) -> FallbackTextMap
where
    F: Fn(&CardId) -> Option<&'a Card>,
{
    let mut titles: BTreeMap<ReferenceType, Vec<&'a str>> = BTreeMap::new();

    for reference in &card.references_inbound {
        if !reference.text.trim().is_empty() || !reference.reference_type.backports_missing_text()
        {
            continue;
        }
        let Some(source) = lookup(&reference.source) else {
            continue;
        };
        let title = source.title.trim();
        if title.is_empty() {
            continue;
        }
        let entry = titles.entry(reference.reference_type).or_default();
        if !entry.contains(&title) {
            entry.push(title);
        }
    }

    titles
        .into_iter()
        .map(|(reference_type, titles)| (reference_type, titles.join("\n")))
        .collect()
}
