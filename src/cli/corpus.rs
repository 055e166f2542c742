//! Loading a card corpus file for the CLI.
//!
//! A corpus file is a JSON object:
//!
//! ```json
//! {
//!   "cards": [{"id": "a", "title": "Graph theory", "body": "<p>...</p>"}],
//!   "synonyms": {"graph": ["network"]},
//!   "fallback_text": {"a": {"citation": "A cited work"}},
//!   "fields": [{"field": "title", "match_weight": 1.0}],
//!   "fingerprint": {"max_terms": 50}
//! }
//! ```
//!
//! Every key is optional. Concepts come from the concept cards.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::analysis::synonym::SynonymMap;
use crate::card::annotate::{Annotator, fallback_text_for_card};
use crate::card::card::{Card, FallbackTextMap};
use crate::card::concept::ConceptMap;
use crate::card::field::FieldConfiguration;
use crate::card::types::CardId;
use crate::error::Result;
use crate::fingerprint::config::FingerprintConfig;
use crate::fingerprint::generator::FingerprintGenerator;

/// Contents of a corpus file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusFile {
    /// Cards.
    pub cards: Vec<Card>,
    /// Synonyms keyed by canonical phrase.
    pub synonyms: SynonymMap,
    /// Explicit fallback text per card.
    pub fallback_text: HashMap<CardId, FallbackTextMap>,
    /// Field configuration; the default table when absent.
    pub fields: Option<FieldConfiguration>,
    /// Fingerprint configuration.
    pub fingerprint: FingerprintConfig,
}

impl CorpusFile {
    /// Read a corpus file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let corpus: CorpusFile = serde_json::from_str(&content)
            .with_context(|| format!("Invalid corpus file {}", path.display()))?;
        log::info!(
            "Loaded {} cards from {}",
            corpus.cards.len(),
            path.display()
        );
        Ok(corpus)
    }

    /// Annotate every card and build the fingerprint generator.
    ///
    /// Fallback text derived from referencing cards' titles fills in any
    /// reference type the file does not give explicitly.
    pub fn build(self) -> Result<Corpus> {
        let fields = self.fields.unwrap_or_default();
        let concepts = ConceptMap::from_cards(&self.cards);
        let annotator = Annotator::new(fields.clone(), &concepts, self.synonyms)?;

        let by_id: HashMap<&CardId, &Card> = self.cards.iter().map(|c| (&c.id, c)).collect();
        let mut fallback_by_card: HashMap<CardId, FallbackTextMap> = HashMap::new();
        for card in &self.cards {
            let mut fallback = fallback_text_for_card(card, |id| by_id.get(id).copied());
            if let Some(explicit) = self.fallback_text.get(&card.id) {
                fallback.extend(explicit.iter().map(|(k, v)| (*k, v.clone())));
            }
            if !fallback.is_empty() {
                fallback_by_card.insert(card.id.clone(), fallback);
            }
        }

        let processed = annotator.annotate_all(self.cards, &fallback_by_card);
        let generator = FingerprintGenerator::new(processed, fields, self.fingerprint)?;

        Ok(Corpus {
            concepts,
            generator,
        })
    }
}

/// An annotated corpus ready for queries.
#[derive(Debug)]
pub struct Corpus {
    /// Concept phrases from the concept cards.
    pub concepts: ConceptMap,
    /// Fingerprint generator over every card.
    pub generator: FingerprintGenerator,
}

impl Corpus {
    /// Load and build a corpus file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        CorpusFile::load(path)?.build()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::card::field::TextField;
    use crate::card::types::ReferenceType;
    use crate::error::CardprintError;

    const CORPUS: &str = r#"{
        "cards": [
            {"id": "w", "card_type": "work", "title": "Gödel, Escher, Bach"},
            {"id": "a", "title": "Strange loops",
             "references_inbound": [
                {"source": "w", "reference_type": "citation"},
                {"source": "w", "reference_type": "example"}
             ]},
            {"id": "c", "card_type": "concept", "title": "Recursion", "title_alternates": ["self reference"]}
        ],
        "fallback_text": {"a": {"example": "an example"}},
        "fingerprint": {"max_terms": 10}
    }"#;

    #[test]
    fn test_load_and_build() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CORPUS.as_bytes()).unwrap();

        let corpus = Corpus::open(file.path()).unwrap();
        assert_eq!(corpus.generator.len(), 3);
        assert_eq!(corpus.generator.config().max_terms, Some(10));
        assert_eq!(corpus.concepts.get("self-reference"), Some(&CardId::from("c")));

        let card = corpus.generator.card(&CardId::from("a")).unwrap();
        assert_eq!(
            card.fallback_text().get(&ReferenceType::Citation).map(String::as_str),
            Some("Gödel, Escher, Bach")
        );
        assert_eq!(
            card.fallback_text().get(&ReferenceType::Example).map(String::as_str),
            Some("an example")
        );
        assert_eq!(card.runs(TextField::ReferencesInfoInbound).len(), 2);
    }

    #[test]
    fn test_empty_corpus_file() {
        let corpus: CorpusFile = serde_json::from_str("{}").unwrap();
        assert!(corpus.cards.is_empty());
        assert!(corpus.build().unwrap().generator.is_empty());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Corpus::open("/nonexistent/corpus.json"),
            Err(CardprintError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_file_names_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"cards\": 3}").unwrap();

        let error = Corpus::open(file.path()).unwrap_err();
        assert!(matches!(error, CardprintError::Anyhow(_)));
        assert!(error.to_string().contains("Invalid corpus file"));
    }
}
