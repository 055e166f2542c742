//! # cardprint
//!
//! Semantic fingerprints and search for knowledge cards.
//!
//! ## Features
//!
//! - Normalization, Porter stemming with a shared memo cache, stop words
//! - Run splitting for plain-text and HTML fields
//! - Concept and synonym phrase rewriting during annotation
//! - Per-card fingerprints weighted by field, n-gram length and IDF
//! - Related cards by fingerprint overlap and synthesized titles
//! - Prepared search queries with weighted, field-scaled clauses
//!
//! ## Example
//!
//! ```
//! use cardprint::prelude::*;
//!
//! let fields = FieldConfiguration::default();
//! let annotator = Annotator::new(fields.clone(), &ConceptMap::new(), SynonymMap::new()).unwrap();
//! let cards: Vec<ProcessedCard> = [("a", "Graph theory"), ("b", "Baking bread")]
//!     .into_iter()
//!     .map(|(id, title)| annotator.annotate(Card::builder(id).title(title).build(), FallbackTextMap::new()))
//!     .collect();
//!
//! let query = PreparedQuery::new("graph", &fields);
//! let hits = query.rank(&cards);
//! assert_eq!(hits[0].id, CardId::from("a"));
//!
//! let generator = FingerprintGenerator::new(cards, fields, FingerprintConfig::default()).unwrap();
//! let related = generator.closest_overlapping_items(&"a".into(), None).unwrap();
//! assert_eq!(related, vec![(CardId::from("b"), 0.0)]);
//! ```

pub mod analysis;
pub mod card;
pub mod cli;
pub mod error;
pub mod fingerprint;
pub mod query;

pub mod prelude {
    pub use crate::analysis::synonym::{PhraseRewriter, SynonymMap};
    pub use crate::analysis::{
        ProcessedRun, extract_original_ngram_from_run, ngram_within_other, ngrams, normalize,
        split_runs, stem, stem_join,
    };
    pub use crate::card::{
        Annotator, Card, CardId, CardType, ConceptMap, FallbackTextMap, FieldConfiguration,
        FieldDescriptor, NlpInfo, ProcessedCard, ReferenceType, TextField,
        suggested_concept_references,
    };
    pub use crate::error::{CardprintError, Result};
    pub use crate::fingerprint::{
        Fingerprint, FingerprintConfig, FingerprintGenerator, closest_overlapping,
    };
    pub use crate::query::{PreparedQuery, QueryMatch, extract_filters_from_query};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
