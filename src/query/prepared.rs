//! Prepared search queries and card scoring.
//!
//! A raw query is split into filter tokens and words, the words go through
//! the same normalize and stem pipeline as card text, and four families of
//! clauses are built from them:
//!
//! | family      | words                 | weight                  | required |
//! |-------------|-----------------------|-------------------------|----------|
//! | phrase      | the whole query       | `w`                     | yes      |
//! | all words   | every word separately | `w / 2`                 | yes      |
//! | word        | one word              | `w / 8 / n * s(word)`   | no       |
//! | hyphen pair | two hyphenated words  | `w / 4 / n`             | no       |
//!
//! `w` is the field's match weight relative to the title, `n` the number of
//! query words and `s(word) = 0.5 + 0.5 * min(len, 8) / 8`. The all-words and
//! word families only exist for queries of more than one word. Every clause
//! is repeated for each indexed field.
//!
//! A card scores as well as its best field: the weight satisfied in that
//! field over the total weight of a field with `w = 1`. Satisfying every
//! clause in the title scores 1.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::analysis::ngram::ngram_within_other;
use crate::analysis::normalize::normalize;
use crate::analysis::run::ProcessedRun;
use crate::analysis::stem::{stem, stem_join};
use crate::card::annotate::ProcessedCard;
use crate::card::field::{FieldConfiguration, TextField};
use crate::card::types::CardId;
use crate::query::filter::extract_filters_from_query;

/// Characters at which a word-clause weight stops growing.
const WORD_LENGTH_CAP: usize = 8;

/// Which family a clause belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    /// The whole query as one phrase.
    Phrase,
    /// Every query word, anywhere in the field.
    AllWords,
    /// A single query word.
    Word,
    /// Two words that were hyphenated in the query.
    HyphenPair,
}

/// A weighted match clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryClause {
    /// Family the clause belongs to.
    pub kind: ClauseKind,
    /// Stemmed phrases that must all occur for the clause to be satisfied.
    pub words: Vec<String>,
    /// Clause weight, already scaled for its field.
    pub weight: f64,
    /// Whether the clause must be satisfied in some field for a full match.
    pub required: bool,
}

impl QueryClause {
    fn scaled(&self, factor: f64) -> Self {
        QueryClause {
            weight: self.weight * factor,
            ..self.clone()
        }
    }

    /// Whether every clause word occurs as whole words in some run.
    pub fn is_satisfied_by(&self, runs: &[ProcessedRun]) -> bool {
        self.words.iter().all(|word| {
            runs.iter()
                .any(|run| ngram_within_other(word, run.stemmed()))
        })
    }
}

/// The clauses evaluated against one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldClauses {
    /// Field matched.
    pub field: TextField,
    /// Clauses in the same order for every field.
    pub clauses: Vec<QueryClause>,
}

/// Outcome of scoring one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMatch {
    /// Card scored.
    pub id: CardId,
    /// Satisfied weight over total weight, in `[0, 1]`.
    pub score: f64,
    /// Whether every required clause was satisfied in some field.
    pub full_match: bool,
}

/// A parsed, field-scaled search query.
///
/// # Example
///
/// ```
/// use cardprint::card::FieldConfiguration;
/// use cardprint::query::PreparedQuery;
///
/// let query = PreparedQuery::new("filter:work running dogs", &FieldConfiguration::default());
/// assert_eq!(query.words(), ["run", "dog"]);
/// assert_eq!(query.filters(), ["work"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedQuery {
    raw: String,
    text: String,
    words: Vec<String>,
    filters: Vec<String>,
    fields: Vec<FieldClauses>,
    /// Total clause weight of a field with match weight 1.
    full_weight: f64,
}

impl PreparedQuery {
    /// Parse a raw query against a field configuration.
    ///
    /// Only indexed fields with a positive match weight get clauses.
    pub fn new(raw: &str, fields: &FieldConfiguration) -> Self {
        let (text, filters) = extract_filters_from_query(raw);
        let normalized = normalize(&text);
        let words: Vec<String> = normalized.iter().map(|word| stem(word)).collect();

        let base = base_clauses(&text, &normalized, &words);
        let full_weight = base.iter().map(|clause| clause.weight).sum();
        let fields = if base.is_empty() {
            Vec::new()
        } else {
            fields
                .iter()
                .filter(|descriptor| descriptor.indexed)
                .filter_map(|descriptor| {
                    let factor = fields.relative_weight(descriptor.field)?;
                    (factor > 0.0).then(|| FieldClauses {
                        field: descriptor.field,
                        clauses: base.iter().map(|clause| clause.scaled(factor)).collect(),
                    })
                })
                .collect()
        };

        log::trace!(
            "Prepared query {:?}: {} words, {} filters, {} fields",
            raw,
            words.len(),
            filters.len(),
            fields.len()
        );

        PreparedQuery {
            raw: raw.to_string(),
            text,
            words,
            filters,
            fields,
            full_weight,
        }
    }

    /// The query as given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The query with filter tokens removed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stemmed query words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Filter names in query order.
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Per-field clauses.
    pub fn field_clauses(&self) -> &[FieldClauses] {
        &self.fields
    }

    /// Clauses for one field.
    pub fn clauses_for(&self, field: TextField) -> &[QueryClause] {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.clauses.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the query has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Score a card: `(best field score, full match)`.
    ///
    /// A field scores its satisfied clause weight over the total weight of
    /// a title-weighted field, so loose matches spread over several fields
    /// never outscore the whole query matched in the title. A full match
    /// needs every required clause satisfied in some field, not
    /// necessarily the same one.
    ///
    /// An empty query, or a card without annotation, scores `(0.0, false)`.
    pub fn card_score(&self, card: &ProcessedCard) -> (f64, bool) {
        let Some(first) = self.fields.first() else {
            return (0.0, false);
        };
        if self.full_weight <= 0.0 {
            return (0.0, false);
        }

        let mut required_met: Vec<bool> = first.clauses.iter().map(|c| !c.required).collect();
        let mut best: f64 = 0.0;

        for field in &self.fields {
            let runs = card.runs(field.field);
            let mut satisfied = 0.0;
            for (i, clause) in field.clauses.iter().enumerate() {
                if clause.is_satisfied_by(runs) {
                    satisfied += clause.weight;
                    required_met[i] = true;
                }
            }
            best = best.max(satisfied / self.full_weight);
        }

        (best.clamp(0.0, 1.0), required_met.iter().all(|met| *met))
    }

    /// Score every card and keep those with a non-zero score, full matches
    /// first, then by descending score, then by id.
    pub fn rank<'a, I>(&self, cards: I) -> Vec<QueryMatch>
    where
        I: IntoIterator<Item = &'a ProcessedCard>,
    {
        let mut matches: Vec<QueryMatch> = cards
            .into_iter()
            .filter_map(|card| {
                let (score, full_match) = self.card_score(card);
                (score > 0.0).then(|| QueryMatch {
                    id: card.id().clone(),
                    score,
                    full_match,
                })
            })
            .collect();

        matches.sort_by(|a, b| match b.full_match.cmp(&a.full_match) {
            Ordering::Equal => b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)),
            other => other,
        });
        matches
    }
}

/// Clauses for a field of weight 1.
fn base_clauses(text: &str, normalized: &[String], words: &[String]) -> Vec<QueryClause> {
    let n = words.len();
    if n == 0 {
        return Vec::new();
    }

    let phrase = words.join(" ");
    let mut clauses = vec![QueryClause {
        kind: ClauseKind::Phrase,
        words: vec![phrase.clone()],
        weight: 1.0,
        required: true,
    }];

    if n > 1 {
        clauses.push(QueryClause {
            kind: ClauseKind::AllWords,
            words: words.to_vec(),
            weight: 0.5,
            required: true,
        });
        for (word, original) in words.iter().zip(normalized) {
            let chars = original.chars().count().min(WORD_LENGTH_CAP) as f64;
            let specificity = 0.5 + 0.5 * chars / WORD_LENGTH_CAP as f64;
            clauses.push(QueryClause {
                kind: ClauseKind::Word,
                words: vec![word.clone()],
                weight: 1.0 / 8.0 / n as f64 * specificity,
                required: false,
            });
        }
    }

    for pair in hyphen_pairs(text) {
        clauses.push(QueryClause {
            kind: ClauseKind::HyphenPair,
            words: vec![pair],
            weight: 1.0 / 4.0 / n as f64,
            required: false,
        });
    }

    clauses
}

/// Stemmed adjacent word pairs across every hyphen of every hyphenated
/// token.
fn hyphen_pairs(text: &str) -> Vec<String> {
    let mut pairs = Vec::new();
    for token in text.split_whitespace().filter(|t| t.contains('-')) {
        let parts = normalize(token);
        for pair in parts.windows(2) {
            let bigram = stem_join(pair);
            if !pairs.contains(&bigram) {
                pairs.push(bigram);
            }
        }
    }
    pairs
}
