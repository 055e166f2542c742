//! Text fields of a card and the table describing how each is matched.
//!
//! This module defines:
//! - [`TextField`] - the closed set of text-bearing card fields
//! - [`FieldDescriptor`] - how one field is extracted and weighted
//! - [`FieldConfiguration`] - the validated, ordered list of descriptors
//!
//! # Examples
//!
//! ```
//! use cardprint::card::field::{FieldConfiguration, TextField};
//!
//! let fields = FieldConfiguration::default();
//! assert_eq!(fields.title().match_weight, 1.0);
//! assert_eq!(fields.relative_weight(TextField::Body), Some(0.5));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card::types::CardType;
use crate::error::{CardprintError, Result};

/// A text-bearing field of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    /// The card title.
    Title,
    /// Alternate titles, one per line.
    TitleAlternates,
    /// The HTML body.
    Body,
    /// Editorial commentary, HTML.
    Commentary,
    /// Annotation text of references pointing at the card.
    ReferencesInfoInbound,
    /// Annotation text of the card's own non-link references.
    NonLinkReferences,
}

impl TextField {
    /// Every text field, in default configuration order.
    pub const ALL: [TextField; 6] = [
        TextField::Title,
        TextField::TitleAlternates,
        TextField::Body,
        TextField::Commentary,
        TextField::ReferencesInfoInbound,
        TextField::NonLinkReferences,
    ];

    /// Snake-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::TitleAlternates => "title_alternates",
            TextField::Body => "body",
            TextField::Commentary => "commentary",
            TextField::ReferencesInfoInbound => "references_info_inbound",
            TextField::NonLinkReferences => "non_link_references",
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextField {
    type Err = CardprintError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TextField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CardprintError::invalid_argument(format!("unknown text field '{s}'")))
    }
}

fn default_indexed() -> bool {
    true
}

/// How a single text field is extracted, weighted and matched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// The field described.
    pub field: TextField,
    /// Whether the raw value is HTML and needs its tags stripped.
    #[serde(default)]
    pub is_html: bool,
    /// Match weight. Only the ratio to the title's weight matters.
    pub match_weight: f64,
    /// Card types for which this field is computed from the fingerprint
    /// and therefore must not feed back into it.
    #[serde(default)]
    pub derived_for: Vec<CardType>,
    /// Whether search queries match against this field.
    #[serde(default = "default_indexed")]
    pub indexed: bool,
}

impl FieldDescriptor {
    /// Create a plain-text, indexed descriptor.
    pub fn new(field: TextField, match_weight: f64) -> Self {
        FieldDescriptor {
            field,
            is_html: false,
            match_weight,
            derived_for: Vec::new(),
            indexed: true,
        }
    }

    /// Mark the field as holding HTML.
    pub fn html(mut self) -> Self {
        self.is_html = true;
        self
    }

    /// Mark the field as derived for a card type.
    pub fn derived_for(mut self, card_type: CardType) -> Self {
        if !self.derived_for.contains(&card_type) {
            self.derived_for.push(card_type);
        }
        self
    }

    /// Exclude the field from query matching.
    pub fn unindexed(mut self) -> Self {
        self.indexed = false;
        self
    }

    /// Whether the field is derived for cards of `card_type`.
    pub fn is_derived_for(&self, card_type: CardType) -> bool {
        self.derived_for.contains(&card_type)
    }
}

/// Validated, ordered list of field descriptors.
///
/// Invariants checked at construction:
/// - exactly one descriptor for [`TextField::Title`], with a positive weight
/// - every weight is finite and non-negative
/// - no field is described twice
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<serde_json::Value>", into = "Vec<FieldDescriptor>")]
pub struct FieldConfiguration {
    descriptors: Vec<FieldDescriptor>,
    title_index: usize,
}

impl FieldConfiguration {
    /// Validate a descriptor list.
    pub fn new(descriptors: Vec<FieldDescriptor>) -> Result<Self> {
        let mut title_index = None;

        for (i, descriptor) in descriptors.iter().enumerate() {
            if !descriptor.match_weight.is_finite() || descriptor.match_weight < 0.0 {
                return Err(CardprintError::config(format!(
                    "Field '{}' has invalid match weight {}",
                    descriptor.field, descriptor.match_weight
                )));
            }
            if descriptors[..i].iter().any(|d| d.field == descriptor.field) {
                return Err(CardprintError::config(format!(
                    "Field '{}' is configured more than once",
                    descriptor.field
                )));
            }
            if descriptor.field == TextField::Title {
                title_index = Some(i);
            }
        }

        let title_index = title_index
            .ok_or_else(|| CardprintError::config("Field configuration has no title field"))?;
        if descriptors[title_index].match_weight <= 0.0 {
            return Err(CardprintError::config(
                "Title field must have a positive match weight",
            ));
        }

        Ok(FieldConfiguration {
            descriptors,
            title_index,
        })
    }

    /// Descriptors in configuration order.
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// Iterate over the descriptors in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.descriptors.iter()
    }

    /// Descriptor for a field, if configured.
    pub fn get(&self, field: TextField) -> Option<&FieldDescriptor> {
        self.descriptors.iter().find(|d| d.field == field)
    }

    /// The title descriptor.
    pub fn title(&self) -> &FieldDescriptor {
        &self.descriptors[self.title_index]
    }

    /// A field's match weight divided by the title's, if configured.
    pub fn relative_weight(&self, field: TextField) -> Option<f64> {
        self.get(field)
            .map(|d| d.match_weight / self.title().match_weight)
    }

    /// Number of configured fields.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Always false for a validated configuration.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for FieldConfiguration {
    fn default() -> Self {
        FieldConfiguration {
            descriptors: vec![
                FieldDescriptor::new(TextField::Title, 1.0).derived_for(CardType::WorkingNotes),
                FieldDescriptor::new(TextField::TitleAlternates, 0.95),
                FieldDescriptor::new(TextField::Body, 0.5).html(),
                FieldDescriptor::new(TextField::Commentary, 0.01).html(),
                FieldDescriptor::new(TextField::ReferencesInfoInbound, 0.95),
                FieldDescriptor::new(TextField::NonLinkReferences, 0.75),
            ],
            title_index: 0,
        }
    }
}

impl TryFrom<Vec<FieldDescriptor>> for FieldConfiguration {
    type Error = CardprintError;

    fn try_from(descriptors: Vec<FieldDescriptor>) -> Result<Self> {
        FieldConfiguration::new(descriptors)
    }
}

/// Entries that do not describe a known field are skipped with a warning.
impl TryFrom<Vec<serde_json::Value>> for FieldConfiguration {
    type Error = CardprintError;

    fn try_from(entries: Vec<serde_json::Value>) -> Result<Self> {
        let descriptors = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<FieldDescriptor>(entry) {
                Ok(descriptor) => Some(descriptor),
                Err(e) => {
                    log::warn!("Skipping field configuration entry: {e}");
                    None
                }
            })
            .collect();
        FieldConfiguration::new(descriptors)
    }
}

impl From<FieldConfiguration> for Vec<FieldDescriptor> {
    fn from(config: FieldConfiguration) -> Self {
        config.descriptors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let fields = FieldConfiguration::default();

        assert_eq!(fields.len(), 6);
        assert!(fields.get(TextField::Body).unwrap().is_html);
        assert!(
            fields
                .title()
                .is_derived_for(CardType::WorkingNotes)
        );
        assert_eq!(fields.relative_weight(TextField::Commentary), Some(0.01));
        assert_eq!(
            FieldConfiguration::new(fields.descriptors().to_vec()).unwrap(),
            fields
        );
    }

    #[test]
    fn test_relative_weight_uses_title() {
        let fields = FieldConfiguration::new(vec![
            FieldDescriptor::new(TextField::Body, 1.0),
            FieldDescriptor::new(TextField::Title, 2.0),
        ])
        .unwrap();

        assert_eq!(fields.relative_weight(TextField::Title), Some(1.0));
        assert_eq!(fields.relative_weight(TextField::Body), Some(0.5));
        assert_eq!(fields.relative_weight(TextField::Commentary), None);
    }

    #[test]
    fn test_unknown_entries_are_skipped() {
        let fields: FieldConfiguration = serde_json::from_str(
            r#"[
                {"field": "title", "match_weight": 2.0},
                {"field": "tags", "match_weight": 1.0},
                {"field": "body", "match_weight": 1.0, "is_html": true}
            ]"#,
        )
        .unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.relative_weight(TextField::Body), Some(0.5));
        assert!(serde_json::from_str::<FieldConfiguration>(r#"[{"field": "body", "match_weight": 1.0}]"#).is_err());
    }

    #[test]
    fn test_invalid_configurations() {
        assert!(FieldConfiguration::new(vec![FieldDescriptor::new(TextField::Body, 1.0)]).is_err());
        assert!(FieldConfiguration::new(vec![FieldDescriptor::new(TextField::Title, 0.0)]).is_err());
        assert!(
            FieldConfiguration::new(vec![
                FieldDescriptor::new(TextField::Title, 1.0),
                FieldDescriptor::new(TextField::Body, f64::NAN),
            ])
            .is_err()
        );
        assert!(
            FieldConfiguration::new(vec![
                FieldDescriptor::new(TextField::Title, 1.0),
                FieldDescriptor::new(TextField::Title, 1.0),
            ])
            .is_err()
        );
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"[
            {"field": "title", "match_weight": 1.0},
            {"field": "body", "is_html": true, "match_weight": 0.25, "derived_for": ["quote"]}
        ]"#;
        let fields: FieldConfiguration = serde_json::from_str(json).unwrap();

        let body = fields.get(TextField::Body).unwrap();
        assert!(body.indexed);
        assert!(body.is_derived_for(CardType::Quote));

        let bad: std::result::Result<FieldConfiguration, _> =
            serde_json::from_str(r#"[{"field": "body", "match_weight": 1.0}]"#);
        assert!(bad.is_err());
    }
}
