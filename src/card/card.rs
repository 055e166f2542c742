//! Card records and their text fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::card::field::TextField;
use crate::card::types::{CardId, CardType, ReferenceType};

/// Substitute annotation text per reference type, used when an inbound
/// reference carries no annotation of its own.
pub type FallbackTextMap = BTreeMap<ReferenceType, String>;

/// A reference from this card to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundReference {
    /// The referenced card.
    pub target: CardId,
    /// Kind of reference.
    pub reference_type: ReferenceType,
    /// Annotation text, possibly blank.
    #[serde(default)]
    pub text: String,
}

/// A reference from another card to this one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundReference {
    /// The referencing card.
    pub source: CardId,
    /// Kind of reference.
    pub reference_type: ReferenceType,
    /// Annotation text, possibly blank.
    #[serde(default)]
    pub text: String,
}

/// A card record as handed in by the host application.
///
/// Every field except the id is optional in serialized form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Card identifier.
    pub id: CardId,
    /// Kind of card.
    #[serde(default)]
    pub card_type: CardType,
    /// Plain-text title.
    #[serde(default)]
    pub title: String,
    /// Alternate titles.
    #[serde(default)]
    pub title_alternates: Vec<String>,
    /// HTML body.
    #[serde(default)]
    pub body: String,
    /// HTML commentary.
    #[serde(default)]
    pub commentary: String,
    /// References this card makes.
    #[serde(default)]
    pub references: Vec<OutboundReference>,
    /// References other cards make to this card.
    #[serde(default)]
    pub references_inbound: Vec<InboundReference>,
    /// Structured values that replace a field's built-in text.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_fields: BTreeMap<TextField, Value>,
}

impl Card {
    /// Create an empty content card.
    pub fn new<I: Into<CardId>>(id: I) -> Self {
        Card {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Start building a card.
    pub fn builder<I: Into<CardId>>(id: I) -> CardBuilder {
        CardBuilder::new(id)
    }

    /// Raw text of a field, before run splitting.
    ///
    /// Multi-valued fields put one value per line so each value becomes its
    /// own run. Inbound references without an annotation contribute
    /// `fallback[reference_type]` once per reference type.
    pub fn field_text(&self, field: TextField, fallback: &FallbackTextMap) -> String {
        if let Some(value) = self.extra_fields.get(&field) {
            return flatten_field_value(value);
        }

        match field {
            TextField::Title => self.title.clone(),
            TextField::TitleAlternates => self.title_alternates.join("\n"),
            TextField::Body => self.body.clone(),
            TextField::Commentary => self.commentary.clone(),
            TextField::ReferencesInfoInbound => self.inbound_reference_text(fallback),
            TextField::NonLinkReferences => self
                .references
                .iter()
                .filter(|r| r.reference_type != ReferenceType::Link && !r.text.trim().is_empty())
                .map(|r| r.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn inbound_reference_text(&self, fallback: &FallbackTextMap) -> String {
        let mut lines: Vec<&str> = Vec::new();
        let mut used_fallback: Vec<ReferenceType> = Vec::new();

        for reference in &self.references_inbound {
            if !reference.text.trim().is_empty() {
                lines.push(&reference.text);
                continue;
            }
            if used_fallback.contains(&reference.reference_type) {
                continue;
            }
            if let Some(text) = fallback.get(&reference.reference_type) {
                used_fallback.push(reference.reference_type);
                lines.push(text);
            }
        }

        lines.join("\n")
    }

    /// Whether the card references `target` with any outbound reference.
    pub fn references_card(&self, target: &CardId) -> bool {
        self.references.iter().any(|r| &r.target == target)
    }
}

/// Flatten a structured field value into text.
///
/// Strings are kept, numbers and booleans are printed, nulls vanish, and
/// arrays and objects become their leaf values joined by single spaces.
/// Object keys are not included.
///
/// # Examples
///
/// ```
/// use cardprint::card::card::flatten_field_value;
/// use serde_json::json;
///
/// let value = json!({"a": ["one", 2], "b": {"c": true, "d": null}});
/// assert_eq!(flatten_field_value(&value), "one 2 true");
/// ```
pub fn flatten_field_value(value: &Value) -> String {
    let mut leaves = Vec::new();
    collect_leaves(value, &mut leaves);
    leaves.join(" ")
}

fn collect_leaves(value: &Value, leaves: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(s) => {
            if !s.is_empty() {
                leaves.push(s.clone());
            }
        }
        Value::Bool(b) => leaves.push(b.to_string()),
        Value::Number(n) => leaves.push(n.to_string()),
        Value::Array(items) => items.iter().for_each(|item| collect_leaves(item, leaves)),
        Value::Object(map) => map.values().for_each(|item| collect_leaves(item, leaves)),
    }
}

/// A builder for constructing cards.
#[derive(Debug)]
pub struct CardBuilder {
    card: Card,
}

impl CardBuilder {
    /// Create a builder for an empty content card.
    pub fn new<I: Into<CardId>>(id: I) -> Self {
        CardBuilder {
            card: Card::new(id),
        }
    }

    /// Set the card type.
    pub fn card_type(mut self, card_type: CardType) -> Self {
        self.card.card_type = card_type;
        self
    }

    /// Set the title.
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.card.title = title.into();
        self
    }

    /// Add an alternate title.
    pub fn title_alternate<S: Into<String>>(mut self, alternate: S) -> Self {
        self.card.title_alternates.push(alternate.into());
        self
    }

    /// Set the HTML body.
    pub fn body<S: Into<String>>(mut self, body: S) -> Self {
        self.card.body = body.into();
        self
    }

    /// Set the HTML commentary.
    pub fn commentary<S: Into<String>>(mut self, commentary: S) -> Self {
        self.card.commentary = commentary.into();
        self
    }

    /// Add an outbound reference.
    pub fn reference<I: Into<CardId>, S: Into<String>>(
        mut self,
        target: I,
        reference_type: ReferenceType,
        text: S,
    ) -> Self {
        self.card.references.push(OutboundReference {
            target: target.into(),
            reference_type,
            text: text.into(),
        });
        self
    }

    /// Add an inbound reference.
    pub fn inbound_reference<I: Into<CardId>, S: Into<String>>(
        mut self,
        source: I,
        reference_type: ReferenceType,
        text: S,
    ) -> Self {
        self.card.references_inbound.push(InboundReference {
            source: source.into(),
            reference_type,
            text: text.into(),
        });
        self
    }

    /// Replace a field's built-in text with a structured value.
    pub fn extra_field(mut self, field: TextField, value: Value) -> Self {
        self.card.extra_fields.insert(field, value);
        self
    }

    /// Build the card.
    pub fn build(self) -> Card {
        self.card
    }
}
