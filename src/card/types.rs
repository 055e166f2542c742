//! Identifiers and closed enumerations shared across the card model.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CardprintError;

/// Identifier of a card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Create a card id.
    pub fn new<S: Into<String>>(id: S) -> Self {
        CardId(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        CardId(id.to_string())
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        CardId(id)
    }
}

impl Borrow<str> for CardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for CardId {
    type Err = CardprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(CardprintError::invalid_argument("card id must not be empty"));
        }
        Ok(CardId::new(s))
    }
}

/// Kind of card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardType {
    /// Regular content card.
    #[default]
    Content,
    /// Heading card that opens a section.
    SectionHead,
    /// Freeform note whose title is synthesized from its content.
    WorkingNotes,
    /// Card defining a concept that other cards can reference.
    Concept,
    /// A book, article or other work.
    Work,
    /// A person.
    Person,
    /// A quotation.
    Quote,
}

impl CardType {
    /// Every card type.
    pub const ALL: [CardType; 7] = [
        CardType::Content,
        CardType::SectionHead,
        CardType::WorkingNotes,
        CardType::Concept,
        CardType::Work,
        CardType::Person,
        CardType::Quote,
    ];

    /// Kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Content => "content",
            CardType::SectionHead => "section-head",
            CardType::WorkingNotes => "working-notes",
            CardType::Concept => "concept",
            CardType::Work => "work",
            CardType::Person => "person",
            CardType::Quote => "quote",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = CardprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardType::ALL
            .into_iter()
            .find(|card_type| card_type.as_str() == s)
            .ok_or_else(|| CardprintError::invalid_argument(format!("unknown card type '{s}'")))
    }
}

/// Kind of reference from one card to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceType {
    /// Inline link in the body.
    Link,
    /// Marks the source as a duplicate of the target.
    DupeOf,
    /// Thanks the target for an idea.
    Acknowledgement,
    /// Cites a work.
    Citation,
    /// Cites a person.
    CitationPerson,
    /// Related reading.
    SeeAlso,
    /// Uses a concept.
    Concept,
    /// Source is an example of the target.
    Example,
    /// Reference proposed by an automated pass and accepted.
    Mined,
}

impl ReferenceType {
    /// Every reference type.
    pub const ALL: [ReferenceType; 9] = [
        ReferenceType::Link,
        ReferenceType::DupeOf,
        ReferenceType::Acknowledgement,
        ReferenceType::Citation,
        ReferenceType::CitationPerson,
        ReferenceType::SeeAlso,
        ReferenceType::Concept,
        ReferenceType::Example,
        ReferenceType::Mined,
    ];

    /// Kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceType::Link => "link",
            ReferenceType::DupeOf => "dupe-of",
            ReferenceType::Acknowledgement => "acknowledgement",
            ReferenceType::Citation => "citation",
            ReferenceType::CitationPerson => "citation-person",
            ReferenceType::SeeAlso => "see-also",
            ReferenceType::Concept => "concept",
            ReferenceType::Example => "example",
            ReferenceType::Mined => "mined",
        }
    }

    /// Whether a blank inbound annotation of this type should be filled
    /// from the referencing card's title.
    pub fn backports_missing_text(&self) -> bool {
        match self {
            ReferenceType::Citation
            | ReferenceType::CitationPerson
            | ReferenceType::Example
            | ReferenceType::Concept => true,
            ReferenceType::Link
            | ReferenceType::DupeOf
            | ReferenceType::Acknowledgement
            | ReferenceType::SeeAlso
            | ReferenceType::Mined => false,
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceType {
    type Err = CardprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferenceType::ALL
            .into_iter()
            .find(|reference_type| reference_type.as_str() == s)
            .ok_or_else(|| {
                CardprintError::invalid_argument(format!("unknown reference type '{s}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_type_round_trips_names() {
        for card_type in CardType::ALL {
            assert_eq!(card_type.as_str().parse::<CardType>().unwrap(), card_type);
        }
        assert!("note".parse::<CardType>().is_err());
        assert_eq!(
            serde_json::to_string(&CardType::WorkingNotes).unwrap(),
            "\"working-notes\""
        );
    }

    #[test]
    fn test_reference_type_serde() {
        let parsed: ReferenceType = serde_json::from_str("\"citation-person\"").unwrap();
        assert_eq!(parsed, ReferenceType::CitationPerson);
        assert!(parsed.backports_missing_text());
        assert!(!ReferenceType::Link.backports_missing_text());
    }

    #[test]
    fn test_card_id() {
        let id: CardId = "abc".parse().unwrap();
        assert_eq!(id, CardId::from("abc"));
        assert_eq!(id.to_string(), "abc");
        assert!("  ".parse::<CardId>().is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
