//! Cards and their annotation.
//!
//! - [`types`] - card ids, card types and reference types
//! - [`field`] - text fields and the validated field configuration
//! - [`card`] - the card record and raw field text
//! - [`annotate`] - turning cards into [`ProcessedCard`]s
//! - [`concept`] - the concept map and concept-reference suggestion

pub mod annotate;
#[allow(clippy::module_inception)]
pub mod card;
pub mod concept;
pub mod field;
pub mod types;

pub use annotate::{Annotator, NlpInfo, ProcessedCard, fallback_text_for_card};
pub use card::{Card, CardBuilder, FallbackTextMap, InboundReference, OutboundReference};
pub use concept::{ConceptMap, suggested_concept_references};
pub use field::{FieldConfiguration, FieldDescriptor, TextField};
pub use types::{CardId, CardType, ReferenceType};
