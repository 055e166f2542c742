//! Card fingerprints.
//!
//! A fingerprint is a ranked list of a card's most distinctive stemmed
//! n-grams. Term frequency is weighted by field and discounted for longer
//! n-grams, then multiplied by the smoothed inverse document frequency of
//! the term across the generator's cards.
//!
//! - [`config`] - n-gram size and term cap
//! - [`corpus`] - document frequencies and IDF
//! - [`fingerprint`] - the ranked value type and overlap
//! - [`generator`] - building, caching and ranking fingerprints
//! - [`pretty`] - rendering terms as readable phrases

pub mod config;
pub mod corpus;
#[allow(clippy::module_inception)]
pub mod fingerprint;
pub mod generator;
pub mod pretty;

pub use config::FingerprintConfig;
pub use corpus::CorpusStats;
pub use fingerprint::{Fingerprint, FingerprintItem};
pub use generator::{FingerprintGenerator, closest_overlapping};
