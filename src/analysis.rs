//! Text analysis for card fields.
//!
//! This module turns raw field text into the representations the rest of the
//! engine works with:
//!
//! ```text
//! field text → runs → phrase rewriting → normalize → stem → ProcessedRun
//! ```
//!
//! - [`normalize`] - lower-casing, dash handling and punctuation stripping
//! - [`stem`] - Porter stemming behind a process-wide memo cache
//! - [`stop`] - English stop words
//! - [`run`] / [`html`] - splitting fields into runs and processing them
//! - [`synonym`] - rewriting concept and synonym aliases
//! - [`ngram`] - n-gram extraction, containment and original-text lookup

pub mod html;
pub mod ngram;
pub mod normalize;
pub mod run;
pub mod stem;
pub mod stop;
pub mod synonym;

pub use ngram::{extract_original_ngram_from_run, ngram_within_other, ngrams};
pub use normalize::normalize;
pub use run::{ProcessedRun, split_runs};
pub use stem::{stem, stem_join};
