//! Configuration for fingerprint generation.

use serde::{Deserialize, Serialize};

use crate::error::{CardprintError, Result};

/// Longest n-gram counted by default.
pub const DEFAULT_MAX_NGRAM_SIZE: usize = 3;

/// Configuration for a [`FingerprintGenerator`](crate::fingerprint::generator::FingerprintGenerator).
///
/// Missing keys take their default when deserialized.
///
/// # Example
///
/// ```
/// use cardprint::fingerprint::config::FingerprintConfig;
///
/// let config: FingerprintConfig = serde_json::from_str(r#"{"max_terms": 20}"#).unwrap();
/// assert_eq!(config.max_ngram_size, 3);
/// assert_eq!(config.max_terms, Some(20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    /// Longest n-gram, in words, that becomes a term.
    pub max_ngram_size: usize,

    /// Keep at most this many terms per fingerprint. `None` keeps all.
    pub max_terms: Option<usize>,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        FingerprintConfig {
            max_ngram_size: DEFAULT_MAX_NGRAM_SIZE,
            max_terms: None,
        }
    }
}

impl FingerprintConfig {
    /// Set the longest n-gram size.
    pub fn with_max_ngram_size(mut self, size: usize) -> Self {
        self.max_ngram_size = size;
        self
    }

    /// Cap the number of terms per fingerprint.
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = Some(max_terms);
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_ngram_size == 0 {
            return Err(CardprintError::config("max_ngram_size must be at least 1"));
        }
        if self.max_terms == Some(0) {
            return Err(CardprintError::config("max_terms must be at least 1"));
        }
        Ok(())
    }
}
