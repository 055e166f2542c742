//! Stemming with a process-wide memo cache.
//!
//! Stemming is pure and the same handful of words repeats across every card
//! in a corpus, so results are memoized. The cache is an explicit
//! [`CachingStemmer`] object; [`global_stemmer`] exposes the shared instance
//! that backs the free [`stem`] and [`stem_join`] functions.

use std::sync::LazyLock;

use ahash::AHashMap;
use parking_lot::RwLock;

pub mod porter;

pub use porter::PorterStemmer;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// A stemmer that memoizes the results of an inner stemmer.
///
/// The cache is append-only and keyed by the exact input word. Concurrent
/// callers may race to fill the same key; both compute the same value, so
/// the last write is as good as the first.
pub struct CachingStemmer {
    inner: Box<dyn Stemmer>,
    cache: RwLock<AHashMap<String, String>>,
}

impl std::fmt::Debug for CachingStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingStemmer")
            .field("inner", &self.inner.name())
            .field("cached_words", &self.len())
            .finish()
    }
}

impl CachingStemmer {
    /// Wrap a stemmer with a memo cache.
    pub fn new(inner: Box<dyn Stemmer>) -> Self {
        CachingStemmer {
            inner,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Create a caching Porter stemmer.
    pub fn porter() -> Self {
        Self::new(Box::new(PorterStemmer::new()))
    }

    /// Number of memoized words.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Whether `word` has already been stemmed through this cache.
    pub fn contains(&self, word: &str) -> bool {
        self.cache.read().contains_key(word)
    }

    /// Drop every memoized word.
    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

impl Default for CachingStemmer {
    fn default() -> Self {
        Self::porter()
    }
}

impl Stemmer for CachingStemmer {
    fn stem(&self, word: &str) -> String {
        if let Some(stemmed) = self.cache.read().get(word) {
            return stemmed.clone();
        }

        let stemmed = self.inner.stem(word);
        self.cache
            .write()
            .insert(word.to_string(), stemmed.clone());
        stemmed
    }

    fn name(&self) -> &'static str {
        "caching"
    }
}

static GLOBAL_STEMMER: LazyLock<CachingStemmer> = LazyLock::new(CachingStemmer::porter);

/// The process-wide caching Porter stemmer.
pub fn global_stemmer() -> &'static CachingStemmer {
    &GLOBAL_STEMMER
}

/// Stem a single normalized word with the process-wide stemmer.
pub fn stem(word: &str) -> String {
    GLOBAL_STEMMER.stem(word)
}

/// Stem each word and re-join with single spaces.
///
/// The input is expected to be normalized already.
pub fn stem_join<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|word| stem(word.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingStemmer {
        calls: Arc<AtomicUsize>,
    }

    impl Stemmer for CountingStemmer {
        fn stem(&self, word: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            PorterStemmer::new().stem(word)
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[test]
    fn test_cache_memoizes_inner_stemmer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stemmer = CachingStemmer::new(Box::new(CountingStemmer {
            calls: calls.clone(),
        }));

        assert!(stemmer.is_empty());
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("cats"), "cat");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(stemmer.len(), 2);
        assert!(stemmer.contains("running"));

        stemmer.clear();
        assert!(stemmer.is_empty());
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_global_stemmer() {
        assert_eq!(stem("organizations"), stem("organizations"));
        assert!(global_stemmer().contains("organizations"));
    }

    #[test]
    fn test_stem_join() {
        assert_eq!(stem_join(&["running", "cats"]), "run cat");
        assert_eq!(stem_join::<&str>(&[]), "");
    }
}
