//! Porter stemming algorithm implementation.
//!
//! The Porter stemmer applies a series of rewrite rules in five steps:
//! 1. Plurals, -ed/-ing suffixes and terminal y
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! Within a step only the first suffix that matches is considered; if its
//! measure condition fails the word passes through the step unchanged.
//!
//! # Examples
//!
//! ```
//! use cardprint::analysis::stem::Stemmer;
//! use cardprint::analysis::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::stem::Stemmer;

/// Porter stemming algorithm implementation.
///
/// Only ASCII words are stemmed. Anything else (accented words, numbers
/// with non-ASCII digits, CJK text) is returned lower-cased but otherwise
/// untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    /// Check if the byte at `pos` is a consonant in the Porter sense.
    fn is_consonant(word: &[u8], pos: usize) -> bool {
        match word[pos] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => pos == 0 || !Self::is_consonant(word, pos - 1),
            _ => true,
        }
    }

    /// Calculate the measure of a word (number of VC patterns).
    fn measure(word: &[u8]) -> usize {
        let n = word.len();
        let mut m = 0;
        let mut i = 0;

        // Skip initial consonants
        while i < n && Self::is_consonant(word, i) {
            i += 1;
        }

        while i < n {
            while i < n && !Self::is_consonant(word, i) {
                i += 1;
            }
            if i >= n {
                break;
            }

            m += 1;

            while i < n && Self::is_consonant(word, i) {
                i += 1;
            }
        }

        m
    }

    /// Check if word contains a vowel.
    fn contains_vowel(word: &[u8]) -> bool {
        (0..word.len()).any(|i| !Self::is_consonant(word, i))
    }

    /// Check if word ends with a double consonant.
    fn ends_with_double_consonant(word: &[u8]) -> bool {
        let len = word.len();
        len >= 2 && word[len - 1] == word[len - 2] && Self::is_consonant(word, len - 1)
    }

    /// Check if word ends with consonant-vowel-consonant, where the final
    /// consonant is not w, x or y.
    fn ends_cvc(word: &[u8]) -> bool {
        let len = word.len();
        if len < 3 {
            return false;
        }

        Self::is_consonant(word, len - 3)
            && !Self::is_consonant(word, len - 2)
            && Self::is_consonant(word, len - 1)
            && !matches!(word[len - 1], b'w' | b'x' | b'y')
    }

    /// Strip `suffix` from the end of `word`, returning the stem.
    fn stem_of<'a>(word: &'a [u8], suffix: &str) -> Option<&'a [u8]> {
        word.strip_suffix(suffix.as_bytes())
    }

    /// Apply the first rule whose suffix matches, if the stem measure is
    /// above `min_measure`.
    fn apply_rules(word: Vec<u8>, rules: &[(&str, &str)], min_measure: usize) -> Vec<u8> {
        for (old_suffix, new_suffix) in rules {
            if let Some(stem) = Self::stem_of(&word, old_suffix) {
                if Self::measure(stem) > min_measure {
                    let mut result = stem.to_vec();
                    result.extend_from_slice(new_suffix.as_bytes());
                    return result;
                }
                return word;
            }
        }
        word
    }

    /// Step 1a: plurals.
    fn step1a(word: Vec<u8>) -> Vec<u8> {
        if let Some(stem) = Self::stem_of(&word, "sses") {
            [stem, b"ss"].concat()
        } else if let Some(stem) = Self::stem_of(&word, "ies") {
            [stem, b"i"].concat()
        } else if word.ends_with(b"ss") {
            word
        } else if let Some(stem) = Self::stem_of(&word, "s") {
            stem.to_vec()
        } else {
            word
        }
    }

    /// Step 1b: -eed, -ed and -ing.
    fn step1b(word: Vec<u8>) -> Vec<u8> {
        if let Some(stem) = Self::stem_of(&word, "eed") {
            if Self::measure(stem) > 0 {
                return [stem, b"ee"].concat();
            }
            return word;
        }

        let stripped = ["ed", "ing"].iter().find_map(|suffix| {
            Self::stem_of(&word, suffix)
                .filter(|stem| Self::contains_vowel(stem))
                .map(<[u8]>::to_vec)
        });

        let Some(stem) = stripped else {
            return word;
        };

        if stem.ends_with(b"at") || stem.ends_with(b"bl") || stem.ends_with(b"iz") {
            [stem.as_slice(), b"e"].concat()
        } else if Self::ends_with_double_consonant(&stem)
            && !matches!(stem[stem.len() - 1], b'l' | b's' | b'z')
        {
            stem[..stem.len() - 1].to_vec()
        } else if Self::measure(&stem) == 1 && Self::ends_cvc(&stem) {
            [stem.as_slice(), b"e"].concat()
        } else {
            stem
        }
    }

    /// Step 1c: terminal y becomes i when the stem has a vowel.
    fn step1c(mut word: Vec<u8>) -> Vec<u8> {
        let len = word.len();
        if len > 1 && word[len - 1] == b'y' && Self::contains_vowel(&word[..len - 1]) {
            word[len - 1] = b'i';
        }
        word
    }

    /// Step 2 of Porter algorithm.
    fn step2(word: Vec<u8>) -> Vec<u8> {
        const RULES: &[(&str, &str)] = &[
            ("ational", "ate"),
            ("tional", "tion"),
            ("enci", "ence"),
            ("anci", "ance"),
            ("izer", "ize"),
            ("bli", "ble"),
            ("alli", "al"),
            ("entli", "ent"),
            ("eli", "e"),
            ("ousli", "ous"),
            ("ization", "ize"),
            ("ation", "ate"),
            ("ator", "ate"),
            ("alism", "al"),
            ("iveness", "ive"),
            ("fulness", "ful"),
            ("ousness", "ous"),
            ("aliti", "al"),
            ("iviti", "ive"),
            ("biliti", "ble"),
            ("logi", "log"),
        ];
        Self::apply_rules(word, RULES, 0)
    }

    /// Step 3 of Porter algorithm.
    fn step3(word: Vec<u8>) -> Vec<u8> {
        const RULES: &[(&str, &str)] = &[
            ("icate", "ic"),
            ("ative", ""),
            ("alize", "al"),
            ("iciti", "ic"),
            ("ical", "ic"),
            ("ful", ""),
            ("ness", ""),
        ];
        Self::apply_rules(word, RULES, 0)
    }

    /// Step 4 of Porter algorithm.
    fn step4(word: Vec<u8>) -> Vec<u8> {
        const SUFFIXES: &[&str] = &[
            "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent",
            "ion", "ou", "ism", "ate", "iti", "ous", "ive", "ize",
        ];

        for suffix in SUFFIXES {
            if let Some(stem) = Self::stem_of(&word, suffix) {
                let ion_ok = *suffix != "ion" || stem.ends_with(b"s") || stem.ends_with(b"t");
                if ion_ok && Self::measure(stem) > 1 {
                    return stem.to_vec();
                }
                if ion_ok {
                    return word;
                }
            }
        }

        word
    }

    /// Step 5 of Porter algorithm.
    fn step5(word: Vec<u8>) -> Vec<u8> {
        let word = match Self::stem_of(&word, "e") {
            Some(stem) => {
                let m = Self::measure(stem);
                if m > 1 || (m == 1 && !Self::ends_cvc(stem)) {
                    stem.to_vec()
                } else {
                    word
                }
            }
            None => word,
        };

        if word.ends_with(b"ll") && Self::measure(&word) > 1 {
            word[..word.len() - 1].to_vec()
        } else {
            word
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();
        if word.len() <= 2 || !word.is_ascii() {
            return word;
        }

        let bytes = word.into_bytes();
        let bytes = Self::step1a(bytes);
        let bytes = Self::step1b(bytes);
        let bytes = Self::step1c(bytes);
        let bytes = Self::step2(bytes);
        let bytes = Self::step3(bytes);
        let bytes = Self::step4(bytes);
        let bytes = Self::step5(bytes);

        // Every rule only swaps ASCII suffixes, so the bytes stay valid UTF-8.
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_porter_stemmer() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("flies"), "fli");
        assert_eq!(stemmer.stem("agreed"), "agre");
        assert_eq!(stemmer.stem("caresses"), "caress");
        assert_eq!(stemmer.stem("ponies"), "poni");
        assert_eq!(stemmer.stem("cats"), "cat");
        assert_eq!(stemmer.stem("hopping"), "hop");
        assert_eq!(stemmer.stem("hoping"), "hope");
        assert_eq!(stemmer.stem("happy"), "happi");
        assert_eq!(stemmer.stem("relational"), "relat");
        assert_eq!(stemmer.stem("sensational"), "sensat");
        assert_eq!(stemmer.stem("traditional"), "tradit");
        assert_eq!(stemmer.stem("complexity"), "complex");
        assert_eq!(stemmer.stem("juice"), "juic");
        assert_eq!(stemmer.stem("concepts"), "concept");
    }

    #[test]
    fn test_short_and_non_ascii_words_pass_through() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("is"), "is");
        assert_eq!(stemmer.stem("Go"), "go");
        assert_eq!(stemmer.stem("cafés"), "cafés");
        assert_eq!(stemmer.stem("日本語"), "日本語");
    }

    #[test]
    fn test_porter_measure() {
        assert_eq!(PorterStemmer::measure(b"tree"), 0);
        assert_eq!(PorterStemmer::measure(b"trees"), 1);
        assert_eq!(PorterStemmer::measure(b"trouble"), 1);
        assert_eq!(PorterStemmer::measure(b"troubles"), 2);
    }

    #[test]
    fn test_porter_consonant_detection() {
        let word = b"trouble";

        assert!(PorterStemmer::is_consonant(word, 0)); // t
        assert!(PorterStemmer::is_consonant(word, 1)); // r
        assert!(!PorterStemmer::is_consonant(word, 2)); // o
        assert!(!PorterStemmer::is_consonant(word, 3)); // u
        assert!(PorterStemmer::is_consonant(word, 4)); // b
        assert!(!PorterStemmer::is_consonant(word, 6)); // e

        // y after a consonant acts as a vowel
        assert!(!PorterStemmer::is_consonant(b"sky", 2));
        assert!(PorterStemmer::is_consonant(b"yes", 0));
    }
}
