// Word tokenizer with stop-word filtering.
//
// Turns raw document text into the normalized token sequence the similarity
// metrics work on. Tokens are lowercased words in document order; English
// stop words come from the `stop-words` crate.

use std::collections::HashSet;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

/// Lowercase letters (ASCII plus Latin-1/Latin Extended-A/B), digits, and an
/// optional trailing contraction like "don't" or "world's".
const WORD_PATTERN: &str = r"[a-z0-9\x{00C0}-\x{024F}]+(?:'[a-z]+)?";

pub struct Tokenizer {
    word_re: Regex,
    stop_words: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Tokenizer {
    /// Build a tokenizer. With `keep_stop_words` set, nothing is filtered.
    pub fn new(keep_stop_words: bool) -> Self {
        let stop_words = if keep_stop_words {
            HashSet::new()
        } else {
            get(LANGUAGE::English).into_iter().collect()
        };

        Self {
            word_re: Regex::new(WORD_PATTERN).expect("valid word pattern"),
            stop_words,
        }
    }

    /// Split text into lowercased word tokens, dropping stop words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.word_re
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|word| !self.stop_words.contains(*word))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_drops_punctuation() {
        let tokenizer = Tokenizer::new(true);
        assert_eq!(
            tokenizer.tokenize("Quick, BROWN fox!"),
            vec!["quick", "brown", "fox"]
        );
    }

    #[test]
    fn test_stop_words_removed() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("The quick fox and the lazy dog");
        assert!(!tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"and".to_string()));
        assert!(tokens.contains(&"fox".to_string()));
        assert!(tokens.contains(&"dog".to_string()));
    }

    #[test]
    fn test_empty_text() {
        assert!(Tokenizer::default().tokenize("").is_empty());
        assert!(Tokenizer::default().tokenize("  ,,, !! ").is_empty());
    }

    #[test]
    fn test_accented_words_kept_whole() {
        let tokenizer = Tokenizer::new(true);
        assert_eq!(tokenizer.tokenize("Café résumé"), vec!["café", "résumé"]);
    }
}
