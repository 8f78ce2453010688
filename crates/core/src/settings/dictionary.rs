//! Word dictionary for compressed setting names
//!
//! Setting names are stored as sequences of word indices. Index 0 never
//! names a word, so the zero padding at the end of an encoded name ends it;
//! indices past the last word are treated the same way.

/// Ordered list of words that setting names are assembled from
#[derive(Debug, Clone, Copy)]
pub struct WordDictionary {
    words: &'static [&'static str],
}

impl WordDictionary {
    /// Create a dictionary; `words[0]` is addressed by index 1
    pub const fn new(words: &'static [&'static str]) -> Self {
        Self { words }
    }

    /// Word at `index`, or `None` for the terminator
    pub fn word(&self, index: usize) -> Option<&'static str> {
        index
            .checked_sub(1)
            .and_then(|slot| self.words.get(slot))
            .copied()
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the dictionary has no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Index that addresses `word`, if present
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.words.iter().position(|w| *w == word).map(|slot| slot + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static WORDS: [&str; 4] = ["pid", "roll", "p", "gain"];

    #[test]
    fn test_word_lookup() {
        let dict = WordDictionary::new(&WORDS);
        assert_eq!(dict.word(1), Some("pid"));
        assert_eq!(dict.word(4), Some("gain"));
    }

    #[test]
    fn test_terminators() {
        let dict = WordDictionary::new(&WORDS);
        assert_eq!(dict.word(0), None);
        assert_eq!(dict.word(5), None);
        assert_eq!(dict.word(usize::MAX), None);
    }

    #[test]
    fn test_index_of() {
        let dict = WordDictionary::new(&WORDS);
        assert_eq!(dict.index_of("roll"), Some(2));
        assert_eq!(dict.index_of("yaw"), None);
        assert_eq!(dict.len(), 4);
        assert!(!dict.is_empty());
    }
}
