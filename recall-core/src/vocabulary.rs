//! The pool of words that can be mixed into a sequence.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Built-in word list used when the caller supplies none.
pub const DEFAULT_WORDS: [&str; 22] = [
    "apple",
    "banana",
    "cherry",
    "date",
    "fig",
    "grape",
    "kiwi",
    "lemon",
    "mango",
    "nectarine",
    "orange",
    "papaya",
    "quince",
    "raspberry",
    "strawberry",
    "tangerine",
    "ugli fruit",
    "voavanga",
    "watermelon",
    "xigua",
    "yellow passion fruit",
    "zucchini",
];

/// An ordered list of distinct words.
///
/// Read-only once built. Duplicates are dropped on construction, keeping the
/// first occurrence, so every word can be drawn at most once per round. An
/// empty vocabulary is valid and yields digit-only rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from any list of words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut distinct: Vec<String> = Vec::new();
        let mut dropped = 0usize;
        for word in words {
            let word = word.into();
            if distinct.contains(&word) {
                dropped += 1;
            } else {
                distinct.push(word);
            }
        }
        if dropped > 0 {
            debug!(dropped, kept = distinct.len(), "Dropped duplicate vocabulary words");
        }
        Self { words: distinct }
    }

    /// A vocabulary with no words.
    #[must_use]
    pub fn empty() -> Self {
        Self { words: Vec::new() }
    }

    /// The words, in order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether there are no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` is part of this vocabulary.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS)
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.words
    }
}
