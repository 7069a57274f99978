//! Core type definitions for recall rounds.
//!
//! All types are serializable so a finished round can be stored verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Identifier grouping the rounds played in one process run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// The atomic unit of a sequence: a number or a vocabulary word.
///
/// Equality is by variant and value, so `Number(1)` never equals `Word("1")`.
/// Serialized untagged, which makes a stored sequence read `[1, 2, "apple"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    /// A non-negative integer. Generated numbers are single digits.
    Number(u64),
    /// A word, kept exactly as given.
    Word(String),
}

impl Item {
    /// Build a number item.
    #[must_use]
    pub fn number(value: u64) -> Self {
        Self::Number(value)
    }

    /// Build a word item.
    #[must_use]
    pub fn word(value: impl Into<String>) -> Self {
        Self::Word(value.into())
    }

    /// Whether this item is a number.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Whether this item is a word.
    #[must_use]
    pub fn is_word(&self) -> bool {
        matches!(self, Self::Word(_))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Word(w) => f.write_str(w),
        }
    }
}

/// What the user supplied at one key position.
///
/// `Missing` stands in for positions past the end of a short answer. It is
/// never equal to any real item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Submitted {
    /// An item the user actually entered.
    Item(Item),
    /// The user's answer ended before this position.
    Missing,
}

impl Submitted {
    /// Placeholder shown for a missing position.
    pub const MISSING_PLACEHOLDER: &'static str = "----";

    /// Exact match against an expected item. `Missing` matches nothing.
    #[must_use]
    pub fn matches(&self, expected: &Item) -> bool {
        match self {
            Self::Item(item) => item == expected,
            Self::Missing => false,
        }
    }
}

impl fmt::Display for Submitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(item) => item.fmt(f),
            Self::Missing => f.write_str(Self::MISSING_PLACEHOLDER),
        }
    }
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

/// An ordered list of items, fixed once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Item>);

/// The ground-truth sequence a round is graded against.
pub type AnswerKey = Sequence;

/// The sequence parsed from a user's recall.
pub type UserAnswer = Sequence;

impl Sequence {
    /// Wrap an ordered list of items.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self(items)
    }

    /// Number of number items.
    #[must_use]
    pub fn digit_count(&self) -> usize {
        self.0.iter().filter(|i| i.is_number()).count()
    }

    /// Number of word items.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.0.iter().filter(|i| i.is_word()).count()
    }

    /// Consume the sequence and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.0
    }
}

impl Deref for Sequence {
    type Target = [Item];

    fn deref(&self) -> &[Item] {
        &self.0
    }
}

impl From<Vec<Item>> for Sequence {
    fn from(items: Vec<Item>) -> Self {
        Self(items)
    }
}

impl FromIterator<Item> for Sequence {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_never_equals_word_with_same_text() {
        assert_ne!(Item::number(1), Item::word("1"));
    }

    #[test]
    fn missing_matches_nothing() {
        assert!(!Submitted::Missing.matches(&Item::word("----")));
        assert!(!Submitted::Missing.matches(&Item::number(0)));
        assert!(Submitted::Item(Item::number(3)).matches(&Item::number(3)));
    }

    #[test]
    fn display_formats() {
        let seq = Sequence::new(vec![Item::number(1), Item::word("ugli fruit"), Item::number(0)]);
        assert_eq!(seq.to_string(), "[1, ugli fruit, 0]");
        assert_eq!(Submitted::Missing.to_string(), "----");
        assert_eq!(Sequence::default().to_string(), "[]");
    }

    #[test]
    fn counts_by_kind() {
        let seq = Sequence::new(vec![Item::number(1), Item::number(2), Item::word("kiwi")]);
        assert_eq!(seq.digit_count(), 2);
        assert_eq!(seq.word_count(), 1);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn json_shape_is_untagged() {
        let seq = Sequence::new(vec![Item::number(1), Item::word("apple")]);
        let json = serde_json::to_string(&seq).expect("serialize");
        assert_eq!(json, r#"[1,"apple"]"#);

        let back: Sequence = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, seq);
    }

    #[test]
    fn missing_serializes_distinct_from_items() {
        let json = serde_json::to_string(&Submitted::Missing).expect("serialize");
        assert_eq!(json, r#""missing""#);
        let json = serde_json::to_string(&Submitted::Item(Item::word("missing"))).expect("serialize");
        assert_eq!(json, r#"{"item":"missing"}"#);
    }
}
