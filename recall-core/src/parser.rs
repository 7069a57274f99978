//! Parsing of free-form recall input.
//!
//! Input is a comma-separated list. Pieces are trimmed and empty pieces are
//! dropped. A piece made only of ASCII digits becomes a number; anything else
//! is kept as a word exactly as typed (after trimming). Parsing never fails.

use crate::types::{Item, UserAnswer};

/// Parse raw user text into an answer.
#[must_use]
pub fn parse(raw: &str) -> UserAnswer {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(classify)
        .collect()
}

/// Classify one trimmed, non-empty piece.
///
/// A digit-only piece too large for `u64` is kept as a word.
fn classify(piece: &str) -> Item {
    if piece.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = piece.parse::<u64>() {
            return Item::Number(n);
        }
    }
    Item::word(piece)
}
