//! # recall core library
//!
//! Round engine for a short-term memory trainer. A round shows the player a
//! mixed sequence of single digits and vocabulary words, then grades what
//! they recall:
//!
//! - [`generator`] — builds the sequence and its answer key
//! - [`parser`] — turns comma-separated recall text into typed items
//! - [`checker`] — positional diff of the recall against the key
//!
//! Around the engine sit [`difficulty`] presets, [`round`] records,
//! [`config`] loading and [`persistence`] of rounds to SQLite.
//!
//! ```
//! use recall_core::{Vocabulary, check, generate, parse};
//!
//! let (sequence, key) = generate(4, 6, &Vocabulary::default(), 2)?;
//! let typed = sequence.to_string();
//! let answer = parse(typed.trim_matches(|c| c == '[' || c == ']'));
//! assert!(check(&answer, &key).correct);
//! # Ok::<(), recall_core::RecallError>(())
//! ```
//!
//! The generator, parser and checker hold no state between calls.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod checker;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod generator;
pub mod parser;
pub mod persistence;
pub mod round;
pub mod types;
pub mod vocabulary;

pub use checker::{ComparisonDetail, Verdict, check};
pub use config::RecallConfig;
pub use difficulty::{Difficulty, DifficultyParams};
pub use error::RecallError;
pub use generator::{generate, generate_with_rng};
pub use parser::parse;
pub use round::{RoundMetadata, RoundResult};
pub use types::*;
pub use vocabulary::Vocabulary;

/// Generate a round from a difficulty preset.
///
/// # Errors
///
/// Never fails for the built-in presets; see [`generator::validate_params`].
pub fn generate_for<R: rand::Rng + ?Sized>(
    difficulty: Difficulty,
    vocabulary: &Vocabulary,
    rng: &mut R,
) -> error::Result<(Sequence, AnswerKey)> {
    let p = difficulty.params();
    generate_with_rng(p.minimum, p.maximum, vocabulary, p.word_interval, rng)
}
