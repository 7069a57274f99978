//! Round generation — the mixed digit/word sequence a user must memorize.
//!
//! A round is `length` random digits, with `length` drawn uniformly from
//! `[minimum, maximum]`. After every `word_interval`-th digit one word is
//! drawn uniformly from the vocabulary words not yet used this round. Once
//! the vocabulary is exhausted the remaining insertion points are skipped
//! and the round continues with digits only.
//!
//! The same construction is returned twice: once for display and once as
//! the answer key used for grading.

use rand::Rng;
use tracing::debug;

use crate::error::{RecallError, Result};
use crate::types::{AnswerKey, Item, Sequence};
use crate::vocabulary::Vocabulary;

/// Largest digit a generated number item can take.
pub const MAX_DIGIT: u64 = 9;

/// Check length bounds and word spacing before generating.
///
/// # Errors
///
/// Returns [`RecallError::InvalidRange`] if `minimum < 1` or
/// `maximum < minimum`, and [`RecallError::InvalidInterval`] if
/// `word_interval < 1`.
pub fn validate_params(minimum: usize, maximum: usize, word_interval: usize) -> Result<()> {
    if minimum < 1 || maximum < minimum {
        return Err(RecallError::InvalidRange { minimum, maximum });
    }
    if word_interval < 1 {
        return Err(RecallError::InvalidInterval { word_interval });
    }
    Ok(())
}

/// Generate a round using the thread-local random source.
///
/// # Errors
///
/// See [`validate_params`].
pub fn generate(
    minimum: usize,
    maximum: usize,
    vocabulary: &Vocabulary,
    word_interval: usize,
) -> Result<(Sequence, AnswerKey)> {
    generate_with_rng(minimum, maximum, vocabulary, word_interval, &mut rand::thread_rng())
}

/// Generate a round from an explicit random source.
///
/// Seed `rng` to reproduce a round exactly.
///
/// # Errors
///
/// See [`validate_params`].
pub fn generate_with_rng<R: Rng + ?Sized>(
    minimum: usize,
    maximum: usize,
    vocabulary: &Vocabulary,
    word_interval: usize,
    rng: &mut R,
) -> Result<(Sequence, AnswerKey)> {
    validate_params(minimum, maximum, word_interval)?;

    let length = rng.gen_range(minimum..=maximum);
    let digits: Vec<u64> = (0..length).map(|_| rng.gen_range(0..=MAX_DIGIT)).collect();

    // Words still available this round; dropped on return.
    let mut unused: Vec<&str> = vocabulary.words().iter().map(String::as_str).collect();
    let mut items = Vec::with_capacity(length + length / word_interval);

    for (placed, digit) in (1..).zip(digits) {
        items.push(Item::Number(digit));
        if placed % word_interval != 0 {
            continue;
        }
        if unused.is_empty() {
            continue;
        }
        let word = unused.swap_remove(rng.gen_range(0..unused.len()));
        items.push(Item::word(word));
    }

    let sequence = Sequence::new(items);
    debug!(
        length,
        words = sequence.word_count(),
        vocabulary = vocabulary.len(),
        word_interval,
        "Generated round sequence"
    );

    let key = sequence.clone();
    Ok((sequence, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn rejects_zero_minimum() {
        let err = generate(0, 5, &Vocabulary::default(), 2).expect_err("should fail");
        assert!(matches!(err, RecallError::InvalidRange { minimum: 0, maximum: 5 }));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = generate(5, 3, &Vocabulary::default(), 2).expect_err("should fail");
        assert!(matches!(err, RecallError::InvalidRange { minimum: 5, maximum: 3 }));
    }

    #[test]
    fn rejects_zero_interval() {
        let err = generate(4, 6, &Vocabulary::default(), 0).expect_err("should fail");
        assert!(matches!(err, RecallError::InvalidInterval { word_interval: 0 }));
    }

    #[test]
    fn range_is_checked_before_interval() {
        let err = generate(0, 0, &Vocabulary::default(), 0).expect_err("should fail");
        assert!(matches!(err, RecallError::InvalidRange { .. }));
    }

    #[test]
    fn sequence_and_key_are_identical() {
        let (seq, key) =
            generate_with_rng(4, 10, &Vocabulary::default(), 2, &mut rng()).expect("generate");
        assert_eq!(seq, key);
    }

    #[test]
    fn fixed_length_places_words_after_every_nth_digit() {
        let (seq, _) =
            generate_with_rng(6, 6, &Vocabulary::default(), 2, &mut rng()).expect("generate");
        // d d W d d W d d W
        assert_eq!(seq.len(), 9);
        for (i, item) in seq.iter().enumerate() {
            assert_eq!(item.is_word(), i % 3 == 2, "unexpected item {item} at {i}");
        }
    }

    #[test]
    fn digits_are_single_digit() {
        let (seq, _) =
            generate_with_rng(20, 20, &Vocabulary::empty(), 1, &mut rng()).expect("generate");
        assert_eq!(seq.len(), 20);
        assert!(seq.iter().all(|i| matches!(i, Item::Number(n) if *n <= MAX_DIGIT)));
    }

    #[test]
    fn exhausted_vocabulary_continues_with_digits() {
        let vocab = Vocabulary::new(["kiwi", "fig"]);
        let (seq, _) = generate_with_rng(10, 10, &vocab, 1, &mut rng()).expect("generate");
        assert_eq!(seq.digit_count(), 10);
        assert_eq!(seq.word_count(), 2);
        // Both words land right after the first and second digits.
        assert!(seq[1].is_word());
        assert!(seq[3].is_word());
        assert!(seq[4..].iter().all(Item::is_number));
    }

    #[test]
    fn no_word_repeats_within_a_round() {
        let (seq, _) =
            generate_with_rng(20, 20, &Vocabulary::default(), 1, &mut rng()).expect("generate");
        let words: Vec<&Item> = seq.iter().filter(|i| i.is_word()).collect();
        let distinct: HashSet<&Item> = words.iter().copied().collect();
        assert_eq!(words.len(), 20);
        assert_eq!(distinct.len(), words.len());
    }

    #[test]
    fn interval_larger_than_length_yields_no_words() {
        let (seq, _) =
            generate_with_rng(3, 3, &Vocabulary::default(), 4, &mut rng()).expect("generate");
        assert_eq!(seq.word_count(), 0);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn same_seed_same_round() {
        let vocab = Vocabulary::default();
        let (a, _) = generate_with_rng(4, 20, &vocab, 3, &mut rng()).expect("generate");
        let (b, _) = generate_with_rng(4, 20, &vocab, 3, &mut rng()).expect("generate");
        assert_eq!(a, b);
    }

    #[test]
    fn words_come_from_the_vocabulary() {
        let vocab = Vocabulary::new(["alpha", "beta", "gamma"]);
        let (seq, _) = generate_with_rng(8, 8, &vocab, 2, &mut rng()).expect("generate");
        for item in seq.iter() {
            if let Item::Word(w) = item {
                assert!(vocab.contains(w));
            }
        }
    }
}
