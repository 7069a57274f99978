//! Property-based tests for the round engine.
//!
//! Uses `proptest` to check generator shape, parser totality and checker
//! invariants under random inputs. Every generated round is driven by a
//! seeded `StdRng`, so failures shrink to a reproducible seed.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use recall_core::checker::check;
use recall_core::generator::generate_with_rng;
use recall_core::parser::parse;
use recall_core::types::{Item, Sequence, Submitted};
use recall_core::vocabulary::Vocabulary;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_item() -> impl Strategy<Value = Item> {
    prop_oneof![
        (0..10u64).prop_map(Item::Number),
        "[a-z]{1,8}".prop_map(Item::Word),
    ]
}

fn arb_items(max: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(arb_item(), 0..max)
}

fn arb_vocabulary() -> impl Strategy<Value = Vocabulary> {
    prop::collection::vec("[a-z]{1,6}", 0..12).prop_map(Vocabulary::new)
}

// ---------------------------------------------------------------------------
// Property: digit count stays within [minimum, maximum]
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn digit_count_within_bounds(
        minimum in 1..30usize,
        extra in 0..30usize,
        interval in 1..6usize,
        seed in any::<u64>(),
    ) {
        let maximum = minimum + extra;
        let mut rng = StdRng::seed_from_u64(seed);
        let (seq, key) = generate_with_rng(minimum, maximum, &Vocabulary::default(), interval, &mut rng)
            .expect("valid params");
        prop_assert_eq!(&seq, &key);
        prop_assert!(seq.digit_count() >= minimum);
        prop_assert!(seq.digit_count() <= maximum);
    }
}

// ---------------------------------------------------------------------------
// Property: words appear only right after every interval-th digit
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn words_follow_every_nth_digit(
        minimum in 1..25usize,
        extra in 0..10usize,
        interval in 1..6usize,
        vocab in arb_vocabulary(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (seq, _) = generate_with_rng(minimum, minimum + extra, &vocab, interval, &mut rng)
            .expect("valid params");

        let mut digits_seen = 0usize;
        let mut previous_was_word = false;
        for item in seq.iter() {
            match item {
                Item::Number(n) => {
                    prop_assert!(*n <= 9);
                    digits_seen += 1;
                    previous_was_word = false;
                }
                Item::Word(_) => {
                    prop_assert!(!previous_was_word, "two words in a row");
                    prop_assert!(digits_seen > 0 && digits_seen % interval == 0);
                    previous_was_word = true;
                }
            }
        }

        let slots = seq.digit_count() / interval;
        prop_assert_eq!(seq.word_count(), slots.min(vocab.len()));
    }
}

// ---------------------------------------------------------------------------
// Property: no word repeats within a round
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn words_never_repeat(
        vocab in arb_vocabulary(),
        length in 1..40usize,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (seq, _) = generate_with_rng(length, length, &vocab, 1, &mut rng).expect("valid params");
        let words: Vec<&Item> = seq.iter().filter(|i| i.is_word()).collect();
        let distinct: HashSet<&Item> = words.iter().copied().collect();
        prop_assert_eq!(words.len(), distinct.len());
        for word in &words {
            if let Item::Word(w) = word {
                prop_assert!(vocab.contains(w));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property: parsing never fails and never yields empty words
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn parse_is_total(raw in ".{0,80}") {
        let answer = parse(&raw);
        for item in answer.iter() {
            if let Item::Word(w) = item {
                prop_assert!(!w.is_empty());
                prop_assert_eq!(w.trim(), w.as_str());
                prop_assert!(!w.contains(','));
            }
        }
    }
}

proptest! {
    #[test]
    fn parse_reads_back_a_typed_sequence(items in arb_items(20)) {
        let typed = items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        prop_assert_eq!(parse(&typed), Sequence::new(items));
    }
}

// ---------------------------------------------------------------------------
// Property: checker shape and verdict rules
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn details_follow_the_key(user in arb_items(15), key in arb_items(15)) {
        let verdict = check(&user, &key);
        prop_assert_eq!(verdict.details.len(), key.len());
        prop_assert_eq!(verdict.errors, verdict.details.iter().filter(|d| !d.correct).count());
        prop_assert_eq!(verdict.correct, verdict.errors == 0 && user.len() == key.len());

        for (i, detail) in verdict.details.iter().enumerate() {
            prop_assert_eq!(&detail.expected, &key[i]);
            match user.get(i) {
                Some(item) => {
                    prop_assert_eq!(&detail.submitted, &Submitted::Item(item.clone()));
                }
                None => {
                    prop_assert_eq!(&detail.submitted, &Submitted::Missing);
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn check_is_idempotent(user in arb_items(10), key in arb_items(10)) {
        prop_assert_eq!(check(&user, &key), check(&user, &key));
    }
}

proptest! {
    #[test]
    fn key_checked_against_itself_is_correct(key in arb_items(20)) {
        let verdict = check(&key, &key);
        prop_assert!(verdict.correct);
        prop_assert_eq!(verdict.errors, 0);
    }
}

proptest! {
    #[test]
    fn padded_answer_is_never_correct(key in arb_items(12), extra in prop::collection::vec(arb_item(), 1..4)) {
        let mut user = key.clone();
        user.extend(extra);
        let verdict = check(&user, &key);
        prop_assert!(!verdict.correct);
        prop_assert_eq!(verdict.errors, 0);
    }
}
