//! Answer checking — positional diff of a recall against the answer key.

use serde::{Deserialize, Serialize};

use crate::types::{Item, Submitted};

/// One key position: what was submitted, what was expected, and whether
/// they matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonDetail {
    /// The user's item at this position, or [`Submitted::Missing`].
    pub submitted: Submitted,
    /// The key's item at this position.
    pub expected: Item,
    /// Exact value-and-kind equality.
    pub correct: bool,
}

/// Outcome of checking one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// True only when every key position matches and the answer has
    /// exactly as many items as the key.
    pub correct: bool,
    /// Number of key positions that did not match.
    pub errors: usize,
    /// One entry per key position, in key order.
    pub details: Vec<ComparisonDetail>,
}

impl Verdict {
    /// Number of key positions that matched.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.details.len() - self.errors
    }
}

/// Compare `user` against `key` position by position.
///
/// Only key positions are walked: excess user items are not reported as
/// errors, but they still make the answer incorrect, as does a short answer.
#[must_use]
pub fn check(user: &[Item], key: &[Item]) -> Verdict {
    let details: Vec<ComparisonDetail> = key
        .iter()
        .enumerate()
        .map(|(i, expected)| {
            let submitted = user
                .get(i)
                .map_or(Submitted::Missing, |item| Submitted::Item(item.clone()));
            ComparisonDetail {
                correct: submitted.matches(expected),
                submitted,
                expected: expected.clone(),
            }
        })
        .collect();

    let errors = details.iter().filter(|d| !d.correct).count();

    Verdict {
        correct: errors == 0 && user.len() == key.len(),
        errors,
        details,
    }
}
