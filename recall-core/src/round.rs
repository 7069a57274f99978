//! A finished round, ready for display and storage.

use serde::{Deserialize, Serialize};

use crate::checker::{ComparisonDetail, Verdict};
use crate::difficulty::Difficulty;
use crate::types::{Sequence, UserAnswer};

/// Experiment-level facts about a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundMetadata {
    /// Seconds the user took to type the answer.
    pub elapsed_secs: f64,
    /// Number of items presented.
    pub item_count: usize,
    /// Preset the round was generated from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// Everything a round produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// The presented sequence.
    pub items: Sequence,
    /// The parsed user answer.
    pub answer: UserAnswer,
    /// Whether the answer exactly matched the key.
    pub correct: bool,
    /// Number of mismatched key positions.
    pub errors: usize,
    /// Per-position comparison.
    pub details: Vec<ComparisonDetail>,
    /// Timing and difficulty.
    pub metadata: RoundMetadata,
}

impl RoundResult {
    /// Assemble a result from a round's parts.
    #[must_use]
    pub fn new(
        items: Sequence,
        answer: UserAnswer,
        verdict: Verdict,
        elapsed_secs: f64,
        difficulty: Option<Difficulty>,
    ) -> Self {
        let metadata = RoundMetadata {
            elapsed_secs,
            item_count: items.len(),
            difficulty,
        };
        Self {
            items,
            answer,
            correct: verdict.correct,
            errors: verdict.errors,
            details: verdict.details,
            metadata,
        }
    }

    /// Fraction of key positions recalled correctly, in `[0, 1]`.
    ///
    /// An empty key counts as fully recalled.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f64 {
        if self.details.is_empty() {
            return 1.0;
        }
        let matched = self.details.iter().filter(|d| d.correct).count();
        matched as f64 / self.details.len() as f64
    }
}
