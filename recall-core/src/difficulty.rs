//! Difficulty presets offered to the player.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RecallError, Result};

/// Generation parameters for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Fewest digits in a round.
    pub minimum: usize,
    /// Most digits in a round.
    pub maximum: usize,
    /// A word follows every `word_interval`-th digit.
    pub word_interval: usize,
}

/// The four preset levels, numbered 1 to 4 in the difficulty prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// 4–6 digits, a word every 2.
    Easy,
    /// 7–10 digits, a word every 2.
    Medium,
    /// 11–15 digits, a word every 3.
    Hard,
    /// 16–20 digits, a word every 4.
    VeryHard,
}

impl Difficulty {
    /// All presets in menu order.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::VeryHard];

    /// Generation parameters for this preset.
    #[must_use]
    pub fn params(self) -> DifficultyParams {
        let (minimum, maximum, word_interval) = match self {
            Self::Easy => (4, 6, 2),
            Self::Medium => (7, 10, 2),
            Self::Hard => (11, 15, 3),
            Self::VeryHard => (16, 20, 4),
        };
        DifficultyParams {
            minimum,
            maximum,
            word_interval,
        }
    }

    /// Menu number, 1-based.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
            Self::VeryHard => 4,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::VeryHard => "Very Hard",
        }
    }

    /// The menu line listing every preset.
    #[must_use]
    pub fn menu() -> String {
        Self::ALL
            .iter()
            .map(|d| format!("{}={}", d.number(), d.label()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = RecallError;

    /// Accepts the menu number or the preset name (case-insensitive;
    /// spaces, dashes and underscores are interchangeable).
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match normalized.as_str() {
            "1" | "easy" => Ok(Self::Easy),
            "2" | "medium" => Ok(Self::Medium),
            "3" | "hard" => Ok(Self::Hard),
            "4" | "veryhard" => Ok(Self::VeryHard),
            _ => Err(RecallError::InvalidDifficulty(s.to_string())),
        }
    }
}
