//! Configuration for recall, loadable from `recall.toml`.
//!
//! Every field has a default, so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::{RecallError, Result};
use crate::parser::parse;
use crate::types::Item;
use crate::vocabulary::Vocabulary;

/// Top-level recall configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecallConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Terminal pacing.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Round generation settings.
    #[serde(default)]
    pub game: GameConfig,
    /// Round and event storage.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl RecallConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `RecallError::Config` if the TOML is invalid or fails
    /// [`RecallConfig::validate`].
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| RecallError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check values serde cannot check on its own.
    ///
    /// # Errors
    /// Returns `RecallError::Config` for a vocabulary word a player could
    /// not type back, or an unknown default difficulty.
    pub fn validate(&self) -> Result<()> {
        if let Some(words) = &self.game.vocabulary {
            for word in words {
                check_word(word)?;
            }
        }
        self.game.default_difficulty()?;
        Ok(())
    }
}

/// A vocabulary word must parse back as exactly itself, or a perfect recall
/// of it would be graded wrong.
fn check_word(word: &str) -> Result<()> {
    let reason = if word.trim().is_empty() {
        "is blank"
    } else if word.contains(',') {
        "contains a comma"
    } else if word.trim() != word {
        "has leading or trailing whitespace"
    } else if word.bytes().all(|b| b.is_ascii_digit()) {
        "is all digits and would read back as a number"
    } else {
        debug_assert_eq!(parse(word).into_items(), vec![Item::word(word)]);
        return Ok(());
    };
    Err(RecallError::Config(format!("vocabulary word {word:?} {reason}")))
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Terminal pacing for the game loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// How many times the start banner blinks.
    #[serde(default = "default_4")]
    pub splash_blinks: u32,
    /// Half-period of a banner blink in milliseconds.
    #[serde(default = "default_300")]
    pub splash_interval_ms: u64,
    /// Pause after announcing the item count.
    #[serde(default = "default_2000")]
    pub intro_ms: u64,
    /// How long each item stays on screen.
    #[serde(default = "default_2000")]
    pub item_display_ms: u64,
    /// Clear the terminal between items.
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            splash_blinks: 4,
            splash_interval_ms: 300,
            intro_ms: 2000,
            item_display_ms: 2000,
            clear_screen: true,
        }
    }
}

/// Round generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Preset used without prompting, by number or name.
    #[serde(default)]
    pub default_difficulty: Option<String>,
    /// Replaces the built-in word list when set.
    #[serde(default)]
    pub vocabulary: Option<Vec<String>>,
}

impl GameConfig {
    /// The configured default preset, if any.
    ///
    /// # Errors
    /// Returns `RecallError::Config` if the name matches no preset.
    pub fn default_difficulty(&self) -> Result<Option<Difficulty>> {
        self.default_difficulty
            .as_deref()
            .map(|s| s.parse::<Difficulty>().map_err(|e| RecallError::Config(e.to_string())))
            .transpose()
    }

    /// The configured vocabulary, or the built-in one.
    #[must_use]
    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
            .as_ref()
            .map_or_else(Vocabulary::default, |words| Vocabulary::new(words.iter().cloned()))
    }
}

/// Round and event storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Whether rounds are stored at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Path of the SQLite database.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Use WAL journaling.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// Record game events in the `logs` table.
    #[serde(default = "default_true")]
    pub log_events: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            db_path: default_db_path(),
            wal_mode: true,
            log_events: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_db_path() -> PathBuf { PathBuf::from("recall.db") }
fn default_4() -> u32 { 4 }
fn default_300() -> u64 { 300 }
fn default_2000() -> u64 { 2000 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = RecallConfig::from_toml("").expect("parse");
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.display.item_display_ms, 2000);
        assert!(config.persistence.enabled);
        assert_eq!(config.persistence.db_path, PathBuf::from("recall.db"));
        assert_eq!(config.game.vocabulary().len(), 22);
        assert_eq!(config.game.default_difficulty().expect("difficulty"), None);
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let config = RecallConfig::from_toml(
            r#"
            [display]
            item_display_ms = 0

            [game]
            default_difficulty = "hard"
            vocabulary = ["red", "green", "red"]
            "#,
        )
        .expect("parse");
        assert_eq!(config.display.item_display_ms, 0);
        assert_eq!(config.display.splash_blinks, 4);
        assert_eq!(
            config.game.default_difficulty().expect("difficulty"),
            Some(Difficulty::Hard)
        );
        assert_eq!(config.game.vocabulary().words(), ["red", "green"]);
    }

    #[test]
    fn blank_word_is_rejected() {
        let err = RecallConfig::from_toml("[game]\nvocabulary = [\"ok\", \"  \"]").expect_err("invalid");
        assert!(matches!(err, RecallError::Config(_)));
    }

    fn vocabulary_error(words: &str) -> String {
        let toml = format!("[game]\nvocabulary = {words}\n");
        match RecallConfig::from_toml(&toml).expect_err("invalid") {
            RecallError::Config(msg) => msg,
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn word_with_comma_is_rejected() {
        let msg = vocabulary_error(r#"["kiwi", "a,b"]"#);
        assert!(msg.contains("comma"), "{msg}");
    }

    #[test]
    fn digit_only_word_is_rejected() {
        let msg = vocabulary_error(r#"["7"]"#);
        assert!(msg.contains("digits"), "{msg}");
        let msg = vocabulary_error(r#"["99999999999999999999999"]"#);
        assert!(msg.contains("digits"), "{msg}");
    }

    #[test]
    fn padded_word_is_rejected() {
        let msg = vocabulary_error(r#"[" kiwi"]"#);
        assert!(msg.contains("whitespace"), "{msg}");
        let msg = vocabulary_error(r#"["kiwi\t"]"#);
        assert!(msg.contains("whitespace"), "{msg}");
    }

    #[test]
    fn accepted_words_read_back_as_themselves() {
        let config = RecallConfig::from_toml(
            r#"
            [game]
            vocabulary = ["ugli fruit", "R2D2", "x-ray", "7up"]
            "#,
        )
        .expect("valid");
        for word in config.game.vocabulary().words() {
            assert_eq!(parse(word).into_items(), vec![Item::word(word.as_str())]);
        }
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let err = RecallConfig::from_toml("[game]\ndefault_difficulty = \"insane\"").expect_err("invalid");
        assert!(matches!(err, RecallError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = RecallConfig::from_toml("[display\n").expect_err("invalid");
        assert!(matches!(err, RecallError::Config(_)));
    }

    #[test]
    fn from_file_reads_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("recall.toml");
        std::fs::write(&path, "[persistence]\nenabled = false\n").expect("write");
        let config = RecallConfig::from_file(&path).expect("load");
        assert!(!config.persistence.enabled);

        let missing = RecallConfig::from_file(&dir.path().join("nope.toml")).expect_err("missing");
        assert!(matches!(missing, RecallError::Io(_)));
    }
}
