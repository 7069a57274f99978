//! SQLite storage for finished rounds and the game event log.
//!
//! Rounds are kept as two JSON documents so the schema survives changes to
//! the round payload:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS rounds (
//!     id          INTEGER PRIMARY KEY AUTOINCREMENT,
//!     session_id  TEXT NOT NULL,
//!     recorded_at TEXT NOT NULL,
//!     meta        TEXT NOT NULL,   -- RoundMetadata
//!     data        TEXT NOT NULL    -- items, answer, details, correct, errors
//! );
//! CREATE TABLE IF NOT EXISTS logs (
//!     id        INTEGER PRIMARY KEY AUTOINCREMENT,
//!     timestamp TEXT NOT NULL,
//!     level     TEXT NOT NULL,
//!     message   TEXT NOT NULL
//! );
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::checker::ComparisonDetail;
use crate::config::PersistenceConfig;
use crate::error::{RecallError, Result};
use crate::round::{RoundMetadata, RoundResult};
use crate::types::{Sequence, SessionId, UserAnswer};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS rounds (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        session_id  TEXT NOT NULL,
        recorded_at TEXT NOT NULL,
        meta        TEXT NOT NULL,
        data        TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS logs (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        level     TEXT NOT NULL,
        message   TEXT NOT NULL
    );";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Severity of an event-log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Fine-grained detail.
    Debug,
    /// Normal game events.
    Info,
    /// Something went wrong but play continued.
    Error,
}

impl LogLevel {
    /// Upper-case name stored in the `level` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Row ID.
    pub id: i64,
    /// RFC 3339 time of insertion.
    pub timestamp: String,
    /// Level name.
    pub level: String,
    /// Free-form message.
    pub message: String,
}

/// A round as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRound {
    /// Row ID.
    pub id: i64,
    /// Session the round was played in.
    pub session: SessionId,
    /// When the round was saved.
    pub recorded_at: DateTime<Utc>,
    /// The round itself.
    pub result: RoundResult,
}

/// The `data` column: everything but the metadata.
#[derive(Serialize, Deserialize)]
struct RoundData {
    items: Sequence,
    answer: UserAnswer,
    details: Vec<ComparisonDetail>,
    correct: bool,
    errors: usize,
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| RecallError::Serialization(e.to_string()))
}

fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| RecallError::Serialization(e.to_string()))
}

// ---------------------------------------------------------------------------
// RoundStore
// ---------------------------------------------------------------------------

/// Handle to an open SQLite database holding rounds and event logs.
///
/// # Usage
///
/// ```no_run
/// # use recall_core::persistence::RoundStore;
/// # use recall_core::config::PersistenceConfig;
/// let store = RoundStore::open("recall.db", &PersistenceConfig::default())?;
/// for round in store.recent_rounds(10)? {
///     println!("{} correct={}", round.id, round.result.correct);
/// }
/// # Ok::<(), recall_core::error::RecallError>(())
/// ```
pub struct RoundStore {
    conn: Connection,
    db_path: PathBuf,
}

impl fmt::Debug for RoundStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl RoundStore {
    /// Open (or create) a database at `path` and make sure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`RecallError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &PersistenceConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&db_path, flags)?;
        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(
            path = %db_path.display(),
            wal = config.wal_mode,
            "Round store opened"
        );

        Ok(Self { conn, db_path })
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`RecallError::Database`] on SQLite failures.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        })
    }

    // ------------------------------------------------------------------
    // Event log
    // ------------------------------------------------------------------

    /// Append a row to the event log.
    ///
    /// # Errors
    ///
    /// Returns [`RecallError::Database`] on SQLite failures.
    pub fn log_event(&self, level: LogLevel, message: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO logs (timestamp, level, message) VALUES (?1, ?2, ?3)",
            params![Utc::now().to_rfc3339(), level.as_str(), message],
        )?;
        Ok(())
    }

    /// The newest `n` event-log rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RecallError::Database`] on SQLite failures.
    pub fn fetch_last_events(&self, n: usize) -> Result<Vec<LogRecord>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, timestamp, level, message FROM logs ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit(n)], |row| {
            Ok(LogRecord {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                level: row.get(2)?,
                message: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ------------------------------------------------------------------
    // Rounds
    // ------------------------------------------------------------------

    /// Store a finished round and return its row ID.
    ///
    /// # Errors
    ///
    /// Returns [`RecallError::Serialization`] if JSON encoding fails, or
    /// [`RecallError::Database`] on SQLite failures.
    pub fn save_round(&self, session: SessionId, result: &RoundResult) -> Result<i64> {
        let start = Instant::now();

        let meta = to_json(&result.metadata)?;
        let data = to_json(&RoundData {
            items: result.items.clone(),
            answer: result.answer.clone(),
            details: result.details.clone(),
            correct: result.correct,
            errors: result.errors,
        })?;

        self.conn.execute(
            "INSERT INTO rounds (session_id, recorded_at, meta, data) VALUES (?1, ?2, ?3, ?4)",
            params![session.to_string(), Utc::now().to_rfc3339(), meta, data],
        )?;
        let id = self.conn.last_insert_rowid();

        debug!(
            id,
            session = %session,
            items = result.items.len(),
            correct = result.correct,
            elapsed_us = start.elapsed().as_micros(),
            "Saved round"
        );

        Ok(id)
    }

    /// Load one round by row ID.
    ///
    /// # Errors
    ///
    /// Returns [`RecallError::Serialization`] if a stored column cannot be
    /// decoded, or [`RecallError::Database`] on SQLite failures.
    pub fn load_round(&self, id: i64) -> Result<Option<StoredRound>> {
        let row: Option<RawRound> = self
            .conn
            .query_row(
                "SELECT id, session_id, recorded_at, meta, data FROM rounds WHERE id = ?1",
                params![id],
                RawRound::from_row,
            )
            .optional()?;
        row.map(RawRound::decode).transpose()
    }

    /// The newest `n` rounds, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RecallError::Serialization`] or [`RecallError::Database`].
    pub fn recent_rounds(&self, n: usize) -> Result<Vec<StoredRound>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, session_id, recorded_at, meta, data FROM rounds ORDER BY id DESC LIMIT ?1",
        )?;
        let raw = stmt
            .query_map(params![limit(n)], RawRound::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        raw.into_iter().map(RawRound::decode).collect()
    }

    /// Total number of stored rounds.
    ///
    /// # Errors
    ///
    /// Returns [`RecallError::Database`] on SQLite failures.
    pub fn round_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM rounds", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    // ------------------------------------------------------------------
    // Utility
    // ------------------------------------------------------------------

    /// Path to the database file (or `:memory:`).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run SQLite's integrity check. `Ok(false)` means corruption.
    ///
    /// # Errors
    ///
    /// Returns [`RecallError::Database`] if the check itself fails.
    pub fn integrity_check(&self) -> Result<bool> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        Ok(result == "ok")
    }
}

fn limit(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Columns of a `rounds` row before JSON decoding.
struct RawRound {
    id: i64,
    session_id: String,
    recorded_at: String,
    meta: String,
    data: String,
}

impl RawRound {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            session_id: row.get(1)?,
            recorded_at: row.get(2)?,
            meta: row.get(3)?,
            data: row.get(4)?,
        })
    }

    fn decode(self) -> Result<StoredRound> {
        let session = uuid::Uuid::parse_str(&self.session_id)
            .map(SessionId)
            .map_err(|e| RecallError::Serialization(format!("round {}: {e}", self.id)))?;
        let recorded_at = DateTime::parse_from_rfc3339(&self.recorded_at)
            .map_err(|e| RecallError::Serialization(format!("round {}: {e}", self.id)))?
            .with_timezone(&Utc);
        let metadata: RoundMetadata = from_json(&self.meta)?;
        let data: RoundData = from_json(&self.data)?;

        Ok(StoredRound {
            id: self.id,
            session,
            recorded_at,
            result: RoundResult {
                items: data.items,
                answer: data.answer,
                correct: data.correct,
                errors: data.errors,
                details: data.details,
                metadata,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
