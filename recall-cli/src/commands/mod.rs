//! Subcommand handlers.

pub mod history;
pub mod init_db;
pub mod logs;
pub mod play;

use anyhow::{Context, Result};
use recall_core::RecallConfig;
use recall_core::persistence::RoundStore;

/// Open the configured database.
fn open_store(config: &RecallConfig) -> Result<RoundStore> {
    let path = &config.persistence.db_path;
    RoundStore::open(path, &config.persistence)
        .with_context(|| format!("opening database {}", path.display()))
}
