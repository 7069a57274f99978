//! The `recall init-db` command.

use anyhow::Result;
use recall_core::RecallConfig;

pub fn execute(config: &RecallConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let path = std::fs::canonicalize(store.db_path()).unwrap_or_else(|_| store.db_path().to_path_buf());
    println!("Created/initialized database at {}", path.display());
    Ok(())
}
