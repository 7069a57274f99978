//! The `recall logs` command.

use anyhow::Result;
use recall_core::RecallConfig;

pub fn execute(config: &RecallConfig, limit: usize) -> Result<()> {
    let store = super::open_store(config)?;
    let events = store.fetch_last_events(limit)?;

    if events.is_empty() {
        println!("No events logged yet.");
        return Ok(());
    }
    for event in &events {
        println!("[{}] {:<5} {}", event.timestamp, event.level, event.message);
    }
    Ok(())
}
