//! The `recall history` command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use recall_core::RecallConfig;

pub fn execute(config: &RecallConfig, limit: usize) -> Result<()> {
    let store = super::open_store(config)?;
    let rounds = store.recent_rounds(limit)?;

    if rounds.is_empty() {
        println!("No rounds recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Round", "Played", "Level", "Items", "Errors", "Correct", "Accuracy", "Seconds",
    ]);

    for round in &rounds {
        let result = &round.result;
        let level = result
            .metadata
            .difficulty
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        table.add_row(vec![
            Cell::new(round.id),
            Cell::new(round.recorded_at.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(level),
            Cell::new(result.metadata.item_count),
            Cell::new(result.errors),
            Cell::new(if result.correct { "yes" } else { "no" }),
            Cell::new(format!("{:.0}%", result.accuracy() * 100.0)),
            Cell::new(format!("{:.2}", result.metadata.elapsed_secs)),
        ]);
    }

    println!("{table}");

    let correct = rounds.iter().filter(|r| r.result.correct).count();
    println!(
        "\n{correct}/{} shown rounds correct ({} stored in total)",
        rounds.len(),
        store.round_count()?
    );
    Ok(())
}
