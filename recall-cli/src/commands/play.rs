//! The `recall play` command.

use std::io;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use recall_core::{Difficulty, RecallConfig};
use tracing::{info, warn};

use crate::interrupt;
use crate::session::{Pacing, Session};

pub fn execute(
    config: &RecallConfig,
    level: Option<Difficulty>,
    seed: Option<u64>,
    no_save: bool,
) -> Result<()> {
    let rng = match seed {
        Some(seed) => {
            info!(seed, "Using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let preset = match level {
        Some(level) => Some(level),
        None => config.game.default_difficulty()?,
    };

    let saving = config.persistence.enabled && !no_save;
    let interrupt_config = config.clone();
    interrupt::install(move || {
        if !(saving && interrupt_config.persistence.log_events) {
            return None;
        }
        super::open_store(&interrupt_config)
            .map_err(|e| warn!(error = %format!("{e:#}"), "Interrupt not recorded"))
            .ok()
    })?;

    // Stdout stays unlocked so the interrupt watcher can print.
    let mut session = Session::new(
        io::stdin().lock(),
        io::stdout(),
        rng,
        config.game.vocabulary(),
        Pacing::from(&config.display),
    )
    .with_preset(preset);

    if saving {
        // Storage failure is not fatal.
        match super::open_store(config) {
            Ok(store) => session = session.with_store(store, config.persistence.log_events),
            Err(e) => warn!(error = %format!("{e:#}"), "Rounds will not be saved"),
        }
    }

    let summary = session.run()?;
    if summary.rounds > 0 {
        println!("Session: {}/{} rounds correct.", summary.correct, summary.rounds);
    }
    Ok(())
}
