//! Ctrl+C during `recall play`.
//!
//! SIGINT is taken off the default handler and delivered to a watcher
//! thread, which records the interrupt, tells the player and exits with
//! status 130.

use std::io::{self, Write};

use anyhow::Result;
use recall_core::persistence::{LogLevel, RoundStore};
use tracing::{info, warn};

/// Exit status after SIGINT (128 + 2).
#[cfg(unix)]
const EXIT_INTERRUPTED: i32 = 130;

/// Event log message for an interrupted session.
const INTERRUPTED_EVENT: &str = "Program interrupted by user";

/// Record the interrupt in `store` (if any) and say goodbye on `out`.
pub fn report(store: Option<&RoundStore>, out: &mut impl Write) -> io::Result<()> {
    info!("Session interrupted");
    if let Some(store) = store {
        if let Err(e) = store.log_event(LogLevel::Info, INTERRUPTED_EVENT) {
            warn!(error = %e, "Failed writing event log");
        }
    }
    writeln!(out, "\nInterrupted. Exiting.")?;
    out.flush()
}

/// Watch for SIGINT. On the first one, `open_store` supplies the store the
/// event goes to, [`report`] runs against stdout and the process exits.
///
/// The store is opened on the watcher thread: a SQLite connection cannot be
/// shared with the game loop.
#[cfg(unix)]
pub fn install<F>(open_store: F) -> Result<()>
where
    F: FnOnce() -> Option<RoundStore> + Send + 'static,
{
    use signal_hook::consts::SIGINT;
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT])?;
    std::thread::Builder::new()
        .name("recall-sigint".to_string())
        .spawn(move || {
            if signals.forever().next().is_some() {
                let store = open_store();
                if let Err(e) = report(store.as_ref(), &mut io::stdout()) {
                    warn!(error = %e, "Failed reporting interrupt");
                }
                std::process::exit(EXIT_INTERRUPTED);
            }
        })?;
    Ok(())
}

/// Ctrl+C keeps its default behaviour off Unix.
#[cfg(not(unix))]
pub fn install<F>(_open_store: F) -> Result<()>
where
    F: FnOnce() -> Option<RoundStore> + Send + 'static,
{
    Ok(())
}
