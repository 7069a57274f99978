//! The interactive training loop.
//!
//! One session is: splash → choose difficulty → rounds until the player
//! stops. A round reveals the sequence one item at a time, times the typed
//! recall, prints the verdict with a per-position diff and stores the round.
//!
//! The loop is generic over its input and output so it can be driven by a
//! script in tests.

use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use rand::rngs::StdRng;
use recall_core::config::DisplayConfig;
use recall_core::persistence::{LogLevel, RoundStore};
use recall_core::{Difficulty, RoundResult, SessionId, Vocabulary, check, generate_for, parse};
use tracing::{debug, info, warn};

const CLEAR: &str = "\x1B[2J\x1B[1;1H";
const BANNER: &str = "=== START GAME ===";

/// Terminal timings, taken from `[display]`.
#[derive(Debug, Clone)]
pub struct Pacing {
    pub splash_blinks: u32,
    pub splash_interval: Duration,
    pub intro: Duration,
    pub item_display: Duration,
    pub clear_screen: bool,
}

impl From<&DisplayConfig> for Pacing {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            splash_blinks: display.splash_blinks,
            splash_interval: Duration::from_millis(display.splash_interval_ms),
            intro: Duration::from_millis(display.intro_ms),
            item_display: Duration::from_millis(display.item_display_ms),
            clear_screen: display.clear_screen,
        }
    }
}

/// What the player asked for after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    SameLevel,
    ChooseLevel,
    Exit,
    Invalid,
}

impl Repeat {
    fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "yy" => Self::SameLevel,
            "y" => Self::ChooseLevel,
            "n" => Self::Exit,
            _ => Self::Invalid,
        }
    }
}

/// Totals reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds: usize,
    pub correct: usize,
}

/// One run of the game against an input and an output.
pub struct Session<R, W> {
    input: R,
    output: W,
    rng: StdRng,
    vocabulary: Vocabulary,
    pacing: Pacing,
    store: Option<RoundStore>,
    log_events: bool,
    preset: Option<Difficulty>,
    id: SessionId,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, rng: StdRng, vocabulary: Vocabulary, pacing: Pacing) -> Self {
        Self {
            input,
            output,
            rng,
            vocabulary,
            pacing,
            store: None,
            log_events: false,
            preset: None,
            id: SessionId::new(),
        }
    }

    /// Store rounds (and optionally game events) in `store`.
    #[must_use]
    pub fn with_store(mut self, store: RoundStore, log_events: bool) -> Self {
        self.store = Some(store);
        self.log_events = log_events;
        self
    }

    /// Skip the first difficulty prompt.
    #[must_use]
    pub fn with_preset(mut self, preset: Option<Difficulty>) -> Self {
        self.preset = preset;
        self
    }

    #[cfg(test)]
    pub fn store(&self) -> Option<&RoundStore> {
        self.store.as_ref()
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Play until the player exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal cannot be read or written.
    pub fn run(&mut self) -> Result<SessionSummary> {
        info!(session = %self.id, "Session started");
        self.splash()?;

        let mut summary = SessionSummary::default();
        let mut level = self.preset;

        loop {
            let difficulty = match level {
                Some(d) => d,
                None => match self.choose_level()? {
                    Some(d) => d,
                    None => break,
                },
            };

            let Some(result) = self.play_round(difficulty)? else {
                break;
            };
            summary.rounds += 1;
            if result.correct {
                summary.correct += 1;
            }

            let Some(answer) = self.prompt("Repeat? (yy=same level, y=choose level, n=exit): ")? else {
                break;
            };
            match Repeat::from_answer(&answer) {
                Repeat::SameLevel => {
                    level = Some(difficulty);
                    self.clear()?;
                }
                Repeat::ChooseLevel => {
                    level = None;
                    self.clear()?;
                }
                Repeat::Exit => {
                    self.event(LogLevel::Info, "User chose to exit the game");
                    writeln!(self.output, "Thanks for playing!")?;
                    break;
                }
                Repeat::Invalid => {
                    writeln!(self.output, "Invalid input. Exiting.")?;
                    break;
                }
            }
        }

        info!(
            session = %self.id,
            rounds = summary.rounds,
            correct = summary.correct,
            "Session ended"
        );
        Ok(summary)
    }

    fn splash(&mut self) -> Result<()> {
        for _ in 0..self.pacing.splash_blinks {
            self.clear()?;
            pause(self.pacing.splash_interval);
            writeln!(self.output, "{BANNER}")?;
            self.output.flush()?;
            pause(self.pacing.splash_interval);
        }
        self.clear()
    }

    /// Ask until a valid preset is chosen. `None` when input ends.
    fn choose_level(&mut self) -> Result<Option<Difficulty>> {
        let question = format!("Choose difficulty ({}): ", Difficulty::menu());
        loop {
            let Some(choice) = self.prompt(&question)? else {
                return Ok(None);
            };
            match choice.parse::<Difficulty>() {
                Ok(difficulty) => {
                    self.event(LogLevel::Info, &format!("User selected difficulty: {}", difficulty.number()));
                    return Ok(Some(difficulty));
                }
                Err(_) => writeln!(self.output, "Invalid option. Try again.")?,
            }
        }
    }

    /// Play one round. `None` when input ends before an answer is given.
    fn play_round(&mut self, difficulty: Difficulty) -> Result<Option<RoundResult>> {
        let (sequence, key) = generate_for(difficulty, &self.vocabulary, &mut self.rng)?;

        writeln!(self.output, "Try to memorize {} items:", sequence.len())?;
        self.output.flush()?;
        pause(self.pacing.intro);
        self.clear()?;

        self.event(LogLevel::Debug, &format!("Showing sequence of {} items to user", sequence.len()));
        for item in &sequence {
            writeln!(self.output, "{item}")?;
            self.output.flush()?;
            pause(self.pacing.item_display);
            self.clear()?;
        }

        let start = Instant::now();
        let Some(raw) = self.prompt("Enter the sequence you memorized, separated by commas: ")? else {
            return Ok(None);
        };
        let elapsed = start.elapsed().as_secs_f64();
        self.event(LogLevel::Debug, &format!("User raw input: {raw}"));

        let answer = parse(&raw);
        writeln!(self.output, "You took {elapsed:.2} seconds to answer.")?;
        self.event(
            LogLevel::Info,
            &format!(
                "Round finished: time={elapsed:.2}s, items={}, user_answer={answer}",
                sequence.len()
            ),
        );

        let verdict = check(&answer, &key);
        if verdict.correct {
            writeln!(self.output, "Congratulations! You got it all correct!")?;
        } else {
            writeln!(self.output, "\n Sorry, that's incorrect. The correct sequence was: {key}")?;
        }
        for detail in &verdict.details {
            let mark = if detail.correct { "✅" } else { "❌" };
            writeln!(self.output, "{} -> {} <-- {mark}", detail.submitted, detail.expected)?;
        }

        let result = RoundResult::new(sequence, answer, verdict, elapsed, Some(difficulty));
        self.save(&result);
        debug!(
            difficulty = %difficulty,
            items = result.metadata.item_count,
            errors = result.errors,
            correct = result.correct,
            "Round graded"
        );
        Ok(Some(result))
    }

    /// Print `question` and read one line. `None` at end of input.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn clear(&mut self) -> Result<()> {
        if self.pacing.clear_screen {
            write!(self.output, "{CLEAR}")?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Store a round. A storage failure never ends the game.
    fn save(&self, result: &RoundResult) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save_round(self.id, result) {
            warn!(error = %e, "Failed saving round");
            self.event(LogLevel::Error, "Failed saving round to DB");
        }
    }

    fn event(&self, level: LogLevel, message: &str) {
        debug!(level = %level, "{message}");
        if !self.log_events {
            return;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.log_event(level, message) {
                warn!(error = %e, "Failed writing event log");
            }
        }
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
