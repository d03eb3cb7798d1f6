use std::time::Instant;

use rand::Rng;

use stealthfolio_types::ui::RevealPhase;
use stealthfolio_types::{CipherAlphabet, FLICKER_PROBABILITY, RevealConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// More ticks are needed.
    Running,
    /// `display() == target`; no further ticks should be scheduled.
    Complete,
}

/// Explicit state for one scramble-then-reveal run.
///
/// Invariants:
/// - `display().chars().count() == config.char_len()` at all times.
/// - Positions below `revealed()` hold the target char and never change again.
/// - `revealed()` never decreases within a run.
#[derive(Debug, Clone)]
pub struct RevealAnimator {
    config: RevealConfig,
    target: Vec<char>,
    alphabet: CipherAlphabet,
    flicker: f64,
    buffer: Vec<char>,
    started_at: Option<Instant>,
    revealed: usize,
    phase: RevealPhase,
    display: String,
}

impl RevealAnimator {
    #[must_use]
    pub fn new<R: Rng + ?Sized>(
        config: RevealConfig,
        alphabet: CipherAlphabet,
        rng: &mut R,
    ) -> Self {
        let target: Vec<char> = config.text().chars().collect();
        let buffer = scramble(target.len(), &alphabet, rng);
        let display = buffer.iter().collect();
        Self {
            config,
            target,
            alphabet,
            flicker: FLICKER_PROBABILITY,
            buffer,
            started_at: None,
            revealed: 0,
            phase: RevealPhase::Scrambled,
            display,
        }
    }

    /// Per-tick, per-position redraw chance for the unrevealed tail.
    ///
    /// Clamped to `[0, 1]`; non-finite values fall back to the default.
    #[must_use]
    pub fn with_flicker(mut self, probability: f64) -> Self {
        self.flicker = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            FLICKER_PROBABILITY
        };
        self
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_complete()
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Advance to wall-clock `now`.
    ///
    /// The first call pins the start time. Calls after completion change
    /// nothing and keep returning [`TickOutcome::Complete`].
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> TickOutcome {
        if self.is_complete() {
            return TickOutcome::Complete;
        }

        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        let timing = self.config.timing();

        match timing.phase_at(elapsed) {
            // Stable during the delay: no redraws.
            RevealPhase::Scrambled => TickOutcome::Running,
            RevealPhase::Complete => {
                self.finish();
                TickOutcome::Complete
            }
            RevealPhase::Revealing { progress } => {
                let count = timing
                    .reveal_count(elapsed, self.target.len())
                    .max(self.revealed);
                // Only reachable early for an empty target.
                if count == self.target.len() {
                    self.finish();
                    return TickOutcome::Complete;
                }
                self.buffer[..count].copy_from_slice(&self.target[..count]);

                for slot in &mut self.buffer[count..] {
                    if rng.random_bool(self.flicker) {
                        *slot = draw(&self.alphabet, rng);
                    }
                }

                self.revealed = count;
                self.phase = RevealPhase::Revealing { progress };
                self.display = self.buffer.iter().collect();
                TickOutcome::Running
            }
        }
    }

    /// Jump to the terminal state.
    pub fn finish(&mut self) {
        self.buffer.clone_from(&self.target);
        self.revealed = self.target.len();
        self.phase = RevealPhase::Complete;
        self.display = self.config.text().to_string();
    }

    /// Restart from scratch with `config` if it differs from the current one.
    ///
    /// Returns `true` when a reset happened. Nothing carries over: the
    /// buffer is redrawn and the start time is cleared.
    pub fn reconfigure<R: Rng + ?Sized>(&mut self, config: RevealConfig, rng: &mut R) -> bool {
        if config == self.config {
            return false;
        }
        let flicker = self.flicker;
        let alphabet = self.alphabet.clone();
        *self = Self::new(config, alphabet, rng).with_flicker(flicker);
        true
    }
}

fn draw<R: Rng + ?Sized>(alphabet: &CipherAlphabet, rng: &mut R) -> char {
    alphabet.symbol(rng.random_range(0..alphabet.len()))
}

fn scramble<R: Rng + ?Sized>(len: usize, alphabet: &CipherAlphabet, rng: &mut R) -> Vec<char> {
    (0..len).map(|_| draw(alphabet, rng)).collect()
}
