//! Reveal animation configuration.
//!
//! A reveal turns a scrambled, cipher-looking string into its plaintext over
//! wall-clock time. These types describe *what* to reveal and *when*; the
//! state machine that drives it lives in the engine.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::ui::{RevealPhase, normalized_progress};

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(200);
pub const DEFAULT_REVEAL_DURATION: Duration = Duration::from_millis(1200);

/// 20Hz: coarser than the render cadence so the scramble reads as flicker, not noise.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(50);

/// Chance that an unrevealed position is redrawn on a given tick.
pub const FLICKER_PROBABILITY: f64 = 0.2;

/// Punctuation, uppercase letters and digits (58 symbols).
pub const DEFAULT_ALPHABET: &str = "!@#$%^&*()_+-=<>?/{}[]ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingField {
    Delay,
    Duration,
}

impl fmt::Display for TimingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingField::Delay => f.write_str("reveal delay"),
            TimingField::Duration => f.write_str("reveal duration"),
        }
    }
}

/// Negative timings are rejected, never clamped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimingError {
    #[error("{field} must be non-negative, got {value}ms")]
    Negative { field: TimingField, value: i64 },
}

/// When a reveal starts and how long it takes.
///
/// `Duration` is unsigned, so any constructed value is valid. Signed input
/// (config files, user flags) goes through [`RevealTiming::from_millis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealTiming {
    delay: Duration,
    duration: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_DELAY, DEFAULT_REVEAL_DURATION)
    }
}

impl RevealTiming {
    #[must_use]
    pub const fn new(delay: Duration, duration: Duration) -> Self {
        Self { delay, duration }
    }

    pub fn from_millis(delay_ms: i64, duration_ms: i64) -> Result<Self, TimingError> {
        let delay = non_negative(TimingField::Delay, delay_ms)?;
        let duration = non_negative(TimingField::Duration, duration_ms)?;
        Ok(Self::new(delay, duration))
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Elapsed time at which the target is fully shown.
    #[must_use]
    pub const fn total(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }

    #[must_use]
    pub fn phase_at(&self, elapsed: Duration) -> RevealPhase {
        if elapsed < self.delay {
            return RevealPhase::Scrambled;
        }
        if elapsed >= self.total() {
            return RevealPhase::Complete;
        }
        RevealPhase::Revealing {
            progress: normalized_progress(elapsed - self.delay, self.duration),
        }
    }

    /// Number of leading positions of a `len`-char target shown as plaintext.
    ///
    /// Integer math: `floor((elapsed - delay) / duration * len)`, saturating at `len`.
    #[must_use]
    pub fn reveal_count(&self, elapsed: Duration, len: usize) -> usize {
        if elapsed < self.delay {
            return 0;
        }
        if elapsed >= self.total() {
            return len;
        }
        let into = (elapsed - self.delay).as_nanos();
        let span = self.duration.as_nanos();
        let count = into.saturating_mul(len as u128) / span;
        usize::try_from(count).map_or(len, |count| count.min(len))
    }
}

fn non_negative(field: TimingField, value: i64) -> Result<Duration, TimingError> {
    u64::try_from(value)
        .map(Duration::from_millis)
        .map_err(|_| TimingError::Negative { field, value })
}

/// Immutable description of a single reveal.
///
/// Two configs compare equal only when the target text and both timings
/// match; any difference means the animation restarts from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevealConfig {
    text: String,
    timing: RevealTiming,
}

impl RevealConfig {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timing: RevealTiming::default(),
        }
    }

    #[must_use]
    pub fn with_timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn timing(&self) -> RevealTiming {
        self.timing
    }

    /// Target length in chars, which is also the display length.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("cipher alphabet must contain at least one symbol")]
    Empty,
}

/// Symbols drawn for scrambled positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherAlphabet(Vec<char>);

impl Default for CipherAlphabet {
    fn default() -> Self {
        Self(DEFAULT_ALPHABET.chars().collect())
    }
}

impl CipherAlphabet {
    pub fn new(symbols: &str) -> Result<Self, AlphabetError> {
        let mut chars: Vec<char> = symbols.chars().filter(|c| !c.is_whitespace()).collect();
        chars.sort_unstable();
        chars.dedup();
        if chars.is_empty() {
            return Err(AlphabetError::Empty);
        }
        Ok(Self(chars))
    }

    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; construction rejects empty sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    /// Symbol at `index`, wrapping around the set.
    #[must_use]
    pub fn symbol(&self, index: usize) -> char {
        self.0[index % self.0.len()]
    }
}
