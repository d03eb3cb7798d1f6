//! Scramble-then-reveal text animation.
//!
//! [`RevealAnimator`] is the pure state machine: it owns the scrambled
//! buffer and is advanced by explicit `tick(now, rng)` calls. [`RevealTicker`]
//! puts one animator on a tokio interval and owns the task handle, so
//! dropping or reconfiguring the ticker always cancels the timer.

mod animator;
mod ticker;

pub use animator::{RevealAnimator, TickOutcome};
pub use ticker::{RevealError, RevealFrame, RevealTicker, TickerSettings};
