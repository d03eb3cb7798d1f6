use std::time::Duration;

/// Fraction of `duration` covered by `elapsed`, clamped to `[0, 1]`.
///
/// A zero duration is already finished, so it maps to `1.0` instead of NaN.
#[must_use]
pub fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

/// Where a reveal animation is in its lifecycle.
///
/// `Scrambled -> Revealing -> Complete`; only elapsed time moves it forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPhase {
    /// Waiting out the delay with a stable scrambled buffer.
    Scrambled,
    /// Copying the target left to right; `progress` is in `[0, 1)`.
    Revealing { progress: f32 },
    /// Terminal.
    Complete,
}

impl RevealPhase {
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, RevealPhase::Complete)
    }
}
