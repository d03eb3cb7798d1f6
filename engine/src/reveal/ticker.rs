use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use stealthfolio_types::{CipherAlphabet, DEFAULT_TICK_PERIOD, FLICKER_PROBABILITY, RevealConfig};

use super::animator::{RevealAnimator, TickOutcome};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevealError {
    #[error("reveal ticker needs a running tokio runtime")]
    NoRuntime,
    #[error("tick period must be greater than zero")]
    ZeroTickPeriod,
}

/// How a ticker schedules and scrambles, shared by every slot on a page.
#[derive(Debug, Clone)]
pub struct TickerSettings {
    pub tick_period: Duration,
    pub flicker: f64,
    pub alphabet: CipherAlphabet,
    /// Publish the plaintext immediately and never schedule a tick.
    pub reduced_motion: bool,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            flicker: FLICKER_PROBABILITY,
            alphabet: CipherAlphabet::default(),
            reduced_motion: false,
        }
    }
}

/// Snapshot published after every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealFrame {
    pub text: String,
    pub revealed: usize,
    pub complete: bool,
}

impl From<&RevealAnimator> for RevealFrame {
    fn from(animator: &RevealAnimator) -> Self {
        Self {
            text: animator.display().to_string(),
            revealed: animator.revealed(),
            complete: animator.is_complete(),
        }
    }
}

/// A running reveal: one animator ticking on its own tokio interval.
///
/// The ticker is the only owner of the task handle. The task is aborted on
/// [`stop`](Self::stop), on [`reconfigure`](Self::reconfigure) and on drop,
/// and it exits by itself once the reveal completes. The animator lives
/// inside the task, so nothing else can touch its buffer.
#[derive(Debug)]
pub struct RevealTicker {
    config: RevealConfig,
    settings: TickerSettings,
    frames: watch::Receiver<RevealFrame>,
    task: Option<JoinHandle<()>>,
}

impl RevealTicker {
    /// Tick once synchronously, then hand the animator to a spawned task.
    ///
    /// The first frame is readable as soon as this returns, before the
    /// interval fires.
    pub fn start(config: RevealConfig, settings: TickerSettings) -> Result<Self, RevealError> {
        let runtime = Handle::try_current().map_err(|_| RevealError::NoRuntime)?;
        if settings.tick_period.is_zero() {
            return Err(RevealError::ZeroTickPeriod);
        }

        let mut rng = StdRng::from_rng(&mut rand::rng());
        let mut animator = RevealAnimator::new(config.clone(), settings.alphabet.clone(), &mut rng)
            .with_flicker(settings.flicker);

        let started = Instant::now();
        if settings.reduced_motion {
            animator.finish();
        } else {
            animator.tick(started.into_std(), &mut rng);
        }

        let (tx, frames) = watch::channel(RevealFrame::from(&animator));

        if animator.is_complete() {
            tracing::debug!(chars = config.char_len(), "Reveal complete without ticking");
            return Ok(Self {
                config,
                settings,
                frames,
                task: None,
            });
        }

        let period = settings.tick_period;
        tracing::debug!(
            chars = config.char_len(),
            delay_ms = config.timing().delay().as_millis(),
            duration_ms = config.timing().duration().as_millis(),
            period_ms = period.as_millis(),
            "Reveal ticker started"
        );

        let task = runtime.spawn(async move {
            let mut ticks = interval_at(started + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticks.tick().await;
                let outcome = animator.tick(Instant::now().into_std(), &mut rng);
                if tx.send(RevealFrame::from(&animator)).is_err() {
                    break;
                }
                if outcome == TickOutcome::Complete {
                    tracing::debug!("Reveal complete");
                    break;
                }
            }
        });

        Ok(Self {
            config,
            settings,
            frames,
            task: Some(task),
        })
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Latest published text.
    pub fn display(&self) -> String {
        self.frames.borrow().text.clone()
    }

    pub fn frame(&self) -> RevealFrame {
        self.frames.borrow().clone()
    }

    pub fn is_complete(&self) -> bool {
        self.frames.borrow().complete
    }

    /// Whether a timer task is still scheduled.
    pub fn is_ticking(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Receiver for frame updates. Closed once this run is stopped or replaced.
    pub fn subscribe(&self) -> watch::Receiver<RevealFrame> {
        self.frames.clone()
    }

    /// Cancel the timer. Safe to call repeatedly; only the first call aborts.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take()
            && !task.is_finished()
        {
            task.abort();
            tracing::debug!("Reveal ticker cancelled");
        }
    }

    /// Restart with `config` if it differs from the running one.
    ///
    /// The old timer is cancelled before any new state is built, so a stale
    /// tick can never land on the new run. Returns `true` on restart.
    pub fn reconfigure(&mut self, config: RevealConfig) -> Result<bool, RevealError> {
        if config == self.config {
            return Ok(false);
        }
        self.restart_with(config)?;
        Ok(true)
    }

    /// Restart the current config with a fresh buffer.
    pub fn replay(&mut self) -> Result<(), RevealError> {
        self.restart_with(self.config.clone())
    }

    fn restart_with(&mut self, config: RevealConfig) -> Result<(), RevealError> {
        self.stop();
        *self = Self::start(config, self.settings.clone())?;
        Ok(())
    }
}

impl Drop for RevealTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stealthfolio_types::RevealTiming;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn config(text: &str, delay: u64, duration: u64) -> RevealConfig {
        RevealConfig::new(text).with_timing(RevealTiming::new(ms(delay), ms(duration)))
    }

    #[test]
    fn start_without_runtime_fails() {
        let err = RevealTicker::start(config("x", 0, 100), TickerSettings::default()).unwrap_err();
        assert_eq!(err, RevealError::NoRuntime);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_tick_period_is_rejected() {
        let settings = TickerSettings {
            tick_period: Duration::ZERO,
            ..TickerSettings::default()
        };
        let err = RevealTicker::start(config("x", 0, 100), settings).unwrap_err();
        assert_eq!(err, RevealError::ZeroTickPeriod);
    }

    #[tokio::test(start_paused = true)]
    async fn first_frame_is_available_immediately() {
        let ticker =
            RevealTicker::start(config("hidden", 200, 1200), TickerSettings::default()).unwrap();
        let frame = ticker.frame();
        assert_eq!(frame.text.chars().count(), 6);
        assert_eq!(frame.revealed, 0);
        assert!(!frame.complete);
        assert!(ticker.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn two_char_scenario_on_fifty_ms_ticks() {
        let ticker = RevealTicker::start(config("AB", 0, 100), TickerSettings::default()).unwrap();
        assert_eq!(ticker.frame().revealed, 0);

        tokio::time::sleep(ms(60)).await;
        let frame = ticker.frame();
        assert_eq!(frame.revealed, 1);
        assert!(frame.text.starts_with('A'));
        assert_eq!(frame.text.chars().count(), 2);

        tokio::time::sleep(ms(60)).await;
        tokio::task::yield_now().await;
        assert_eq!(ticker.display(), "AB");
        assert!(ticker.is_complete());
        assert!(!ticker.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn instant_reveal_never_schedules() {
        let ticker = RevealTicker::start(config("now", 0, 0), TickerSettings::default()).unwrap();
        assert_eq!(ticker.display(), "now");
        assert!(ticker.is_complete());
        assert!(!ticker.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn reduced_motion_shows_plaintext() {
        let settings = TickerSettings {
            reduced_motion: true,
            ..TickerSettings::default()
        };
        let ticker = RevealTicker::start(config("calm", 200, 1200), settings).unwrap();
        assert_eq!(ticker.display(), "calm");
        assert!(!ticker.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_every_tick_until_complete() {
        let ticker =
            RevealTicker::start(config("abcd", 0, 200), TickerSettings::default()).unwrap();
        let mut rx = ticker.subscribe();

        let mut revealed = Vec::new();
        while rx.changed().await.is_ok() {
            let frame = rx.borrow_and_update().clone();
            assert_eq!(frame.text.chars().count(), 4);
            revealed.push(frame.revealed);
            if frame.complete {
                break;
            }
        }
        assert_eq!(revealed, vec![1, 2, 3, 4]);
        assert_eq!(ticker.display(), "abcd");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_freezes_output() {
        let mut ticker =
            RevealTicker::start(config("frozen", 0, 1000), TickerSettings::default()).unwrap();
        tokio::time::sleep(ms(120)).await;

        ticker.stop();
        ticker.stop();
        let frozen = ticker.frame();
        tokio::time::sleep(ms(2000)).await;
        assert_eq!(ticker.frame(), frozen);
        assert!(!ticker.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_ticker_releases_timer() {
        let ticker =
            RevealTicker::start(config("gone", 0, 5000), TickerSettings::default()).unwrap();
        let mut rx = ticker.subscribe();
        drop(ticker);

        // Sender lives in the aborted task, so the channel closes.
        loop {
            if rx.changed().await.is_err() {
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reconfigure_restarts_with_new_target() {
        let mut ticker = RevealTicker::start(
            config("the first target", 0, 200),
            TickerSettings::default(),
        )
        .unwrap();
        let mut old = ticker.subscribe();
        tokio::time::sleep(ms(120)).await;
        assert!(ticker.frame().revealed > 0);

        assert!(ticker.reconfigure(config("next", 0, 200)).unwrap());
        let frame = ticker.frame();
        assert_eq!(frame.revealed, 0);
        assert_eq!(frame.text.chars().count(), 4);
        assert_eq!(ticker.config().text(), "next");

        // The superseded run can no longer publish.
        loop {
            if old.changed().await.is_err() {
                break;
            }
        }

        tokio::time::sleep(ms(250)).await;
        assert_eq!(ticker.display(), "next");
    }

    #[tokio::test(start_paused = true)]
    async fn reconfigure_with_same_config_keeps_running() {
        let mut ticker =
            RevealTicker::start(config("steady", 0, 1000), TickerSettings::default()).unwrap();
        tokio::time::sleep(ms(520)).await;
        let before = ticker.frame().revealed;

        assert!(!ticker.reconfigure(config("steady", 0, 1000)).unwrap());
        assert_eq!(ticker.frame().revealed, before);
        assert!(ticker.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn replay_resets_completed_reveal() {
        let mut ticker =
            RevealTicker::start(config("again", 0, 100), TickerSettings::default()).unwrap();
        tokio::time::sleep(ms(150)).await;
        assert!(ticker.is_complete());

        ticker.replay().unwrap();
        assert!(!ticker.is_complete());
        assert_eq!(ticker.frame().revealed, 0);
        assert!(ticker.is_ticking());
    }
}
