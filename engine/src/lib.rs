//! Core engine for Stealthfolio - reveal animations and landing page state.
//!
//! This crate contains the App without TUI dependencies.

use chrono::Datelike;

mod config;
pub mod landing;
mod reveal;

pub use landing::Section;

pub use config::{
    AppConfig, ConfigError, ResolvedConfig, RevealSection, SlotConfig, StealthfolioConfig,
    config_path, expand_env_vars, ui_options_with_env,
};
pub use reveal::{
    RevealAnimator, RevealError, RevealFrame, RevealTicker, TickOutcome, TickerSettings,
};
pub use stealthfolio_types::ui::{RevealPhase, UiOptions};
pub use stealthfolio_types::{CipherAlphabet, RevealConfig, RevealTiming, TimingError};

/// The animated text positions on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealSlot {
    Headline,
    Payload,
}

/// Landing page state: one running reveal per slot plus the section in view.
///
/// Each slot's ticker owns its timer; dropping the `App` cancels both.
#[derive(Debug)]
pub struct App {
    options: UiOptions,
    headline: RevealTicker,
    payload: RevealTicker,
    section: Section,
    copyright_year: i32,
    tick: usize,
    /// Shown only while a reveal is running.
    status_message: Option<String>,
}

impl App {
    /// Start both reveals. Must be called from inside a tokio runtime.
    pub fn new(config: ResolvedConfig) -> Result<Self, RevealError> {
        let ResolvedConfig {
            ui,
            ticker,
            headline,
            payload,
        } = config;

        let headline = RevealTicker::start(headline, ticker.clone())?;
        let payload = RevealTicker::start(payload, ticker)?;
        tracing::info!(
            high_contrast = ui.high_contrast,
            reduced_motion = ui.reduced_motion,
            "Landing page started"
        );

        Ok(Self {
            options: ui,
            headline,
            payload,
            section: Section::default(),
            copyright_year: chrono::Local::now().year(),
            tick: 0,
            status_message: None,
        })
    }

    /// Pin the footer year instead of reading the clock.
    #[must_use]
    pub fn with_copyright_year(mut self, year: i32) -> Self {
        self.copyright_year = year;
        self
    }

    pub fn copyright_year(&self) -> i32 {
        self.copyright_year
    }

    pub fn ui_options(&self) -> UiOptions {
        self.options
    }

    fn ticker(&self, slot: RevealSlot) -> &RevealTicker {
        match slot {
            RevealSlot::Headline => &self.headline,
            RevealSlot::Payload => &self.payload,
        }
    }

    /// Text to render for `slot` right now.
    pub fn slot_text(&self, slot: RevealSlot) -> String {
        self.ticker(slot).display()
    }

    pub fn slot_frame(&self, slot: RevealSlot) -> RevealFrame {
        self.ticker(slot).frame()
    }

    pub fn slot_config(&self, slot: RevealSlot) -> &RevealConfig {
        self.ticker(slot).config()
    }

    /// True once every slot shows its plaintext.
    pub fn is_settled(&self) -> bool {
        self.headline.is_complete() && self.payload.is_complete()
    }

    /// Increment the frame counter and drop the status once everything settled.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.status_message.is_some() && self.is_settled() {
            self.status_message = None;
        }
    }

    pub fn tick_count(&self) -> usize {
        self.tick
    }

    /// Re-run both reveals from a fresh scramble.
    pub fn replay(&mut self) -> Result<(), RevealError> {
        self.headline.replay()?;
        self.payload.replay()?;
        tracing::debug!("Replaying landing reveals");
        self.set_status("Replaying");
        Ok(())
    }

    /// Swap the headline for the next tagline, restarting its reveal.
    pub fn cycle_headline(&mut self) -> Result<(), RevealError> {
        let current = self.headline.config();
        let next =
            RevealConfig::new(landing::next_tagline(current.text())).with_timing(current.timing());
        tracing::debug!(headline = next.text(), "Cycling headline");
        self.headline.reconfigure(next)?;
        self.clear_status();
        Ok(())
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Switch the view. The hero reveals keep running underneath.
    pub fn select_section(&mut self, section: Section) {
        if section != self.section {
            tracing::debug!(?section, "Showing section");
            self.section = section;
        }
    }

    pub fn next_section(&mut self) {
        self.select_section(self.section.next());
    }

    pub fn prev_section(&mut self) {
        self.select_section(self.section.prev());
    }

    /// Current status, hidden once every reveal has settled.
    pub fn status_message(&self) -> Option<&str> {
        if self.is_settled() {
            return None;
        }
        self.status_message.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Cancel every running timer.
    pub fn shutdown(&mut self) {
        self.headline.stop();
        self.payload.stop();
        tracing::info!(frames = self.tick, "Landing page stopped");
    }
}
