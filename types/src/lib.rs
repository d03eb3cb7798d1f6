//! Core domain types for Stealthfolio.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod reveal;
pub mod ui;

pub use reveal::{
    AlphabetError, CipherAlphabet, DEFAULT_ALPHABET, DEFAULT_REVEAL_DELAY, DEFAULT_REVEAL_DURATION,
    DEFAULT_TICK_PERIOD, FLICKER_PROBABILITY, RevealConfig, RevealTiming, TimingError, TimingField,
};
