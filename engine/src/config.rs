use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use stealthfolio_types::ui::UiOptions;
use stealthfolio_types::{AlphabetError, CipherAlphabet, RevealConfig, RevealTiming, TimingError};

use crate::landing;
use crate::reveal::TickerSettings;

const REDUCED_MOTION_ENV: &str = "STEALTHFOLIO_REDUCED_MOTION";

/// Contents of `~/.stealthfolio/config.toml`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct StealthfolioConfig {
    pub app: Option<AppConfig>,
    pub reveal: Option<RevealSection>,
    pub headline: Option<SlotConfig>,
    pub payload: Option<SlotConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("[{slot}] {source}")]
    Timing {
        slot: &'static str,
        source: TimingError,
    },
    #[error("[reveal] alphabet: {0}")]
    Alphabet(#[from] AlphabetError),
    #[error("[reveal] tick_ms must be greater than zero")]
    ZeroTickPeriod,
    #[error("[reveal] flicker must be within 0.0..=1.0, got {0}")]
    Flicker(f64),
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Show plaintext immediately instead of animating.
    #[serde(default)]
    pub reduced_motion: bool,
}

/// Scheduling and scramble look shared by every reveal on the page.
///
/// ```toml
/// [reveal]
/// tick_ms = 50
/// flicker = 0.2
/// alphabet = "01"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct RevealSection {
    pub tick_ms: Option<u64>,
    pub flicker: Option<f64>,
    pub alphabet: Option<String>,
}

/// Override for one animated slot. Millisecond fields are signed so that
/// negative values reach validation and get rejected instead of failing as
/// a type mismatch.
#[derive(Debug, Default, Deserialize)]
pub struct SlotConfig {
    pub text: Option<String>,
    pub delay_ms: Option<i64>,
    pub duration_ms: Option<i64>,
}

impl SlotConfig {
    fn resolve(
        &self,
        slot: &'static str,
        fallback: &RevealConfig,
    ) -> Result<RevealConfig, ConfigError> {
        let text = self
            .text
            .as_deref()
            .map_or_else(|| fallback.text().to_string(), expand_env_vars);

        let base = fallback.timing();
        let delay_ms = self.delay_ms.unwrap_or_else(|| millis(base.delay()));
        let duration_ms = self.duration_ms.unwrap_or_else(|| millis(base.duration()));
        let timing = RevealTiming::from_millis(delay_ms, duration_ms)
            .map_err(|source| ConfigError::Timing { slot, source })?;

        Ok(RevealConfig::new(text).with_timing(timing))
    }
}

fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Fully validated settings the app starts from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub ui: UiOptions,
    pub ticker: TickerSettings,
    pub headline: RevealConfig,
    pub payload: RevealConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            ui: UiOptions::default(),
            ticker: TickerSettings::default(),
            headline: landing::headline(),
            payload: landing::payload(),
        }
    }
}

/// Replace `${VAR}` with the environment value (empty when unset).
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find("${") {
        let after = &rest[open + 2..];
        let Some(close) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let var = &after[..close];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Apply environment overrides on top of config-file options.
#[must_use]
pub fn ui_options_with_env(mut options: UiOptions) -> UiOptions {
    if let Ok(raw) = env::var(REDUCED_MOTION_ENV)
        && is_truthy(&raw)
    {
        options.reduced_motion = true;
    }
    options
}

impl StealthfolioConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from an explicit path. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Validate and fill defaults. Does not read the environment.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let defaults = ResolvedConfig::default();

        let ui = self
            .app
            .as_ref()
            .map(|app| UiOptions {
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default();

        let mut ticker = TickerSettings {
            reduced_motion: ui.reduced_motion,
            ..defaults.ticker
        };
        if let Some(reveal) = &self.reveal {
            if let Some(tick_ms) = reveal.tick_ms {
                if tick_ms == 0 {
                    return Err(ConfigError::ZeroTickPeriod);
                }
                ticker.tick_period = Duration::from_millis(tick_ms);
            }
            if let Some(flicker) = reveal.flicker {
                if !(0.0..=1.0).contains(&flicker) {
                    return Err(ConfigError::Flicker(flicker));
                }
                ticker.flicker = flicker;
            }
            if let Some(symbols) = &reveal.alphabet {
                ticker.alphabet = CipherAlphabet::new(symbols)?;
            }
        }

        let headline = match &self.headline {
            Some(slot) => slot.resolve("headline", &defaults.headline)?,
            None => defaults.headline,
        };
        let payload = match &self.payload {
            Some(slot) => slot.resolve("payload", &defaults.payload)?,
            None => defaults.payload,
        };

        Ok(ResolvedConfig {
            ui,
            ticker,
            headline,
            payload,
        })
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".stealthfolio").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(raw: &str) -> StealthfolioConfig {
        toml::from_str(raw).expect("valid toml")
    }

    // expand_env_vars tests

    #[test]
    fn expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars("hello world"), "hello world");
    }

    #[test]
    fn expand_env_vars_single_var() {
        unsafe {
            std::env::set_var("STEALTHFOLIO_TEST_ASSET", "WBTC");
        }
        let result = expand_env_vars("rebalance ${STEALTHFOLIO_TEST_ASSET} now");
        assert_eq!(result, "rebalance WBTC now");
        unsafe {
            std::env::remove_var("STEALTHFOLIO_TEST_ASSET");
        }
    }

    #[test]
    fn expand_env_vars_missing_var_becomes_empty() {
        unsafe {
            std::env::remove_var("STEALTHFOLIO_MISSING_FOR_TEST");
        }
        let result = expand_env_vars("before ${STEALTHFOLIO_MISSING_FOR_TEST} after");
        assert_eq!(result, "before  after");
    }

    #[test]
    fn expand_env_vars_unclosed_is_literal() {
        assert_eq!(expand_env_vars("cost ${oops"), "cost ${oops");
        assert_eq!(expand_env_vars("empty ${} var"), "empty  var");
    }

    #[test]
    fn truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" YES "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn empty_config_resolves_to_landing_defaults() {
        let resolved = parse("").resolve().unwrap();
        assert_eq!(resolved.headline, landing::headline());
        assert_eq!(resolved.payload, landing::payload());
        assert_eq!(resolved.ticker.tick_period, Duration::from_millis(50));
        assert!(!resolved.ui.reduced_motion);
    }

    #[test]
    fn slot_overrides_are_applied() {
        let resolved = parse(
            r#"
            [headline]
            text = "Private by default."
            delay_ms = 0

            [payload]
            duration_ms = 500
            "#,
        )
        .resolve()
        .unwrap();

        assert_eq!(resolved.headline.text(), "Private by default.");
        assert_eq!(resolved.headline.timing().delay(), Duration::ZERO);
        assert_eq!(
            resolved.headline.timing().duration(),
            landing::headline().timing().duration()
        );
        assert_eq!(resolved.payload.text(), landing::PAYLOAD);
        assert_eq!(
            resolved.payload.timing().duration(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn negative_timing_is_rejected() {
        let err = parse("[headline]\ndelay_ms = -10\n").resolve().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Timing {
                slot: "headline",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "[headline] reveal delay must be non-negative, got -10ms"
        );
    }

    #[test]
    fn reveal_section_is_validated() {
        assert!(matches!(
            parse("[reveal]\ntick_ms = 0\n").resolve(),
            Err(ConfigError::ZeroTickPeriod)
        ));
        assert!(matches!(
            parse("[reveal]\nflicker = 1.5\n").resolve(),
            Err(ConfigError::Flicker(_))
        ));
        assert!(matches!(
            parse("[reveal]\nalphabet = \"  \"\n").resolve(),
            Err(ConfigError::Alphabet(AlphabetError::Empty))
        ));

        let resolved = parse("[reveal]\ntick_ms = 20\nflicker = 0.5\nalphabet = \"01\"\n")
            .resolve()
            .unwrap();
        assert_eq!(resolved.ticker.tick_period, Duration::from_millis(20));
        assert!((resolved.ticker.flicker - 0.5).abs() < f64::EPSILON);
        assert_eq!(resolved.ticker.alphabet.symbols(), &['0', '1']);
    }

    #[test]
    fn app_section_flows_into_ticker() {
        let resolved = parse("[app]\nreduced_motion = true\nhigh_contrast = true\n")
            .resolve()
            .unwrap();
        assert!(resolved.ui.high_contrast);
        assert!(resolved.ticker.reduced_motion);
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = StealthfolioConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[payload]\ntext = \"{{ hidden: true }}\"").unwrap();

        let config = StealthfolioConfig::load_from(&path).unwrap().unwrap();
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.payload.text(), "{ hidden: true }");
    }

    #[test]
    fn load_from_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[headline\n").unwrap();

        let err = StealthfolioConfig::load_from(&path).unwrap_err();
        match err {
            ConfigError::Parse { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
