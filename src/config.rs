//! Environment-driven configuration, validated before the scanner starts.

use serde::Serialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::indicators::RsiSmoothing;

/// Minimum bar count before an instrument is evaluated at all.
pub const DEFAULT_MIN_BARS: usize = 50;

/// Largest accepted indicator window.
pub const MAX_WINDOW: usize = 10_000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}: cannot parse '{value}'")]
    Unparseable { key: &'static str, value: String },
    #[error("{key} must be positive, got {value}")]
    NonPositive { key: &'static str, value: String },
    #[error("{key} must be within (0, 100), got {value}")]
    CutoffOutOfRange { key: &'static str, value: f64 },
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Lookback windows for the three indicators plus the volume baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorWindows {
    pub sma: usize,
    pub rsi: usize,
    pub rsi_smoothing: RsiSmoothing,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub volume: usize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self {
            sma: 20,
            rsi: 14,
            rsi_smoothing: RsiSmoothing::Wilder,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            volume: 20,
        }
    }
}

impl IndicatorWindows {
    /// Index of the first bar at which every indicator is trusted.
    pub fn warmup_index(&self) -> usize {
        self.sma
            .max(self.rsi)
            .max(self.macd_slow.saturating_add(self.macd_signal))
            .max(self.volume)
            .saturating_sub(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("SMA_PERIOD", self.sma),
            ("RSI_PERIOD", self.rsi),
            ("MACD_FAST", self.macd_fast),
            ("MACD_SLOW", self.macd_slow),
            ("MACD_SIGNAL", self.macd_signal),
            ("VOLUME_PERIOD", self.volume),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive {
                    key,
                    value: value.to_string(),
                });
            }
            if value > MAX_WINDOW {
                return Err(ConfigError::Validation(format!(
                    "{} ({}) exceeds the maximum window of {}",
                    key, value, MAX_WINDOW
                )));
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::Validation(format!(
                "MACD_FAST ({}) must be below MACD_SLOW ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        Ok(())
    }
}

/// Classifier cutoffs.
///
/// `rsi_high`/`rsi_mild_high` gate the bullish tiers (RSI below), `rsi_low`/
/// `rsi_mild_low` gate the bearish tiers (RSI above).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalThresholds {
    pub rsi_high: f64,
    pub rsi_low: f64,
    pub rsi_mild_high: f64,
    pub rsi_mild_low: f64,
    pub volume_multiplier: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi_high: 30.0,
            rsi_low: 70.0,
            rsi_mild_high: 40.0,
            rsi_mild_low: 60.0,
            volume_multiplier: 1.5,
        }
    }
}

impl SignalThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("RSI_HIGH", self.rsi_high),
            ("RSI_LOW", self.rsi_low),
            ("RSI_MILD_HIGH", self.rsi_mild_high),
            ("RSI_MILD_LOW", self.rsi_mild_low),
        ] {
            if !(value > 0.0 && value < 100.0) {
                return Err(ConfigError::CutoffOutOfRange { key, value });
            }
        }
        if !(self.volume_multiplier.is_finite() && self.volume_multiplier > 0.0) {
            return Err(ConfigError::NonPositive {
                key: "VOLUME_MULTIPLIER",
                value: self.volume_multiplier.to_string(),
            });
        }
        if self.rsi_high > self.rsi_mild_high {
            return Err(ConfigError::Validation(format!(
                "RSI_HIGH ({}) must not exceed RSI_MILD_HIGH ({})",
                self.rsi_high, self.rsi_mild_high
            )));
        }
        if self.rsi_mild_low > self.rsi_low {
            return Err(ConfigError::Validation(format!(
                "RSI_MILD_LOW ({}) must not exceed RSI_LOW ({})",
                self.rsi_mild_low, self.rsi_low
            )));
        }
        Ok(())
    }
}

/// Everything the engine needs to turn bars into a tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanConfig {
    pub windows: IndicatorWindows,
    pub thresholds: SignalThresholds,
    pub min_bars: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            windows: IndicatorWindows::default(),
            thresholds: SignalThresholds::default(),
            min_bars: DEFAULT_MIN_BARS,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.windows.validate()?;
        self.thresholds.validate()?;
        if self.min_bars == 0 {
            return Err(ConfigError::NonPositive {
                key: "MIN_BARS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

/// Telegram bot credentials. Absent means alerts are only logged.
#[derive(Debug, Clone, PartialEq)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
    pub base_url: String,
}

/// Full runtime settings for the scanner binaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub environment: String,
    pub symbols: Vec<String>,
    pub scan_interval: Duration,
    pub lookback: String,
    pub bar_interval: String,
    pub scan: ScanConfig,
    pub http_port: u16,
    pub yahoo_base_url: String,
    pub telegram: Option<TelegramSettings>,
}

pub const DEFAULT_SYMBOLS: &str = "RELIANCE.NS,TCS.NS";
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TELEGRAM_BASE_URL: &str = "https://api.telegram.org";

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let symbols: Vec<String> = get("SYMBOLS")
            .unwrap_or_else(|| DEFAULT_SYMBOLS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .fold(Vec::new(), |mut acc, s| {
                if !acc.contains(&s) {
                    acc.push(s);
                }
                acc
            });
        if symbols.is_empty() {
            return Err(ConfigError::Validation("SYMBOLS is empty".to_string()));
        }

        let interval_seconds: u64 = parse_or(&get, "SCAN_INTERVAL_SECONDS", 60)?;
        if interval_seconds == 0 {
            return Err(ConfigError::NonPositive {
                key: "SCAN_INTERVAL_SECONDS",
                value: "0".to_string(),
            });
        }

        let defaults = ScanConfig::default();
        let scan = ScanConfig {
            windows: IndicatorWindows {
                sma: parse_or(&get, "SMA_PERIOD", defaults.windows.sma)?,
                rsi: parse_or(&get, "RSI_PERIOD", defaults.windows.rsi)?,
                rsi_smoothing: parse_or(&get, "RSI_SMOOTHING", defaults.windows.rsi_smoothing)?,
                macd_fast: parse_or(&get, "MACD_FAST", defaults.windows.macd_fast)?,
                macd_slow: parse_or(&get, "MACD_SLOW", defaults.windows.macd_slow)?,
                macd_signal: parse_or(&get, "MACD_SIGNAL", defaults.windows.macd_signal)?,
                volume: parse_or(&get, "VOLUME_PERIOD", defaults.windows.volume)?,
            },
            thresholds: SignalThresholds {
                rsi_high: parse_or(&get, "RSI_HIGH", defaults.thresholds.rsi_high)?,
                rsi_low: parse_or(&get, "RSI_LOW", defaults.thresholds.rsi_low)?,
                rsi_mild_high: parse_or(&get, "RSI_MILD_HIGH", defaults.thresholds.rsi_mild_high)?,
                rsi_mild_low: parse_or(&get, "RSI_MILD_LOW", defaults.thresholds.rsi_mild_low)?,
                volume_multiplier: parse_or(
                    &get,
                    "VOLUME_MULTIPLIER",
                    defaults.thresholds.volume_multiplier,
                )?,
            },
            min_bars: parse_or(&get, "MIN_BARS", defaults.min_bars)?,
        };
        scan.validate()?;

        let telegram = match (get("BOT_TOKEN"), get("CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramSettings {
                bot_token,
                chat_id,
                base_url: get("TELEGRAM_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_BASE_URL.to_string()),
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Validation(
                    "BOT_TOKEN and CHAT_ID must be set together".to_string(),
                ))
            }
        };

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or_else(|| "sandbox".to_string()),
            symbols,
            scan_interval: Duration::from_secs(interval_seconds),
            lookback: get("LOOKBACK").unwrap_or_else(|| "15d".to_string()),
            bar_interval: get("BAR_INTERVAL").unwrap_or_else(|| "30m".to_string()),
            scan,
            http_port: parse_or(&get, "HTTP_PORT", 8080)?,
            yahoo_base_url: get("YAHOO_BASE_URL")
                .unwrap_or_else(|| DEFAULT_YAHOO_BASE_URL.to_string()),
            telegram,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Unparseable {
            key,
            value: raw,
        }),
        None => Ok(default),
    }
}
