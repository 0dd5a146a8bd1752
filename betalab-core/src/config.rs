//! Analyzer configuration.
//!
//! Every field has a default, so an absent or partial TOML file is valid.
//! The logging section is read by the binary when it installs its
//! subscriber; the library itself never touches global logging state.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory holding one CSV file per cached series.
    pub data_dir: PathBuf,
    /// Cache key reserved for the market index series.
    pub index_key: String,
    /// Provider symbol of the market index.
    pub index_symbol: String,
    /// History length when no start date is given, in business days.
    pub lookback_business_days: u32,
    /// Short moving-average window (trading days).
    pub short_window: usize,
    /// Long moving-average window (trading days).
    pub long_window: usize,
    /// Candlestick bucket width in calendar days.
    pub candle_bucket_days: u32,
    pub provider: ProviderConfig,
    pub log: LogConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("asset_data"),
            index_key: crate::data::DEFAULT_INDEX_KEY.to_string(),
            index_symbol: crate::data::DEFAULT_INDEX_SYMBOL.to_string(),
            lookback_business_days: 252,
            short_window: 14,
            long_window: 42,
            candle_bucket_days: 4,
            provider: ProviderConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Start date used when the caller doesn't supply one.
    pub fn default_start(&self, today: NaiveDate) -> NaiveDate {
        business_days_before(today, self.lookback_business_days)
    }
}

/// HTTP settings for the price provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
        }
    }
}

/// Log output settings, consumed by the binary's subscriber setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `betalab_core=debug`.
    pub level: String,
    /// Colored output.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            ansi: true,
        }
    }
}

/// Step back `n` business days (Monday to Friday) from `date`.
///
/// Holidays are not modeled. Starting on a weekend, the first step lands on
/// the preceding Friday.
pub fn business_days_before(date: NaiveDate, n: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = n;
    while remaining > 0 {
        let Some(prev) = current.pred_opt() else {
            break;
        };
        current = prev;
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            remaining -= 1;
        }
    }
    current
}
