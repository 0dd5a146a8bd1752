//! CSV file cache for fetched price series.
//!
//! Layout: `{data_dir}/{name}.csv`, one file per series, header
//! `Date,Open,High,Low,Close,Volume`. The date column is the row key.
//!
//! Policy:
//! - An existing entry is reused until the caller asks for a refresh (no TTL)
//! - A provider fault or an empty fetch is logged and reported as
//!   `DataError::Unavailable`; nothing is written and no stale entry is served
//! - Writes go straight to the target file (no temp-file rename)

use super::provider::PriceProvider;
use crate::domain::{PriceBar, PriceSeries, SeriesError};
use chrono::NaiveDate;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default cache key for the market index series.
pub const DEFAULT_INDEX_KEY: &str = "sp500";

/// Why a series could not be obtained from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableCause {
    /// The fetch completed but returned no rows.
    Empty,
    /// The provider raised an error; carries its message.
    Provider(String),
    /// The cache was opened without a provider.
    Offline,
}

impl fmt::Display for UnavailableCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "provider returned no rows"),
            Self::Provider(msg) => write!(f, "{msg}"),
            Self::Offline => write!(f, "cache has no provider"),
        }
    }
}

/// Errors from the cache layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unable to get data for '{name}' from the web ({cause}); please check connection")]
    Unavailable { name: String, cause: UnavailableCause },

    #[error("invalid cache key '{0}'")]
    InvalidKey(String),

    #[error("no cached data for '{0}'")]
    NotCached(String),

    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache file format error: {0}")]
    Csv(#[from] csv::Error),

    #[error("cached series is invalid: {0}")]
    Series(#[from] SeriesError),
}

/// Summary of one cache entry, for status reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub name: String,
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Named price series persisted as CSV files, backed by a provider.
pub struct DataCache {
    data_dir: PathBuf,
    index_key: String,
    provider: Option<Box<dyn PriceProvider>>,
}

impl DataCache {
    pub fn new(data_dir: impl Into<PathBuf>, provider: Box<dyn PriceProvider>) -> Self {
        Self {
            data_dir: data_dir.into(),
            index_key: DEFAULT_INDEX_KEY.to_string(),
            provider: Some(provider),
        }
    }

    /// A cache that only reads what is already on disk. Misses are `Unavailable`.
    pub fn offline(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            index_key: DEFAULT_INDEX_KEY.to_string(),
            provider: None,
        }
    }

    /// Use a different reserved key for the market index series.
    pub fn with_index_key(mut self, index_key: impl Into<String>) -> Self {
        self.index_key = index_key.into();
        self
    }

    /// Root directory of the cache.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The reserved key under which the index series is cached.
    pub fn index_key(&self) -> &str {
        &self.index_key
    }

    /// Path of the file backing `name`: `{data_dir}/{name}.csv`.
    pub fn entry_path(&self, name: &str) -> Result<PathBuf, DataError> {
        validate_key(name)?;
        Ok(self.data_dir.join(format!("{name}.csv")))
    }

    /// Whether an entry for `name` exists on disk.
    pub fn contains(&self, name: &str) -> bool {
        self.entry_path(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Return the series for `name`, reading the cache or fetching `[start, today]`.
    ///
    /// The index series is requested when `name` is the reserved index key.
    pub fn get_series(
        &self,
        name: &str,
        start: NaiveDate,
        refresh: bool,
    ) -> Result<PriceSeries, DataError> {
        let path = self.entry_path(name)?;
        if !refresh && path.is_file() {
            tracing::debug!("already have {name}");
            return self.load(name);
        }

        let Some(provider) = &self.provider else {
            tracing::error!("{name} is not cached and no provider is configured");
            return Err(DataError::Unavailable {
                name: name.to_string(),
                cause: UnavailableCause::Offline,
            });
        };

        let end = chrono::Local::now().date_naive();
        tracing::info!(
            provider = provider.name(),
            "fetching {name} from {start} to {end}"
        );

        let fetched = if name == self.index_key {
            provider.fetch_index(start, end)
        } else {
            provider.fetch(name, start, end)
        };

        let series = match fetched {
            Ok(series) => series,
            Err(e) => {
                tracing::error!("error fetching {name}: {e}");
                return Err(DataError::Unavailable {
                    name: name.to_string(),
                    cause: UnavailableCause::Provider(e.to_string()),
                });
            }
        };

        if series.is_empty() {
            tracing::error!("unable to get {name} from the web; please check connection");
            return Err(DataError::Unavailable {
                name: name.to_string(),
                cause: UnavailableCause::Empty,
            });
        }

        let partial = series.bars().iter().filter(|b| b.is_void()).count();
        if partial > 0 {
            tracing::warn!("{name}: {partial} rows with missing prices");
        }

        // Stored under the cache key, not the provider's symbol.
        let series = PriceSeries::new(name, series.into_bars())?;
        self.save(&series, name)?;
        Ok(series)
    }

    /// Overwrite the entry for `name` with `series`.
    pub fn save(&self, series: &PriceSeries, name: &str) -> Result<(), DataError> {
        let path = self.entry_path(name)?;
        fs::create_dir_all(&self.data_dir)?;

        let mut writer = csv::Writer::from_path(&path)?;
        if series.is_empty() {
            writer.write_record(["Date", "Open", "High", "Low", "Close", "Volume"])?;
        }
        for bar in series.bars() {
            writer.serialize(bar)?;
        }
        writer.flush()?;

        tracing::info!("save completed for {name} ({} rows)", series.len());
        Ok(())
    }

    /// Read the entry for `name` from disk.
    pub fn load(&self, name: &str) -> Result<PriceSeries, DataError> {
        let path = self.entry_path(name)?;
        if !path.is_file() {
            return Err(DataError::NotCached(name.to_string()));
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let bars = reader
            .deserialize::<PriceBar>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceSeries::new(name, bars)?)
    }

    /// All entries currently in the cache, sorted by name.
    ///
    /// Files that fail to parse are skipped with a warning.
    pub fn entries(&self) -> Result<Vec<CacheEntry>, DataError> {
        if !self.data_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&self.data_dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match self.load(name) {
                Ok(series) => entries.push(CacheEntry {
                    name: name.to_string(),
                    rows: series.len(),
                    first_date: series.first().map(|b| b.date),
                    last_date: series.last().map(|b| b.date),
                }),
                Err(e) => tracing::warn!("skipping unreadable cache file {}: {e}", path.display()),
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Keys become file names, so they are restricted to a portable character set.
fn validate_key(name: &str) -> Result<(), DataError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '^' | '=');
    if name.is_empty() || name.starts_with('.') || !name.chars().all(allowed) {
        return Err(DataError::InvalidKey(name.to_string()));
    }
    Ok(())
}
