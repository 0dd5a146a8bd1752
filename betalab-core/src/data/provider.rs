//! Price provider trait and its error type.
//!
//! The PriceProvider trait abstracts over data sources so the cache can be
//! exercised against a stub in tests. Providers don't know about the cache.

use crate::domain::{PriceSeries, SeriesError};
use chrono::NaiveDate;
use thiserror::Error;

/// Yahoo symbol for the S&P 500 index.
pub const DEFAULT_INDEX_SYMBOL: &str = "^GSPC";

/// Errors raised by a provider while fetching a series.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} for {symbol}")]
    Http { symbol: String, status: u16 },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("provider returned an invalid series: {0}")]
    InvalidSeries(#[from] SeriesError),
}

/// A source of daily price series (Yahoo Finance, fixtures, stubs).
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a symbol over `[start, end]`.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError>;

    /// Fetch the market index series over `[start, end]`.
    fn fetch_index(&self, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries, ProviderError> {
        self.fetch(DEFAULT_INDEX_SYMBOL, start, end)
    }
}
