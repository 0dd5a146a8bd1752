//! PriceSeries — ordered daily bars for one symbol.
//!
//! Dates are strictly increasing. The constructor rejects anything else, so
//! every series handed to the analysis layer is already in calendar order.

use super::bar::PriceBar;
use chrono::NaiveDate;
use thiserror::Error;

/// Violations of the strictly-increasing date invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("bar dated {next} follows {prev} (dates must be increasing)")]
    OutOfOrder { prev: NaiveDate, next: NaiveDate },

    #[error("duplicate bar for {0}")]
    Duplicate(NaiveDate),
}

/// Daily OHLCV bars for a single symbol, ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from bars that are already in date order.
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for pair in bars.windows(2) {
            let (prev, next) = (pair[0].date, pair[1].date);
            if next == prev {
                return Err(SeriesError::Duplicate(next));
            }
            if next < prev {
                return Err(SeriesError::OutOfOrder { prev, next });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// Build a series from provider output in arbitrary order.
    ///
    /// Bars are sorted by date; when a date repeats, the last bar seen wins.
    pub fn from_unsorted(symbol: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.reverse();
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// A series with no bars.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn into_bars(self) -> Vec<PriceBar> {
        self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Keep only the bars whose date satisfies `keep`. Order is preserved.
    pub fn retain_dates(&self, mut keep: impl FnMut(NaiveDate) -> bool) -> Self {
        Self {
            symbol: self.symbol.clone(),
            bars: self.bars.iter().filter(|b| keep(b.date)).cloned().collect(),
        }
    }
}
