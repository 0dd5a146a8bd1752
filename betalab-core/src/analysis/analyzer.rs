//! StockAnalyzer — one ticker measured against the market index.
//!
//! Holds the two price series and nothing derived from them. Returns and the
//! regression are recomputed on every call.

use super::{candles, fit, moving_average, returns_of, stats, AnalysisError, Candle, RegressionResult};
use crate::data::{align_on_common_dates, DataCache, DataError};
use crate::domain::{PriceSeries, ReturnSeries};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct StockAnalyzer {
    ticker: String,
    asset: PriceSeries,
    index: PriceSeries,
}

impl StockAnalyzer {
    pub fn new(ticker: impl Into<String>, asset: PriceSeries, index: PriceSeries) -> Self {
        Self {
            ticker: ticker.into(),
            asset,
            index,
        }
    }

    /// Resolve the index series, then the ticker series, through the cache.
    pub fn load(
        cache: &DataCache,
        ticker: &str,
        start: NaiveDate,
        refresh: bool,
    ) -> Result<Self, DataError> {
        let index = cache.get_series(cache.index_key(), start, refresh)?;
        let asset = cache.get_series(ticker, start, refresh)?;
        Ok(Self::new(ticker, asset, index))
    }

    /// Restrict both series to their shared trading days.
    pub fn intersected(self) -> Self {
        let (asset, index) = align_on_common_dates(&self.asset, &self.index);
        Self {
            ticker: self.ticker,
            asset,
            index,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn asset(&self) -> &PriceSeries {
        &self.asset
    }

    pub fn index(&self) -> &PriceSeries {
        &self.index
    }

    pub fn asset_returns(&self) -> Result<ReturnSeries, AnalysisError> {
        returns_of(&self.asset)
    }

    pub fn index_returns(&self) -> Result<ReturnSeries, AnalysisError> {
        returns_of(&self.index)
    }

    /// Regression of asset returns on index returns.
    pub fn ols(&self) -> Result<RegressionResult, AnalysisError> {
        fit(&self.asset_returns()?, &self.index_returns()?)
    }

    pub fn alpha(&self) -> Result<f64, AnalysisError> {
        Ok(self.ols()?.alpha)
    }

    pub fn beta(&self) -> Result<f64, AnalysisError> {
        Ok(self.ols()?.beta)
    }

    /// Mean closing price of the asset.
    pub fn mean(&self) -> f64 {
        stats::mean(&self.asset.closes())
    }

    /// Sample standard deviation of the asset's closing price.
    pub fn std(&self) -> f64 {
        stats::std(&self.asset.closes())
    }

    /// Rolling means of the asset close over the two windows.
    pub fn moving_averages(&self, short: usize, long: usize) -> (Vec<f64>, Vec<f64>) {
        let closes = self.asset.closes();
        (moving_average(&closes, short), moving_average(&closes, long))
    }

    pub fn candles(&self, bucket_days: u32) -> Vec<Candle> {
        candles::resample_candles(&self.asset, bucket_days)
    }
}
