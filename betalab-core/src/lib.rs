//! betalab core — cached price series, daily returns and CAPM alpha/beta.
//!
//! This crate contains:
//! - Domain types (price bars, price series, return series)
//! - A CSV file cache in front of a pluggable price provider (Yahoo Finance)
//! - Returns, descriptive statistics and the asset-on-index OLS regression
//! - Moving averages and candlestick resampling
//! - Chart payloads for an external renderer
//! - Configuration

pub mod analysis;
pub mod chart;
pub mod config;
pub mod data;
pub mod domain;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: data and result types can cross threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::ReturnSeries>();
        require_sync::<domain::ReturnSeries>();
        require_send::<analysis::RegressionResult>();
        require_sync::<analysis::RegressionResult>();
        require_send::<analysis::StockAnalyzer>();
        require_sync::<analysis::StockAnalyzer>();
        require_send::<data::DataCache>();
        require_sync::<data::DataCache>();
        require_send::<config::AnalyzerConfig>();
        require_sync::<config::AnalyzerConfig>();
    }
}
