//! Derived statistics over price series.
//!
//! Everything here is a pure function of its inputs: price series in,
//! returns, statistics or a regression fit out. Nothing is cached; callers
//! recompute on demand.

pub mod analyzer;
pub mod candles;
pub mod moving_average;
pub mod regression;
pub mod returns;
pub mod stats;

pub use analyzer::StockAnalyzer;
pub use candles::{resample_candles, Candle};
pub use moving_average::moving_average;
pub use regression::{fit, FitDiagnostics, RegressionResult};
pub use returns::returns_of;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from derived-statistic computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("historical prices unavailable for '{symbol}' (series is empty)")]
    EmptySeries { symbol: String },

    #[error(
        "return series are not date-aligned (asset has {asset_len} points, index has {index_len}{})",
        mismatch_note(.first_mismatch)
    )]
    MisalignedSeries {
        asset_len: usize,
        index_len: usize,
        first_mismatch: Option<NaiveDate>,
    },

    #[error("regression needs at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("index returns have zero variance; slope is undefined")]
    DegenerateRegressor,

    #[error("{series} return on {date} is not finite")]
    NonFiniteObservation { series: String, date: NaiveDate },
}

fn mismatch_note(first_mismatch: &Option<NaiveDate>) -> String {
    first_mismatch
        .map(|d| format!("; dates diverge at asset date {d}"))
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-9;

#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "expected {expected}, got {actual} (epsilon {epsilon})"
    );
}
