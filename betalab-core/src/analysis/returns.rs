//! Close-to-close returns.

use super::AnalysisError;
use crate::domain::{DailyReturn, PriceSeries, ReturnSeries};

/// Fractional change between consecutive closes.
///
/// `r[i] = (close[i+1] - close[i]) / close[i]`, dated at bar `i+1`. The first
/// bar has no predecessor and produces no return, so the output has one
/// point fewer than the input.
///
/// A missing (NaN) close is filled with the last known close before the
/// change is taken. Leading missing closes have nothing to carry and stay
/// NaN.
pub fn returns_of(series: &PriceSeries) -> Result<ReturnSeries, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries {
            symbol: series.symbol().to_string(),
        });
    }

    let mut carried = f64::NAN;
    let closes: Vec<f64> = series
        .bars()
        .iter()
        .map(|bar| {
            if !bar.close.is_nan() {
                carried = bar.close;
            }
            carried
        })
        .collect();

    let points = series
        .bars()
        .iter()
        .skip(1)
        .zip(closes.windows(2))
        .map(|(bar, pair)| DailyReturn {
            date: bar.date,
            value: (pair[1] - pair[0]) / pair[0],
        })
        .collect();

    Ok(ReturnSeries {
        symbol: series.symbol().to_string(),
        points,
    })
}
