//! Domain types: daily price bars, price series and return series.

pub mod bar;
pub mod returns;
pub mod series;

pub use bar::PriceBar;
pub use returns::{DailyReturn, ReturnSeries};
pub use series::{PriceSeries, SeriesError};

/// Build a series from close prices on consecutive calendar days, for tests.
///
/// open = previous close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_series(symbol: &str, closes: &[f64]) -> PriceSeries {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect();
    PriceSeries::new(symbol, bars).unwrap()
}
