//! Candlestick resampling.
//!
//! Daily bars are grouped into fixed calendar-day buckets anchored at the
//! first bar's date: bucket `k` covers `[first + k*d, first + (k+1)*d)`.
//! Buckets with no trading days are skipped rather than emitted empty.

use crate::domain::PriceSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated OHLCV for one bucket, stamped with the bucket start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub start: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Resample daily bars into `bucket_days`-wide candles.
///
/// open = first open, high = max high, low = min low, close = last close,
/// volume = summed volume. The bucket range comes from the daily highs and
/// lows, not only from the closes, so candles are wider than a close-only
/// OHLC resample. A zero bucket width is treated as one day.
pub fn resample_candles(series: &PriceSeries, bucket_days: u32) -> Vec<Candle> {
    let Some(first) = series.first() else {
        return Vec::new();
    };
    let width = i64::from(bucket_days.max(1));
    let anchor = first.date;

    let mut candles: Vec<(i64, Candle)> = Vec::new();
    for bar in series.bars() {
        let bucket = (bar.date - anchor).num_days() / width;
        match candles.last_mut() {
            Some((current, candle)) if *current == bucket => {
                candle.high = candle.high.max(bar.high);
                candle.low = candle.low.min(bar.low);
                candle.close = bar.close;
                candle.volume += bar.volume;
            }
            _ => candles.push((
                bucket,
                Candle {
                    start: anchor + chrono::Duration::days(bucket * width),
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume,
                },
            )),
        }
    }

    candles.into_iter().map(|(_, c)| c).collect()
}
