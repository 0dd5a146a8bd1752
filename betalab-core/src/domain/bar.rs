//! PriceBar — one trading day of OHLCV data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single symbol on a single day.
///
/// Field names serialize in the `Date,Open,High,Low,Close,Volume` header
/// layout used by the on-disk cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// True if any price field is missing (NaN), as for partial provider rows.
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000,
        }
    }

    #[test]
    fn any_missing_price_makes_bar_void() {
        assert!(!sample_bar().is_void());

        let mut bar = sample_bar();
        bar.close = f64::NAN;
        assert!(bar.is_void());

        let mut bar = sample_bar();
        bar.low = f64::NAN;
        assert!(bar.is_void());
    }

    #[test]
    fn bar_serializes_with_cache_header_names() {
        let json = serde_json::to_value(sample_bar()).unwrap();
        assert_eq!(json["Date"], "2024-01-02");
        assert_eq!(json["Close"], 103.0);
        assert_eq!(json["Volume"], 50_000);
    }
}
