//! ReturnSeries — period-over-period fractional changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fractional close-to-close change, stamped with the later bar's date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyReturn {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered daily returns for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    pub symbol: String,
    pub points: Vec<DailyReturn>,
}

impl ReturnSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// The first `n` points (or all of them, if there are fewer).
    pub fn head(&self, n: usize) -> &[DailyReturn] {
        &self.points[..n.min(self.points.len())]
    }
}
