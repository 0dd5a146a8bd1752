//! Two-series date alignment.
//!
//! The regression requires both return series to share the exact same dates.
//! Independently fetched series can disagree (a listing gap, a halted day, a
//! late-starting ticker), so callers may opt in to intersecting the price
//! series on common dates before computing returns.

use crate::domain::PriceSeries;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Restrict both series to the dates present in both.
pub fn align_on_common_dates(asset: &PriceSeries, index: &PriceSeries) -> (PriceSeries, PriceSeries) {
    let asset_dates: BTreeSet<NaiveDate> = asset.dates().into_iter().collect();
    let common: BTreeSet<NaiveDate> = index
        .dates()
        .into_iter()
        .filter(|d| asset_dates.contains(d))
        .collect();

    let dropped = asset.len() + index.len() - 2 * common.len();
    if dropped > 0 {
        tracing::debug!(
            "aligning {} and {}: {dropped} bars without a counterpart dropped",
            asset.symbol(),
            index.symbol()
        );
    }

    (
        asset.retain_dates(|d| common.contains(&d)),
        index.retain_dates(|d| common.contains(&d)),
    )
}
