//! Property tests for returns and regression.
//!
//! Uses proptest to verify:
//! 1. Return count — N prices give N - 1 returns
//! 2. Return formula — each return is the close-to-close fractional change
//! 3. Self-regression — a series regressed on itself has beta 1, alpha 0
//! 4. Line recovery — exact linear data gives back its slope and intercept

use betalab_core::analysis::{fit, returns_of};
use betalab_core::domain::{DailyReturn, PriceBar, PriceSeries, ReturnSeries};
use chrono::NaiveDate;
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, 1..200)
}

fn arb_returns() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.2..0.2_f64, 3..200)
        .prop_filter("needs variance", |xs| xs.iter().any(|x| (x - xs[0]).abs() > 1e-4))
}

fn price_series(closes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: base + chrono::Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        })
        .collect();
    PriceSeries::new("P", bars).unwrap()
}

fn return_series(symbol: &str, values: &[f64]) -> ReturnSeries {
    let base = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    ReturnSeries {
        symbol: symbol.into(),
        points: values
            .iter()
            .enumerate()
            .map(|(i, &value)| DailyReturn {
                date: base + chrono::Duration::days(i as i64),
                value,
            })
            .collect(),
    }
}

proptest! {
    #[test]
    fn returns_have_one_fewer_point(closes in arb_closes()) {
        let returns = returns_of(&price_series(&closes)).unwrap();
        prop_assert_eq!(returns.len(), closes.len() - 1);
    }

    #[test]
    fn returns_match_formula(closes in arb_closes()) {
        let returns = returns_of(&price_series(&closes)).unwrap();
        for (i, point) in returns.points.iter().enumerate() {
            let expected = (closes[i + 1] - closes[i]) / closes[i];
            prop_assert_eq!(point.value, expected);
        }
    }

    #[test]
    fn self_regression_has_unit_beta(xs in arb_returns()) {
        let fit = fit(&return_series("A", &xs), &return_series("I", &xs)).unwrap();
        prop_assert!((fit.beta - 1.0).abs() < 1e-6, "beta = {}", fit.beta);
        prop_assert!(fit.alpha.abs() < 1e-6, "alpha = {}", fit.alpha);
    }

    #[test]
    fn exact_line_is_recovered(
        xs in arb_returns(),
        alpha in -0.01..0.01_f64,
        beta in -3.0..3.0_f64,
    ) {
        let ys: Vec<f64> = xs.iter().map(|x| alpha + beta * x).collect();
        let fit = fit(&return_series("A", &ys), &return_series("I", &xs)).unwrap();
        prop_assert!((fit.beta - beta).abs() < 1e-6);
        prop_assert!((fit.alpha - alpha).abs() < 1e-6);
    }
}
