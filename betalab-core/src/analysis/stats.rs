//! Descriptive statistics over a slice of values.
//!
//! NaN entries mark missing prices and are skipped.

fn present(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| !v.is_nan()).collect()
}

/// Arithmetic mean. NaN when no values are present.
pub fn mean(values: &[f64]) -> f64 {
    let values = present(values);
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). NaN for fewer than two values.
pub fn std(values: &[f64]) -> f64 {
    let values = present(values);
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}
