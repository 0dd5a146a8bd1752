//! Trailing simple moving average.
//!
//! Output has the same length as the input. Positions before the window fills
//! are NaN, and any window containing a NaN yields NaN.

/// Rolling mean of `values` over `window` points.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if window == 0 || n < window {
        return result;
    }

    let mut sum: f64 = values[..window].iter().sum();
    result[window - 1] = sum / window as f64;

    for i in window..n {
        let leaving = values[i - window];
        let entering = values[i];

        if leaving.is_nan() || entering.is_nan() || sum.is_nan() {
            // NaN poisons the running sum; rescan the window instead.
            sum = values[(i + 1 - window)..=i].iter().sum();
        } else {
            sum = sum - leaving + entering;
        }

        result[i] = sum / window as f64;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn window_5_basic() {
        let result = moving_average(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0], 5);

        assert_eq!(result.len(), 7);
        for (i, v) in result.iter().take(4).enumerate() {
            assert!(v.is_nan(), "expected NaN at index {i}");
        }
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
        assert_approx(result[5], 13.0, DEFAULT_EPSILON);
        assert_approx(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn window_1_is_identity() {
        let result = moving_average(&[100.0, 200.0, 300.0], 1);
        assert_eq!(result, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn short_input_is_all_nan() {
        let result = moving_average(&[1.0, 2.0], 14);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn nan_only_affects_windows_containing_it() {
        let result = moving_average(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 2);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 3.5, DEFAULT_EPSILON);
        assert_approx(result[4], 4.5, DEFAULT_EPSILON);
    }
}
