//! Ordinary least squares of asset returns on index returns.
//!
//! Single regressor with an intercept: `asset = alpha + beta * index + e`.
//! Closed-form estimates:
//!
//! ```text
//! beta  = Sxy / Sxx
//! alpha = mean(y) - beta * mean(x)
//! ```
//!
//! Standard errors use the residual variance `SSR / (n - 2)`. With exactly two
//! observations the line passes through both points and every dispersion
//! statistic is NaN (zero residual degrees of freedom).

use super::AnalysisError;
use crate::domain::ReturnSeries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fit quality and coefficient uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    pub observations: usize,
    pub df_resid: usize,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub residual_std_error: f64,
    pub alpha_std_error: f64,
    pub beta_std_error: f64,
    pub alpha_t: f64,
    pub beta_t: f64,
}

/// Intercept and slope of the asset-on-index regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub alpha: f64,
    pub beta: f64,
    pub diagnostics: FitDiagnostics,
}

impl RegressionResult {
    /// Fitted asset return for a given index return.
    pub fn predict(&self, index_return: f64) -> f64 {
        self.alpha + self.beta * index_return
    }
}

/// Fit asset returns (dependent) on index returns (independent) with an intercept.
///
/// Both series must carry the same dates in the same positions. Regressing
/// mismatched positions would silently pair unrelated days, so any
/// difference in length or dates is rejected with `MisalignedSeries`.
/// A NaN or infinite return is rejected with `NonFiniteObservation`.
pub fn fit(
    asset_returns: &ReturnSeries,
    index_returns: &ReturnSeries,
) -> Result<RegressionResult, AnalysisError> {
    check_alignment(asset_returns, index_returns)?;

    let n = asset_returns.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    for returns in [asset_returns, index_returns] {
        if let Some(p) = returns.points.iter().find(|p| !p.value.is_finite()) {
            return Err(AnalysisError::NonFiniteObservation {
                series: returns.symbol.clone(),
                date: p.date,
            });
        }
    }

    let x = index_returns.values();
    let y = asset_returns.values();

    if x.iter().all(|v| *v == x[0]) {
        return Err(AnalysisError::DegenerateRegressor);
    }

    let nf = n as f64;
    let x_mean = x.iter().sum::<f64>() / nf;
    let y_mean = y.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(&y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let beta = sxy / sxx;
    let alpha = y_mean - beta * x_mean;

    let ssr: f64 = x
        .iter()
        .zip(&y)
        .map(|(xi, yi)| (yi - alpha - beta * xi).powi(2))
        .sum();

    let df_resid = n - 2;
    let (sigma2, adj_factor) = if df_resid == 0 {
        (f64::NAN, f64::NAN)
    } else {
        (ssr / df_resid as f64, (nf - 1.0) / df_resid as f64)
    };

    let r_squared = if syy > 0.0 { 1.0 - ssr / syy } else { f64::NAN };
    let adj_r_squared = 1.0 - (1.0 - r_squared) * adj_factor;

    let beta_std_error = (sigma2 / sxx).sqrt();
    let alpha_std_error = (sigma2 * (1.0 / nf + x_mean * x_mean / sxx)).sqrt();

    Ok(RegressionResult {
        alpha,
        beta,
        diagnostics: FitDiagnostics {
            observations: n,
            df_resid,
            r_squared,
            adj_r_squared,
            residual_std_error: sigma2.sqrt(),
            alpha_std_error,
            beta_std_error,
            alpha_t: alpha / alpha_std_error,
            beta_t: beta / beta_std_error,
        },
    })
}

fn check_alignment(asset: &ReturnSeries, index: &ReturnSeries) -> Result<(), AnalysisError> {
    let first_mismatch = asset
        .points
        .iter()
        .zip(&index.points)
        .find(|(a, i)| a.date != i.date)
        .map(|(a, _)| a.date);

    if asset.len() != index.len() || first_mismatch.is_some() {
        return Err(AnalysisError::MisalignedSeries {
            asset_len: asset.len(),
            index_len: index.len(),
            first_mismatch,
        });
    }
    Ok(())
}

impl fmt::Display for RegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.diagnostics;
        writeln!(f, "OLS regression: asset returns on index returns")?;
        writeln!(f, "{:-<56}", "")?;
        writeln!(f, "observations: {:>10}   df resid: {:>10}", d.observations, d.df_resid)?;
        writeln!(f, "R-squared:    {:>10.4}   adj. R-sq: {:>9.4}", d.r_squared, d.adj_r_squared)?;
        writeln!(f, "resid. std error: {:>10.6}", d.residual_std_error)?;
        writeln!(f, "{:-<56}", "")?;
        writeln!(f, "{:<8}{:>14}{:>14}{:>14}", "", "coef", "std err", "t")?;
        writeln!(
            f,
            "{:<8}{:>14.6}{:>14.6}{:>14.3}",
            "alpha", self.alpha, d.alpha_std_error, d.alpha_t
        )?;
        writeln!(
            f,
            "{:<8}{:>14.6}{:>14.6}{:>14.3}",
            "beta", self.beta, d.beta_std_error, d.beta_t
        )?;
        write!(f, "{:-<56}", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{assert_approx, DEFAULT_EPSILON};
    use crate::domain::DailyReturn;
    use chrono::NaiveDate;

    fn series(symbol: &str, values: &[f64]) -> ReturnSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
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

    #[test]
    fn nan_return_is_rejected() {
        let index = series("sp500", &[0.01, -0.02, 0.015, 0.003]);
        let asset = series("TSLA", &[0.02, f64::NAN, 0.01, 0.004]);

        let err = fit(&asset, &index).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::NonFiniteObservation {
                series: "TSLA".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            }
        );
    }

    #[test]
    fn textbook_example_coefficients_and_errors() {
        let index = series("sp500", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let asset = series("TSLA", &[2.0, 4.0, 5.0, 4.0, 5.0]);

        let fit = fit(&asset, &index).unwrap();
        assert_approx(fit.beta, 0.6, DEFAULT_EPSILON);
        assert_approx(fit.alpha, 2.2, DEFAULT_EPSILON);

        let d = fit.diagnostics;
        assert_eq!(d.observations, 5);
        assert_eq!(d.df_resid, 3);
        assert_approx(d.r_squared, 0.6, DEFAULT_EPSILON);
        assert_approx(d.adj_r_squared, 1.0 - 0.4 * 4.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(d.residual_std_error, 0.8_f64.sqrt(), DEFAULT_EPSILON);
        assert_approx(d.beta_std_error, 0.08_f64.sqrt(), DEFAULT_EPSILON);
        assert_approx(d.alpha_std_error, 0.88_f64.sqrt(), DEFAULT_EPSILON);
        assert_approx(d.beta_t, 0.6 / 0.08_f64.sqrt(), 1e-9);
    }

    #[test]
    fn exact_line_is_recovered() {
        let xs = [0.01, -0.02, 0.005, 0.03, -0.01];
        let ys: Vec<f64> = xs.iter().map(|x| 0.001 + 1.5 * x).collect();

        let fit = fit(&series("TSLA", &ys), &series("sp500", &xs)).unwrap();
        assert_approx(fit.beta, 1.5, 1e-12);
        assert_approx(fit.alpha, 0.001, 1e-12);
        assert_approx(fit.diagnostics.r_squared, 1.0, 1e-12);
        assert_approx(fit.predict(0.02), 0.031, 1e-12);
    }

    #[test]
    fn two_points_have_nan_dispersion() {
        let fit = fit(&series("TSLA", &[0.02, -0.01]), &series("sp500", &[0.01, -0.005])).unwrap();
        assert_eq!(fit.diagnostics.df_resid, 0);
        assert!(fit.diagnostics.residual_std_error.is_nan());
        assert!(fit.diagnostics.beta_std_error.is_nan());
        assert_approx(fit.diagnostics.r_squared, 1.0, 1e-12);
    }

    #[test]
    fn length_mismatch_is_misaligned() {
        let err = fit(&series("TSLA", &[0.1, 0.2, 0.3]), &series("sp500", &[0.1, 0.2])).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MisalignedSeries {
                asset_len: 3,
                index_len: 2,
                first_mismatch: None,
            }
        );
    }

    #[test]
    fn date_mismatch_is_misaligned() {
        let asset = series("TSLA", &[0.1, 0.2, 0.3]);
        let mut index = series("sp500", &[0.1, 0.2, 0.3]);
        index.points[1].date = index.points[1].date + chrono::Duration::days(10);

        match fit(&asset, &index).unwrap_err() {
            AnalysisError::MisalignedSeries { first_mismatch, .. } => {
                assert_eq!(first_mismatch, Some(asset.points[1].date));
            }
            other => panic!("expected MisalignedSeries, got {other:?}"),
        }
    }

    #[test]
    fn single_observation_is_insufficient() {
        let err = fit(&series("TSLA", &[0.1]), &series("sp500", &[0.2])).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn constant_index_is_degenerate() {
        let err = fit(&series("TSLA", &[0.1, 0.2, 0.3]), &series("sp500", &[0.1, 0.1, 0.1]))
            .unwrap_err();
        assert_eq!(err, AnalysisError::DegenerateRegressor);
    }

    #[test]
    fn summary_lists_both_coefficients() {
        let fit = fit(
            &series("TSLA", &[2.0, 4.0, 5.0, 4.0, 5.0]),
            &series("sp500", &[1.0, 2.0, 3.0, 4.0, 5.0]),
        )
        .unwrap();
        let text = fit.to_string();
        assert!(text.contains("alpha"));
        assert!(text.contains("beta"));
        assert!(text.contains("2.200000"));
        assert!(text.contains("0.600000"));
    }
}
