//! Risk statistics over a distribution of simulated portfolio values.
//!
//! All dispersion figures are population statistics (divide by `n`, not `n - 1`),
//! and value-at-risk is parametric: `mean - 1.96 * std_dev`, not an empirical quantile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{RaptorError, Result};
use crate::portfolio::monte_carlo::SimulationResult;

/// One-sided 95% z-score used for parametric value-at-risk.
pub const VAR_95_Z_SCORE: f64 = 1.96;

/// Summary risk metrics for one set of trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    /// Number of trial values summarized.
    pub trial_count: usize,
    /// Arithmetic mean of trial totals.
    pub mean_value: f64,
    /// Population standard deviation of trial totals.
    pub standard_deviation: f64,
    /// `mean_value - 1.96 * standard_deviation`.
    pub value_at_risk_95: f64,
}

impl RiskSummary {
    /// Mean-to-dispersion ratio, `mean_value / standard_deviation`.
    ///
    /// Reported under the name "Sharpe ratio" but it is not the textbook
    /// measure: there is no risk-free rate, no annualization, and the numerator
    /// is an absolute portfolio value rather than a return.
    ///
    /// Fails with [`RaptorError::DivisionUndefined`] when the standard deviation
    /// is exactly zero.
    pub fn sharpe_ratio(&self) -> Result<f64> {
        if self.standard_deviation == 0.0 {
            return Err(RaptorError::division_undefined(
                "sharpe ratio (standard deviation is zero)",
            ));
        }
        Ok(self.mean_value / self.standard_deviation)
    }
}

/// Arithmetic mean. Returns `None` for empty input.
///
/// A constant sequence yields its common value exactly, so its deviations are all zero.
fn population_mean(values: &[f64]) -> Option<f64> {
    let (&first, rest) = values.split_first()?;
    if rest.iter().all(|&v| v == first) {
        return Some(first);
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance around a known mean.
fn population_variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Summarize raw trial totals.
pub fn summarize_values(values: &[f64]) -> Result<RiskSummary> {
    let mean_value =
        population_mean(values).ok_or_else(|| RaptorError::insufficient_data(1, values.len()))?;
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(RaptorError::invalid_parameter(format!(
            "trial values must be finite, got {bad}"
        )));
    }

    let standard_deviation = population_variance(values, mean_value).sqrt();
    let value_at_risk_95 = mean_value - VAR_95_Z_SCORE * standard_deviation;

    debug!(
        trial_count = values.len(),
        mean_value,
        standard_deviation,
        value_at_risk_95,
        "Risk summary computed"
    );

    Ok(RiskSummary {
        trial_count: values.len(),
        mean_value,
        standard_deviation,
        value_at_risk_95,
    })
}

/// Reduce a run's results to summary risk metrics.
///
/// Fails with [`RaptorError::InsufficientData`] on an empty sequence.
pub fn compute_risk_summary(results: &[SimulationResult]) -> Result<RiskSummary> {
    let values: Vec<f64> = results.iter().map(|r| r.total_value).collect();
    summarize_values(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_is_insufficient_data() {
        let err = summarize_values(&[]).unwrap_err();
        assert_eq!(err, RaptorError::insufficient_data(1, 0));
        assert!(compute_risk_summary(&[]).is_err());
    }

    #[test]
    fn test_population_statistics() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = summarize_values(&values).unwrap();

        assert_eq!(summary.trial_count, 8);
        assert_eq!(summary.mean_value, 5.0);
        // population std is 2.0; the sample estimate would be ~2.138
        assert_eq!(summary.standard_deviation, 2.0);
        assert_eq!(summary.value_at_risk_95, 5.0 - 1.96 * 2.0);
        assert_relative_eq!(summary.sharpe_ratio().unwrap(), 2.5);
    }

    #[test]
    fn test_constant_values_have_undefined_ratio() {
        let summary = summarize_values(&[100.0; 50]).unwrap();
        assert_eq!(summary.standard_deviation, 0.0);
        assert_eq!(summary.value_at_risk_95, summary.mean_value);
        assert!(matches!(
            summary.sharpe_ratio(),
            Err(RaptorError::DivisionUndefined { .. })
        ));
    }

    #[test]
    fn test_repeated_inexact_total_has_zero_dispersion() {
        // 0.1 + 0.1 + 0.1 = 0.30000000000000004, so a naive sum/n drifts off 0.1
        let summary = summarize_values(&[0.1, 0.1, 0.1]).unwrap();
        assert_eq!(summary.mean_value, 0.1);
        assert_eq!(summary.standard_deviation, 0.0);
        assert_eq!(summary.value_at_risk_95, summary.mean_value);
        assert!(matches!(
            summary.sharpe_ratio(),
            Err(RaptorError::DivisionUndefined { .. })
        ));
    }

    #[test]
    fn test_single_value() {
        let summary = summarize_values(&[42.0]).unwrap();
        assert_eq!(summary.mean_value, 42.0);
        assert_eq!(summary.standard_deviation, 0.0);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(summarize_values(&[1.0, f64::NAN]).is_err());
        assert!(summarize_values(&[f64::INFINITY]).is_err());
    }

    #[test]
    fn test_var_below_mean() {
        let summary = summarize_values(&[9_500.0, 10_250.0, 9_900.0, 10_800.0]).unwrap();
        assert!(summary.standard_deviation > 0.0);
        assert!(summary.value_at_risk_95 < summary.mean_value);
    }
}
