//! Results report assembled from a portfolio and its simulated trials.

use serde::{Deserialize, Serialize};

use super::risk::{compute_risk_summary, RiskSummary};
use crate::core::error::{RaptorError, Result};
use crate::core::types::Portfolio;
use crate::portfolio::allocation::AllocationSlice;
use crate::portfolio::monte_carlo::SimulationResult;

/// Number of leading trials kept in a report by default.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Simulated price move of one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceMove {
    pub symbol: String,
    pub price_change_percent: f64,
}

/// Everything a consumer needs to present one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub summary: RiskSummary,
    /// `mean / std_dev`; `None` when the standard deviation is zero.
    pub sharpe_ratio: Option<f64>,
    pub allocation: Vec<AllocationSlice>,
    /// Per-asset moves of the first trial.
    pub first_trial_moves: Vec<PriceMove>,
    /// Leading trials, at most `sample_size` of them.
    pub sample_trials: Vec<SimulationResult>,
}

impl RiskReport {
    /// Build a report. Fails like [`compute_risk_summary`] on an empty run.
    pub fn build(
        portfolio: &Portfolio,
        results: &[SimulationResult],
        sample_size: usize,
    ) -> Result<Self> {
        if sample_size == 0 {
            return Err(RaptorError::invalid_parameter("sample size must be > 0"));
        }
        let summary = compute_risk_summary(results)?;

        let first_trial_moves: Vec<PriceMove> = results
            .first()
            .map(|trial| {
                trial
                    .asset_outcomes
                    .iter()
                    .map(|o| PriceMove {
                        symbol: o.symbol.clone(),
                        price_change_percent: o.price_change_percent,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            summary,
            sharpe_ratio: summary.sharpe_ratio().ok(),
            allocation: portfolio.allocation_breakdown(),
            first_trial_moves,
            sample_trials: results.iter().take(sample_size).cloned().collect(),
        })
    }
}
