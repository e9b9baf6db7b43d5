//! PyO3 function bindings for RaptorRisk.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::core::error::RaptorError;
use crate::core::types::{AssetModel, Portfolio};
use crate::metrics::risk::{summarize_values, RiskSummary};
use crate::portfolio::monte_carlo::{SimulationConfig, SimulationEngine};

use super::numpy_bridge::*;

// ============================================================================
// Result Classes
// ============================================================================

/// Python-exposed risk summary.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyRiskSummary {
    #[pyo3(get)]
    pub trial_count: usize,
    #[pyo3(get)]
    pub mean_value: f64,
    #[pyo3(get)]
    pub standard_deviation: f64,
    #[pyo3(get)]
    pub value_at_risk_95: f64,
    /// Mean over standard deviation; `None` when the deviation is zero.
    #[pyo3(get)]
    pub sharpe_ratio: Option<f64>,
}

#[pymethods]
impl PyRiskSummary {
    fn __repr__(&self) -> String {
        format!(
            "RiskSummary(mean={:.2}, std={:.2}, var_95={:.2}, trials={})",
            self.mean_value, self.standard_deviation, self.value_at_risk_95, self.trial_count
        )
    }
}

impl From<RiskSummary> for PyRiskSummary {
    fn from(summary: RiskSummary) -> Self {
        Self {
            trial_count: summary.trial_count,
            mean_value: summary.mean_value,
            standard_deviation: summary.standard_deviation,
            value_at_risk_95: summary.value_at_risk_95,
            sharpe_ratio: summary.sharpe_ratio().ok(),
        }
    }
}

// ============================================================================
// Simulation Functions
// ============================================================================

fn build_portfolio(
    symbols: Vec<String>,
    allocations: Vec<f64>,
    volatilities: Vec<f64>,
    prices: Vec<f64>,
    total_value: f64,
) -> Result<Portfolio, RaptorError> {
    let n = symbols.len();
    if allocations.len() != n || volatilities.len() != n || prices.len() != n {
        return Err(RaptorError::invalid_parameter(format!(
            "expected {n} allocations, volatilities and prices, got {}, {}, {}",
            allocations.len(),
            volatilities.len(),
            prices.len()
        )));
    }

    let assets = symbols
        .into_iter()
        .zip(allocations)
        .zip(volatilities)
        .zip(prices)
        .map(|(((symbol, allocation), volatility), price)| {
            AssetModel::new(symbol, allocation, volatility, price)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Portfolio::new(total_value, assets)
}

/// Run a seeded Monte Carlo simulation and return each trial's total value.
#[pyfunction]
#[pyo3(signature = (symbols, allocations, volatilities, prices, total_value, trial_count=100, seed=42, parallel=true))]
#[allow(clippy::too_many_arguments)]
pub fn simulate_portfolio_mc<'py>(
    py: Python<'py>,
    symbols: Vec<String>,
    allocations: PyReadonlyArray1<f64>,
    volatilities: PyReadonlyArray1<f64>,
    prices: PyReadonlyArray1<f64>,
    total_value: f64,
    trial_count: usize,
    seed: u64,
    parallel: bool,
) -> PyResult<&'py PyArray1<f64>> {
    let portfolio = build_portfolio(
        symbols,
        numpy_to_vec_f64(allocations),
        numpy_to_vec_f64(volatilities),
        numpy_to_vec_f64(prices),
        total_value,
    )?;

    let engine = SimulationEngine::new(SimulationConfig { trial_count, seed });
    let results = py.allow_threads(|| {
        if parallel {
            engine.run_parallel(&portfolio)
        } else {
            engine.run_seeded(&portfolio)
        }
    });

    let totals = results.iter().map(|r| r.total_value).collect();
    Ok(vec_to_numpy_f64(py, totals))
}

/// Compute risk statistics over simulated trial totals.
#[pyfunction]
pub fn compute_risk_summary(values: PyReadonlyArray1<f64>) -> PyResult<PyRiskSummary> {
    let summary = summarize_values(&numpy_to_vec_f64(values))?;
    Ok(summary.into())
}
