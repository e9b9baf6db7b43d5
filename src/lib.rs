// Suppress warning from PyO3 macro expansion (fixed in newer PyO3 versions)
#![allow(non_local_definitions)]

//! RaptorRisk - Monte Carlo portfolio risk engine.
//!
//! This crate provides:
//! - Validated portfolio and asset types
//! - A stateless simulation engine with injectable, seedable randomness
//! - Parallel seeded runs that stay bit-identical to sequential ones
//! - Risk statistics (mean, population std dev, parametric VaR 95, mean/std ratio)
//!
//! ```rust
//! use raptorrisk::core::random::seeded;
//! use raptorrisk::core::Portfolio;
//! use raptorrisk::metrics::compute_risk_summary;
//! use raptorrisk::portfolio::run_simulation;
//!
//! let portfolio = Portfolio::sample_crypto();
//! let results = run_simulation(&portfolio, 100, &mut seeded(42));
//! let summary = compute_risk_summary(&results).unwrap();
//! assert!(summary.value_at_risk_95 <= summary.mean_value);
//! ```

pub mod core;
pub mod metrics;
pub mod portfolio;
#[cfg(feature = "python")]
pub mod python;

pub use crate::core::{AssetModel, Portfolio, RandomSource, RaptorError, Result};
pub use crate::metrics::{compute_risk_summary, RiskReport, RiskSummary};
pub use crate::portfolio::{run_simulation, SimulationConfig, SimulationEngine, SimulationResult};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module entry point
#[cfg(feature = "python")]
#[pymodule]
fn _raptorrisk(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    // Register result classes
    m.add_class::<python::bindings::PyRiskSummary>()?;

    // Register Monte Carlo simulation
    m.add_function(wrap_pyfunction!(python::bindings::simulate_portfolio_mc, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::compute_risk_summary, m)?)?;

    Ok(())
}
