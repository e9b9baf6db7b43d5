//! Monte Carlo re-pricing of a portfolio.
//!
//! Each trial moves every asset's price by an independent uniform draw on
//! `[-volatility, +volatility]` percent and revalues the asset's nominal
//! allocation by the resulting price ratio. There is no drift, no correlation
//! between assets and no multi-step path. Seeded runs are parallelized via Rayon.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::random::{trial_seed, RandomSource};
use crate::core::types::{AssetModel, Portfolio, Price};

/// Trial count used when the caller does not specify one.
pub const DEFAULT_TRIAL_COUNT: usize = 100;

/// Configuration for Monte Carlo simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub trial_count: usize,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { trial_count: DEFAULT_TRIAL_COUNT, seed: 42 }
    }
}

/// Outcome for one asset within one trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetOutcome {
    pub symbol: String,
    pub original_price: Price,
    pub new_price: Price,
    /// Simulated move in percent; `|price_change_percent| <= volatility_percent`.
    pub price_change_percent: f64,
    /// Nominal allocation revalued by `new_price / original_price`.
    pub asset_value: f64,
}

/// Result of a single trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// 1-based position within the run.
    pub iteration_index: usize,
    /// One outcome per asset, in portfolio order.
    pub asset_outcomes: Vec<AssetOutcome>,
    /// Sum of `asset_value` over `asset_outcomes`.
    pub total_value: f64,
}

/// Re-price one asset given its drawn price-change fraction.
#[inline]
fn reprice(asset: &AssetModel, total_value: f64, price_change_fraction: f64) -> AssetOutcome {
    let new_price = asset.price * (1.0 + price_change_fraction);
    let nominal_value = asset.nominal_value(total_value);
    AssetOutcome {
        symbol: asset.symbol.clone(),
        original_price: asset.price,
        new_price,
        price_change_percent: price_change_fraction * 100.0,
        asset_value: nominal_value * (new_price / asset.price),
    }
}

/// Run one trial, drawing once per asset in portfolio order.
pub fn simulate_trial<R: RandomSource + ?Sized>(
    portfolio: &Portfolio,
    iteration_index: usize,
    rng: &mut R,
) -> SimulationResult {
    let total_value = portfolio.total_value();
    let asset_outcomes: Vec<AssetOutcome> = portfolio
        .assets()
        .iter()
        .map(|asset| {
            let swing = asset.volatility_percent / 100.0;
            let price_change_fraction = rng.draw(-swing, swing);
            reprice(asset, total_value, price_change_fraction)
        })
        .collect();

    let total_value = asset_outcomes.iter().map(|o| o.asset_value).sum::<f64>();

    SimulationResult {
        iteration_index,
        asset_outcomes,
        total_value,
    }
}

/// Run `trial_count` trials drawing from `rng`.
///
/// Returns exactly `trial_count` results ordered by `iteration_index`
/// (an empty vector for zero trials).
pub fn run_simulation<R: RandomSource + ?Sized>(
    portfolio: &Portfolio,
    trial_count: usize,
    rng: &mut R,
) -> Vec<SimulationResult> {
    log_run_start(portfolio, trial_count);
    let results: Vec<SimulationResult> =
        (1..=trial_count).map(|i| simulate_trial(portfolio, i, &mut *rng)).collect();
    debug!(trial_count = results.len(), "Monte Carlo run completed");
    results
}

fn log_run_start(portfolio: &Portfolio, trial_count: usize) {
    if !portfolio.is_fully_allocated() {
        warn!(
            allocation_total = portfolio.allocation_total(),
            "Portfolio allocations do not sum to 100%"
        );
    }
    debug!(
        trial_count,
        asset_count = portfolio.len(),
        total_value = portfolio.total_value(),
        "Monte Carlo run started"
    );
}

/// Stateless simulation engine.
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    /// Create a new engine.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Set the number of trials.
    pub fn with_trial_count(mut self, trial_count: usize) -> Self {
        self.config.trial_count = trial_count;
        self
    }

    /// Set the base seed for seeded runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the configured number of trials drawing from a caller-supplied source.
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        portfolio: &Portfolio,
        rng: &mut R,
    ) -> Vec<SimulationResult> {
        run_simulation(portfolio, self.config.trial_count, rng)
    }

    /// Run sequentially with one seeded stream per trial.
    ///
    /// Produces output bit-identical to [`SimulationEngine::run_parallel`].
    pub fn run_seeded(&self, portfolio: &Portfolio) -> Vec<SimulationResult> {
        log_run_start(portfolio, self.config.trial_count);
        let results: Vec<SimulationResult> = (1..=self.config.trial_count)
            .map(|i| self.seeded_trial(portfolio, i))
            .collect();
        debug!(trial_count = results.len(), seed = self.config.seed, "Seeded run completed");
        results
    }

    /// Run trials across the Rayon pool with one seeded stream per trial.
    ///
    /// Results are ordered by `iteration_index`, not completion order.
    pub fn run_parallel(&self, portfolio: &Portfolio) -> Vec<SimulationResult> {
        log_run_start(portfolio, self.config.trial_count);
        let results: Vec<SimulationResult> = (0..self.config.trial_count)
            .into_par_iter()
            .map(|i| self.seeded_trial(portfolio, i + 1))
            .collect();
        debug!(
            trial_count = results.len(),
            seed = self.config.seed,
            threads = rayon::current_num_threads(),
            "Parallel run completed"
        );
        results
    }

    fn seeded_trial(&self, portfolio: &Portfolio, iteration_index: usize) -> SimulationResult {
        let mut rng = StdRng::seed_from_u64(trial_seed(self.config.seed, iteration_index));
        simulate_trial(portfolio, iteration_index, &mut rng)
    }
}
