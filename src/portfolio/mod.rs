//! Portfolio simulation engine for RaptorRisk.

pub mod allocation;
pub mod monte_carlo;

pub use allocation::AllocationSlice;
pub use monte_carlo::{
    run_simulation, simulate_trial, AssetOutcome, SimulationConfig, SimulationEngine,
    SimulationResult, DEFAULT_TRIAL_COUNT,
};
