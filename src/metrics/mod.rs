//! Risk metrics for RaptorRisk.

pub mod report;
pub mod risk;

pub use report::{PriceMove, RiskReport, DEFAULT_SAMPLE_SIZE};
pub use risk::{compute_risk_summary, summarize_values, RiskSummary, VAR_95_Z_SCORE};
