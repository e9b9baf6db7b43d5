//! Capital allocation breakdown for a portfolio.

use serde::{Deserialize, Serialize};

use crate::core::types::Portfolio;

/// Nominal capital assigned to one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub symbol: String,
    pub allocation_percent: f64,
    /// `(allocation_percent / 100) * total_value`.
    pub nominal_value: f64,
}

impl Portfolio {
    /// Nominal capital per asset, in portfolio order.
    pub fn allocation_breakdown(&self) -> Vec<AllocationSlice> {
        self.assets()
            .iter()
            .map(|asset| AllocationSlice {
                symbol: asset.symbol.clone(),
                allocation_percent: asset.allocation_percent,
                nominal_value: asset.nominal_value(self.total_value()),
            })
            .collect()
    }

    /// Capital not assigned to any asset. Negative when allocations exceed 100%.
    pub fn unallocated_value(&self) -> f64 {
        let allocated: f64 = self.allocation_breakdown().iter().map(|s| s.nominal_value).sum();
        self.total_value() - allocated
    }
}
