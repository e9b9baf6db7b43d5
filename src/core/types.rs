//! Core data types for RaptorRisk.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::{RaptorError, Result};

/// Type alias for price values.
pub type Price = f64;

/// Allocation sum at which a portfolio is fully invested.
pub const FULL_ALLOCATION_PERCENT: f64 = 100.0;

/// A single holding in a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetModel {
    /// Short identifier, unique within a portfolio.
    pub symbol: String,
    /// Share of the portfolio's total value nominally assigned to this asset, in [0, 100].
    pub allocation_percent: f64,
    /// Maximum magnitude of a single-trial price swing, in [0, 100].
    pub volatility_percent: f64,
    /// Reference price, strictly positive.
    pub price: Price,
}

impl AssetModel {
    /// Create a validated asset.
    pub fn new(
        symbol: impl Into<String>,
        allocation_percent: f64,
        volatility_percent: f64,
        price: Price,
    ) -> Result<Self> {
        let asset = Self {
            symbol: symbol.into(),
            allocation_percent,
            volatility_percent,
            price,
        };
        asset.validate()?;
        Ok(asset)
    }

    /// Check the asset invariants.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(RaptorError::invalid_asset(&self.symbol, "symbol must not be empty"));
        }
        check_percent(&self.symbol, "allocation", self.allocation_percent)?;
        check_percent(&self.symbol, "volatility", self.volatility_percent)?;
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(RaptorError::invalid_asset(
                &self.symbol,
                format!("price must be > 0, got {}", self.price),
            ));
        }
        Ok(())
    }

    /// Monetary amount assigned to this asset out of `total_value`.
    #[inline]
    pub fn nominal_value(&self, total_value: f64) -> f64 {
        (self.allocation_percent / 100.0) * total_value
    }
}

fn check_percent(symbol: &str, name: &str, value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(RaptorError::invalid_asset(
            symbol,
            format!("{name} percent must be within [0, 100], got {value}"),
        ));
    }
    Ok(())
}

fn check_total_value(total_value: f64) -> Result<()> {
    if !(total_value.is_finite() && total_value > 0.0) {
        return Err(RaptorError::invalid_portfolio(format!(
            "total value must be > 0, got {total_value}"
        )));
    }
    Ok(())
}

/// Wire shape of a portfolio; converted into [`Portfolio`] through validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSpec {
    pub total_value: f64,
    pub assets: Vec<AssetModel>,
}

/// Ordered collection of assets plus the capital distributed across them.
///
/// A `Portfolio` can only be obtained through validation, so the engine never
/// re-checks its inputs inside the trial loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PortfolioSpec", into = "PortfolioSpec")]
pub struct Portfolio {
    total_value: f64,
    assets: Vec<AssetModel>,
}

impl Portfolio {
    /// Create a validated portfolio.
    pub fn new(total_value: f64, assets: Vec<AssetModel>) -> Result<Self> {
        check_total_value(total_value)?;
        if assets.is_empty() {
            return Err(RaptorError::invalid_portfolio("portfolio has no assets"));
        }

        let mut seen = HashSet::with_capacity(assets.len());
        for asset in &assets {
            asset.validate()?;
            if !seen.insert(asset.symbol.as_str()) {
                return Err(RaptorError::invalid_portfolio(format!(
                    "duplicate symbol '{}'",
                    asset.symbol
                )));
            }
        }

        Ok(Self {
            total_value,
            assets,
        })
    }

    /// Reference crypto portfolio: BTC/ETH/USDC at 40/30/30 on 10,000.
    pub fn sample_crypto() -> Self {
        let asset = |symbol: &str, allocation_percent, volatility_percent, price| AssetModel {
            symbol: symbol.to_string(),
            allocation_percent,
            volatility_percent,
            price,
        };
        Self {
            total_value: 10_000.0,
            assets: vec![
                asset("BTC", 40.0, 50.0, 50_000.0),
                asset("ETH", 30.0, 40.0, 3_000.0),
                asset("USDC", 30.0, 5.0, 1.0),
            ],
        }
    }

    /// Capital to be distributed according to allocations.
    #[inline]
    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Assets in portfolio order.
    #[inline]
    pub fn assets(&self) -> &[AssetModel] {
        &self.assets
    }

    /// Number of assets.
    #[inline]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always false for a validated portfolio.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Look up an asset by symbol.
    pub fn asset(&self, symbol: &str) -> Option<&AssetModel> {
        self.assets.iter().find(|a| a.symbol == symbol)
    }

    /// Sum of allocation percentages. Not required to equal 100.
    pub fn allocation_total(&self) -> f64 {
        self.assets.iter().map(|a| a.allocation_percent).sum()
    }

    /// Whether allocations sum to 100 within floating-point tolerance.
    pub fn is_fully_allocated(&self) -> bool {
        (self.allocation_total() - FULL_ALLOCATION_PERCENT).abs() < 1e-9
    }

    /// Change the capital amount between runs.
    pub fn set_total_value(&mut self, total_value: f64) -> Result<()> {
        check_total_value(total_value)?;
        self.total_value = total_value;
        Ok(())
    }

    /// Change one asset's allocation between runs.
    pub fn set_allocation(&mut self, symbol: &str, allocation_percent: f64) -> Result<()> {
        check_percent(symbol, "allocation", allocation_percent)?;
        self.asset_mut(symbol)?.allocation_percent = allocation_percent;
        Ok(())
    }

    /// Change one asset's volatility between runs.
    pub fn set_volatility(&mut self, symbol: &str, volatility_percent: f64) -> Result<()> {
        check_percent(symbol, "volatility", volatility_percent)?;
        self.asset_mut(symbol)?.volatility_percent = volatility_percent;
        Ok(())
    }

    fn asset_mut(&mut self, symbol: &str) -> Result<&mut AssetModel> {
        self.assets
            .iter_mut()
            .find(|a| a.symbol == symbol)
            .ok_or_else(|| RaptorError::invalid_parameter(format!("unknown symbol '{symbol}'")))
    }
}

impl TryFrom<PortfolioSpec> for Portfolio {
    type Error = RaptorError;

    fn try_from(spec: PortfolioSpec) -> Result<Self> {
        Self::new(spec.total_value, spec.assets)
    }
}

impl From<Portfolio> for PortfolioSpec {
    fn from(portfolio: Portfolio) -> Self {
        Self {
            total_value: portfolio.total_value,
            assets: portfolio.assets,
        }
    }
}
