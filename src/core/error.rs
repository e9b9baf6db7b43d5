//! Error types for RaptorRisk.

use thiserror::Error;

/// Result type alias for RaptorRisk operations.
pub type Result<T> = std::result::Result<T, RaptorError>;

/// Error types for the simulation engine and risk calculator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RaptorError {
    /// Asset failed validation (price, allocation or volatility out of range).
    #[error("Invalid asset '{symbol}': {message}")]
    InvalidAsset { symbol: String, message: String },

    /// Portfolio failed validation (total value, empty or duplicate assets).
    #[error("Invalid portfolio: {message}")]
    InvalidPortfolio { message: String },

    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Insufficient data for calculation.
    #[error("Insufficient data: need at least {required} elements, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// A ratio was requested whose denominator is exactly zero.
    #[error("Division undefined in {context}")]
    DivisionUndefined { context: String },
}

impl RaptorError {
    /// Create an invalid asset error.
    pub fn invalid_asset(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAsset {
            symbol: symbol.into(),
            message: message.into(),
        }
    }

    /// Create an invalid portfolio error.
    pub fn invalid_portfolio(message: impl Into<String>) -> Self {
        Self::InvalidPortfolio {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(required: usize, available: usize) -> Self {
        Self::InsufficientData {
            required,
            available,
        }
    }

    /// Create a division undefined error.
    pub fn division_undefined(context: impl Into<String>) -> Self {
        Self::DivisionUndefined {
            context: context.into(),
        }
    }
}

#[cfg(feature = "python")]
impl From<RaptorError> for pyo3::PyErr {
    fn from(err: RaptorError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
