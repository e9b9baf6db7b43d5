//! Core types and utilities for RaptorRisk.

pub mod error;
pub mod random;
pub mod types;

pub use error::{RaptorError, Result};
pub use random::{RandomSource, ReplaySource};
pub use types::*;
