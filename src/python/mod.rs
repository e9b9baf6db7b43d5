//! Python bindings for RaptorRisk.

pub mod bindings;
pub mod numpy_bridge;
