//! Error types for the simulation engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid input: {field} must be positive and finite, got {value}")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("Invalid input: {field} must be non-negative and finite, got {value}")]
    InvalidNonNegative { field: &'static str, value: f64 },

    #[error("Degenerate reserve during {step}: eth={eth_reserve}, token={token_reserve}")]
    DegenerateReserve {
        step: &'static str,
        eth_reserve: f64,
        token_reserve: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Reject anything that is not a strictly positive finite number.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::InvalidInput { field, value })
    }
}

/// Reject negative or non-finite numbers; zero is allowed.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::InvalidNonNegative { field, value })
    }
}
