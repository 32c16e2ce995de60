//! Utility modules

pub mod amm_math;

pub use amm_math::{compute_output, execute_buy, execute_sell, PoolState, SwapResult};
