//! Victim Trader
//!
//! A regular user buying TOKEN with ETH directly on the AMM.
//! These trades are visible before execution and can be sandwiched.

use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::utils::amm_math::{PoolState, SwapResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A pending ETH -> TOKEN swap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VictimTrade {
    /// ETH paid in
    pub amount_in: f64,
    /// Accepted slippage in percent (1.0 = 1%)
    pub slippage_tolerance_pct: f64,
}

impl VictimTrade {
    pub fn new(amount_in: f64, slippage_tolerance_pct: f64) -> Result<Self> {
        Ok(Self {
            amount_in: ensure_positive("trade_amount", amount_in)?,
            slippage_tolerance_pct: ensure_non_negative("slippage_tolerance_pct", slippage_tolerance_pct)?,
        })
    }

    /// Output the victim would receive from an untouched pool
    pub fn calculate_expected(&self, pool: &PoolState) -> f64 {
        pool.quote_buy(self.amount_in)
    }

    /// Smallest output the victim would accept, quoted against `pool`
    pub fn min_output(&self, pool: &PoolState) -> f64 {
        pool.calculate_min_output(self.amount_in, self.slippage_tolerance_pct)
    }

    /// Execute the swap against whatever reserves the pool holds now
    pub fn execute_trade(&self, pool: &PoolState) -> Result<SwapResult> {
        let result = pool.buy(self.amount_in)?;
        debug!("Victim swap: {} ETH -> {} TOKEN", self.amount_in, result.output);
        Ok(result)
    }
}

/// Draw a trade amount uniformly from `[min, max]`
pub fn random_trade_amount<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}
