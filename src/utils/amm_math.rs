//! AMM Math Utilities
//!
//! Implements constant-product (x * y = k) AMM calculations for an
//! ETH/TOKEN pool. All arithmetic is plain f64; nothing is rounded here.

use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};

/// Default pool fee in basis points (0.3%)
pub const DEFAULT_FEE_BPS: u16 = 30;

/// Largest input accepted relative to the reserve it is paid into.
///
/// Past this, `reserve_out - output` cancels catastrophically in f64: a
/// buy-then-sell can hand back the whole input and k can drop by an ulp.
pub const MAX_INPUT_RESERVE_RATIO: f64 = 1e9;

/// Reserves of an ETH/TOKEN pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolState {
    /// ETH reserve
    pub eth_reserve: f64,
    /// TOKEN reserve
    pub token_reserve: f64,
    /// Fee in basis points (e.g., 30 = 0.3%)
    pub fee_bps: u16,
}

/// Result of a single swap against a pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapResult {
    /// Amount paid out by the pool
    pub output: f64,
    /// ETH reserve after the swap
    pub new_eth_reserve: f64,
    /// TOKEN reserve after the swap
    pub new_token_reserve: f64,
}

impl SwapResult {
    /// Pool state after this swap, keeping the fee of the pool it ran against
    pub fn into_state(self, fee_bps: u16) -> PoolState {
        PoolState {
            eth_reserve: self.new_eth_reserve,
            token_reserve: self.new_token_reserve,
            fee_bps,
        }
    }
}

/// Fraction of the input that reaches the curve after fees (0.997 at 30 bps)
pub fn fee_multiplier(fee_bps: u16) -> f64 {
    1.0 - fee_bps as f64 / 10_000.0
}

/// Calculate output amount for a swap using constant product formula
///
/// Formula: amount_out = (amount_in_after_fee * reserve_out) / (reserve_in + amount_in_after_fee)
pub fn compute_output(input_amount: f64, input_reserve: f64, output_reserve: f64, fee_bps: u16) -> f64 {
    let effective_input = input_amount * fee_multiplier(fee_bps);

    (effective_input * output_reserve) / (input_reserve + effective_input)
}

/// Swap `eth_in` ETH for TOKEN.
///
/// Inputs more than [`MAX_INPUT_RESERVE_RATIO`] times the ETH reserve are
/// rejected as `DegenerateReserve`.
pub fn execute_buy(eth_in: f64, eth_reserve: f64, token_reserve: f64, fee_bps: u16) -> Result<SwapResult> {
    check_reserves("buy", eth_reserve, token_reserve)?;
    crate::error::ensure_non_negative("eth_in", eth_in)?;
    check_depth("buy", eth_in, eth_reserve, eth_reserve, token_reserve)?;

    let output = compute_output(eth_in, eth_reserve, token_reserve, fee_bps);
    let result = SwapResult {
        output,
        new_eth_reserve: eth_reserve + eth_in,
        new_token_reserve: token_reserve - output,
    };

    check_reserves("buy", result.new_eth_reserve, result.new_token_reserve)?;
    Ok(result)
}

/// Swap `token_in` TOKEN for ETH. Same depth limit as [`execute_buy`].
pub fn execute_sell(token_in: f64, eth_reserve: f64, token_reserve: f64, fee_bps: u16) -> Result<SwapResult> {
    check_reserves("sell", eth_reserve, token_reserve)?;
    crate::error::ensure_non_negative("token_in", token_in)?;
    check_depth("sell", token_in, token_reserve, eth_reserve, token_reserve)?;

    let output = compute_output(token_in, token_reserve, eth_reserve, fee_bps);
    let result = SwapResult {
        output,
        new_eth_reserve: eth_reserve - output,
        new_token_reserve: token_reserve + token_in,
    };

    check_reserves("sell", result.new_eth_reserve, result.new_token_reserve)?;
    Ok(result)
}

/// A zero, negative or non-finite reserve makes the spot price undefined.
fn check_reserves(step: &'static str, eth_reserve: f64, token_reserve: f64) -> Result<()> {
    let valid = |r: f64| r.is_finite() && r > 0.0;
    if valid(eth_reserve) && valid(token_reserve) {
        Ok(())
    } else {
        Err(SimulationError::DegenerateReserve {
            step,
            eth_reserve,
            token_reserve,
        })
    }
}

fn check_depth(
    step: &'static str,
    input: f64,
    input_reserve: f64,
    eth_reserve: f64,
    token_reserve: f64,
) -> Result<()> {
    if input / input_reserve > MAX_INPUT_RESERVE_RATIO {
        return Err(SimulationError::DegenerateReserve {
            step,
            eth_reserve,
            token_reserve,
        });
    }
    Ok(())
}

impl PoolState {
    /// Create a new pool state
    pub fn new(eth_reserve: f64, token_reserve: f64, fee_bps: u16) -> Self {
        Self {
            eth_reserve,
            token_reserve,
            fee_bps,
        }
    }

    /// Seed a pool from its ETH depth and a TOKEN/ETH price
    pub fn with_price(liquidity_eth: f64, price_token_per_eth: f64, fee_bps: u16) -> Self {
        Self::new(liquidity_eth, liquidity_eth * price_token_per_eth, fee_bps)
    }

    /// Calculate the constant product k
    pub fn k(&self) -> f64 {
        self.eth_reserve * self.token_reserve
    }

    /// Spot price in TOKEN per ETH
    pub fn price(&self) -> f64 {
        if self.eth_reserve == 0.0 {
            return 0.0;
        }
        self.token_reserve / self.eth_reserve
    }

    /// TOKEN received for `eth_in` at the current reserves, without executing
    pub fn quote_buy(&self, eth_in: f64) -> f64 {
        compute_output(eth_in, self.eth_reserve, self.token_reserve, self.fee_bps)
    }

    /// Buy TOKEN with ETH, returning the resulting reserves
    pub fn buy(&self, eth_in: f64) -> Result<SwapResult> {
        execute_buy(eth_in, self.eth_reserve, self.token_reserve, self.fee_bps)
    }

    /// Sell TOKEN for ETH, returning the resulting reserves
    pub fn sell(&self, token_in: f64) -> Result<SwapResult> {
        execute_sell(token_in, self.eth_reserve, self.token_reserve, self.fee_bps)
    }

    /// Calculate minimum output with slippage tolerance (in percent)
    pub fn calculate_min_output(&self, eth_in: f64, slippage_pct: f64) -> f64 {
        min_output(self.quote_buy(eth_in), slippage_pct)
    }
}

/// Smallest acceptable output for a quoted amount under a tolerance in percent
pub fn min_output(quoted: f64, slippage_pct: f64) -> f64 {
    quoted * (1.0 - slippage_pct / 100.0)
}
