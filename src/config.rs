//! Simulation configuration

use crate::error::{Result, SimulationError};
use crate::utils::amm_math::DEFAULT_FEE_BPS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine parameters for a single sandwich simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// AMM fee in basis points (30 = 0.3%)
    pub fee_bps: u16,

    /// Starting pool price in TOKEN per ETH
    pub initial_price: f64,

    /// Front-run cap as a fraction of the victim's trade
    pub frontrun_trade_fraction: f64,

    /// Front-run cap as a fraction of the pool's ETH reserve
    pub frontrun_liquidity_fraction: f64,

    /// Output directory for logs and reports
    pub output_dir: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fee_bps: DEFAULT_FEE_BPS,           // 0.3%
            initial_price: 100.0,               // 100 TOKEN / ETH
            frontrun_trade_fraction: 0.5,
            frontrun_liquidity_fraction: 0.05,
            output_dir: "output".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Load a config from a JSON file. Missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fee_bps >= 10_000 {
            return Err(SimulationError::InvalidConfig(format!(
                "fee_bps must be below 10000, got {}",
                self.fee_bps
            )));
        }
        if !(self.initial_price.is_finite() && self.initial_price > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "initial_price must be positive, got {}",
                self.initial_price
            )));
        }
        for (name, value) in [
            ("frontrun_trade_fraction", self.frontrun_trade_fraction),
            ("frontrun_liquidity_fraction", self.frontrun_liquidity_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Parameters for a batch of independent simulations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Number of simulations to run
    pub runs: u32,

    /// Smallest victim trade in ETH
    pub min_trade_eth: f64,

    /// Largest victim trade in ETH
    pub max_trade_eth: f64,

    /// Pool ETH reserve for every run
    pub liquidity_eth: f64,

    /// Victim slippage tolerance in percent
    pub slippage_tolerance_pct: f64,

    /// RNG seed; a fixed seed reproduces the sweep exactly
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            runs: 1000,
            min_trade_eth: 0.1,
            max_trade_eth: 50.0,
            liquidity_eth: 1000.0,
            slippage_tolerance_pct: 1.0,
            seed: None,
        }
    }
}

impl SweepConfig {
    /// Create config for a quick test run
    pub fn quick_test() -> Self {
        Self {
            runs: 100,
            seed: Some(42),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(SimulationError::InvalidConfig("runs must be at least 1".into()));
        }
        crate::error::ensure_positive("min_trade_eth", self.min_trade_eth)?;
        crate::error::ensure_positive("max_trade_eth", self.max_trade_eth)?;
        crate::error::ensure_positive("liquidity_eth", self.liquidity_eth)?;
        crate::error::ensure_non_negative("slippage_tolerance_pct", self.slippage_tolerance_pct)?;
        if self.min_trade_eth > self.max_trade_eth {
            return Err(SimulationError::InvalidConfig(format!(
                "min_trade_eth ({}) exceeds max_trade_eth ({})",
                self.min_trade_eth, self.max_trade_eth
            )));
        }
        Ok(())
    }
}
