//! Pre-trade risk helpers
//!
//! Rough guidance a trader can get before submitting a swap: how much a
//! given slippage tolerance exposes to a sandwich, and how to split a large
//! order so each piece moves the pool less.

use crate::error::{ensure_non_negative, ensure_positive, Result, SimulationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of the exposed amount an attacker keeps after their own costs
pub const ATTACKER_CAPTURE_RATIO: f64 = 0.7;

/// Tolerances up to this are low risk (percent)
pub const LOW_RISK_MAX_SLIPPAGE_PCT: f64 = 0.5;

/// Tolerances up to this are medium risk (percent)
pub const MEDIUM_RISK_MAX_SLIPPAGE_PCT: f64 = 1.5;

/// Recommended single batch as a fraction of pool liquidity (0.5%-1% band midpoint)
pub const RECOMMENDED_BATCH_FRACTION: f64 = 0.0075;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_slippage(slippage_pct: f64) -> Self {
        if slippage_pct <= LOW_RISK_MAX_SLIPPAGE_PCT {
            RiskLevel::Low
        } else if slippage_pct <= MEDIUM_RISK_MAX_SLIPPAGE_PCT {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => f.write_str("low"),
            RiskLevel::Medium => f.write_str("medium"),
            RiskLevel::High => f.write_str("high"),
        }
    }
}

/// Exposure of a trade at a given slippage tolerance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlippageRisk {
    pub amount: f64,
    pub slippage_pct: f64,
    /// Most the trade can lose before the tolerance check reverts it
    pub max_loss: f64,
    /// Portion of `max_loss` an attacker can realistically extract
    pub attacker_space: f64,
    pub level: RiskLevel,
}

pub fn assess_slippage_risk(amount: f64, slippage_pct: f64) -> Result<SlippageRisk> {
    let amount = ensure_non_negative("amount", amount)?;
    let slippage_pct = ensure_non_negative("slippage_pct", slippage_pct)?;

    let max_loss = amount * (slippage_pct / 100.0);

    Ok(SlippageRisk {
        amount,
        slippage_pct,
        max_loss,
        attacker_space: max_loss * ATTACKER_CAPTURE_RATIO,
        level: RiskLevel::from_slippage(slippage_pct),
    })
}

/// Order split suggested for a given pool depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchPlan {
    pub total_eth: f64,
    pub liquidity_eth: f64,
    pub batch_count: u64,
    /// Equal size of every batch
    pub batch_size: f64,
    /// Batch size as a percentage of pool liquidity
    pub price_impact_pct: f64,
}

/// Split `total_eth` into equal batches no bigger than the recommended size.
pub fn plan_batches(total_eth: f64, liquidity_eth: f64) -> Result<BatchPlan> {
    let total_eth = ensure_positive("total_eth", total_eth)?;
    let liquidity_eth = ensure_positive("liquidity_eth", liquidity_eth)?;

    let recommended = liquidity_eth * RECOMMENDED_BATCH_FRACTION;
    let batches = (total_eth / recommended).ceil();
    // Would saturate the cast below
    if !batches.is_finite() || batches > u64::MAX as f64 {
        return Err(SimulationError::InvalidInput {
            field: "total_eth",
            value: total_eth,
        });
    }
    let batch_count = (batches as u64).max(1);
    let batch_size = total_eth / batch_count as f64;

    Ok(BatchPlan {
        total_eth,
        liquidity_eth,
        batch_count,
        batch_size,
        price_impact_pct: batch_size / liquidity_eth * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_levels() {
        assert_eq!(RiskLevel::from_slippage(0.1), RiskLevel::Low);
        assert_eq!(RiskLevel::from_slippage(0.5), RiskLevel::Low);
        assert_eq!(RiskLevel::from_slippage(1.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_slippage(1.5), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_slippage(3.0), RiskLevel::High);
    }

    #[test]
    fn test_slippage_risk() {
        let risk = assess_slippage_risk(10_000.0, 2.0).unwrap();
        assert!((risk.max_loss - 200.0).abs() < 1e-9);
        assert!((risk.attacker_space - 140.0).abs() < 1e-9);
        assert_eq!(risk.level, RiskLevel::High);

        assert!(assess_slippage_risk(-1.0, 1.0).is_err());
        assert!(assess_slippage_risk(1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_batch_plan() {
        // 100 ETH into a 1000 ETH pool: 7.5 ETH recommended, 14 batches
        let plan = plan_batches(100.0, 1000.0).unwrap();
        assert_eq!(plan.batch_count, 14);
        assert!((plan.batch_size - 100.0 / 14.0).abs() < 1e-12);
        assert!(plan.batch_size <= 7.5);
        assert!((plan.price_impact_pct - plan.batch_size / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_small_order_is_one_batch() {
        let plan = plan_batches(1.0, 1000.0).unwrap();
        assert_eq!(plan.batch_count, 1);
        assert_eq!(plan.batch_size, 1.0);
    }

    #[test]
    fn test_batch_rejects_zero() {
        assert!(plan_batches(0.0, 1000.0).is_err());
        assert!(plan_batches(10.0, 0.0).is_err());
    }

    #[test]
    fn test_batch_rejects_unbounded_count() {
        // Recommended size underflows to a subnormal, the ratio overflows
        assert!(matches!(
            plan_batches(1e300, 1e-300),
            Err(SimulationError::InvalidInput { field: "total_eth", .. })
        ));
        assert!(plan_batches(1e30, 1.0).is_err());
    }
}
