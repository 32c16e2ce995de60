//! Simulated Pool State Management
//!
//! Threads pool reserves through the steps of one sandwich and keeps a
//! snapshot after each, so a renderer can replay the price path.

use crate::utils::amm_math::{PoolState, SwapResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a snapshot in the attack sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackStep {
    Initial,
    Frontrun,
    Victim,
    Backrun,
}

impl fmt::Display for AttackStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttackStep::Initial => "initial",
            AttackStep::Frontrun => "front-run",
            AttackStep::Victim => "victim",
            AttackStep::Backrun => "back-run",
        };
        f.write_str(label)
    }
}

/// Snapshot of pool state after a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub step: AttackStep,
    pub eth_reserve: f64,
    pub token_reserve: f64,
    /// TOKEN per ETH
    pub price: f64,
}

impl PoolSnapshot {
    fn of(step: AttackStep, state: &PoolState) -> Self {
        Self {
            step,
            eth_reserve: state.eth_reserve,
            token_reserve: state.token_reserve,
            price: state.price(),
        }
    }
}

/// Pool owned by a single simulation run, with history tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedPool {
    /// Current pool state
    state: PoolState,
    /// History of pool states, starting with the initial one
    history: Vec<PoolSnapshot>,
}

impl SimulatedPool {
    /// Create a new simulated pool
    pub fn new(state: PoolState) -> Self {
        Self {
            state,
            history: vec![PoolSnapshot::of(AttackStep::Initial, &state)],
        }
    }

    /// Get current state
    pub fn current(&self) -> &PoolState {
        &self.state
    }

    /// Adopt the reserves produced by `swap` and record them under `step`
    pub fn record(&mut self, step: AttackStep, swap: &SwapResult) {
        self.state = swap.into_state(self.state.fee_bps);
        self.history.push(PoolSnapshot::of(step, &self.state));
    }

    pub fn into_history(self) -> Vec<PoolSnapshot> {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_pool() {
        let mut pool = SimulatedPool::new(PoolState::with_price(1000.0, 100.0, 30));

        let swap = pool.current().buy(10.0).unwrap();
        pool.record(AttackStep::Frontrun, &swap);

        assert_eq!(pool.current().eth_reserve, 1010.0);
        assert_eq!(pool.current().token_reserve, swap.new_token_reserve);
        assert_eq!(pool.current().fee_bps, 30);

        let history = pool.into_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].step, AttackStep::Initial);
        assert_eq!(history[0].price, 100.0);
        assert_eq!(history[1].step, AttackStep::Frontrun);
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(AttackStep::Frontrun.to_string(), "front-run");
        assert_eq!(
            serde_json::to_string(&AttackStep::Backrun).unwrap(),
            "\"backrun\""
        );
    }
}
