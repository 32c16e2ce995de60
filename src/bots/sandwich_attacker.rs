//! Sandwich Attack Bot
//!
//! Front-runs a pending victim buy, lets it land at the worse price, then
//! sells the front-run tokens back into the pool.

use crate::bots::victim::VictimTrade;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::simulation::pool_state::{AttackStep, PoolSnapshot, SimulatedPool};
use crate::utils::amm_math::{PoolState, SwapResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Full record of one sandwich: the three swaps in execution order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackTrace {
    /// Pool before the front-run
    pub initial: PoolState,
    /// ETH the attacker committed to the front-run
    pub frontrun_amount: f64,
    /// Attacker buys TOKEN
    pub frontrun: SwapResult,
    /// Victim buys TOKEN at the worse price
    pub victim: SwapResult,
    /// Attacker sells the front-run TOKEN back
    pub backrun: SwapResult,
    /// Initial state plus the state after each step
    pub history: Vec<PoolSnapshot>,
}

impl AttackTrace {
    pub fn tokens_from_frontrun(&self) -> f64 {
        self.frontrun.output
    }

    pub fn victim_actual_tokens(&self) -> f64 {
        self.victim.output
    }

    pub fn backrun_eth_received(&self) -> f64 {
        self.backrun.output
    }

    /// Pool after the back-run
    pub fn final_state(&self) -> PoolState {
        self.backrun.into_state(self.initial.fee_bps)
    }
}

/// Sandwich attack bot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandwichAttacker {
    /// Front-run cap relative to the victim's trade
    trade_fraction: f64,
    /// Front-run cap relative to the pool's ETH reserve
    liquidity_fraction: f64,
}

impl SandwichAttacker {
    /// Create a new sandwich attacker
    pub fn new(trade_fraction: f64, liquidity_fraction: f64) -> Self {
        Self {
            trade_fraction,
            liquidity_fraction,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.frontrun_trade_fraction, config.frontrun_liquidity_fraction)
    }

    /// ETH to front-run with: bounded by the victim's size and the pool's depth
    pub fn frontrun_amount(&self, victim_amount: f64, pool: &PoolState) -> f64 {
        (victim_amount * self.trade_fraction).min(pool.eth_reserve * self.liquidity_fraction)
    }

    /// Run front-run, victim and back-run against `pool`.
    ///
    /// Each step consumes the reserves left by the previous one. `pool`
    /// itself is not modified.
    pub fn execute_sandwich(&self, pool: &PoolState, victim: &VictimTrade) -> Result<AttackTrace> {
        let frontrun_amount = self.frontrun_amount(victim.amount_in, pool);
        let mut sim_pool = SimulatedPool::new(*pool);

        // 1. Front-run: attacker buys in the victim's direction
        debug!("Front-running with {} ETH", frontrun_amount);
        let frontrun = sim_pool.current().buy(frontrun_amount)?;
        sim_pool.record(AttackStep::Frontrun, &frontrun);

        // 2. Victim's swap (at worse price)
        let victim_swap = victim.execute_trade(sim_pool.current())?;
        sim_pool.record(AttackStep::Victim, &victim_swap);

        // 3. Back-run: sell exactly what the front-run bought
        debug!("Back-running with {} TOKEN", frontrun.output);
        let backrun = sim_pool.current().sell(frontrun.output)?;
        sim_pool.record(AttackStep::Backrun, &backrun);

        Ok(AttackTrace {
            initial: *pool,
            frontrun_amount,
            frontrun,
            victim: victim_swap,
            backrun,
            history: sim_pool.into_history(),
        })
    }
}

impl Default for SandwichAttacker {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> PoolState {
        PoolState::with_price(1000.0, 100.0, 30)
    }

    #[test]
    fn test_frontrun_sizing() {
        let attacker = SandwichAttacker::default();

        // Capped by half the victim's trade
        assert_eq!(attacker.frontrun_amount(10.0, &pool()), 5.0);
        // Capped by 5% of the pool
        assert_eq!(attacker.frontrun_amount(500.0, &pool()), 50.0);
    }

    #[test]
    fn test_sandwich_attack() {
        let attacker = SandwichAttacker::default();
        let victim = VictimTrade::new(10.0, 1.0).unwrap();
        let trace = attacker.execute_sandwich(&pool(), &victim).unwrap();

        // Reserves thread from one step into the next
        assert_eq!(trace.frontrun.new_eth_reserve, 1005.0);
        assert_eq!(trace.victim.new_eth_reserve, 1015.0);
        assert_eq!(trace.backrun.new_token_reserve, trace.victim.new_token_reserve + trace.frontrun.output);

        // The attack should cause some victim loss
        assert!(trace.victim_actual_tokens() < victim.calculate_expected(&pool()));
    }

    #[test]
    fn test_history_has_every_step() {
        let trace = SandwichAttacker::default()
            .execute_sandwich(&pool(), &VictimTrade::new(10.0, 1.0).unwrap())
            .unwrap();

        let steps: Vec<AttackStep> = trace.history.iter().map(|s| s.step).collect();
        assert_eq!(
            steps,
            vec![AttackStep::Initial, AttackStep::Frontrun, AttackStep::Victim, AttackStep::Backrun]
        );
        assert_eq!(trace.history[3].eth_reserve, trace.final_state().eth_reserve);
        // TOKEN per ETH falls through both buys and recovers on the sell
        assert!(trace.history[1].price < trace.history[0].price);
        assert!(trace.history[2].price < trace.history[1].price);
        assert!(trace.history[3].price > trace.history[2].price);
    }

    #[test]
    fn test_input_pool_untouched() {
        let p = pool();
        let _ = SandwichAttacker::default()
            .execute_sandwich(&p, &VictimTrade::new(10.0, 1.0).unwrap())
            .unwrap();
        assert_eq!(p, pool());
    }
}
