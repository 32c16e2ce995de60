//! Simulation Orchestrator
//!
//! Entry point for a single sandwich simulation, and the sweep runner that
//! repeats it over randomly sized victim trades.

use crate::analytics::metrics::{MetricsCalculator, SimulationOutcome};
use crate::bots::{
    sandwich_attacker::SandwichAttacker,
    victim::{random_trade_amount, VictimTrade},
};
use crate::config::{SimulationConfig, SweepConfig};
use crate::error::{ensure_positive, Result};
use crate::utils::amm_math::PoolState;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Caller-supplied parameters of one simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationInputs {
    /// Victim's trade in ETH
    pub trade_amount: f64,
    /// Victim's slippage tolerance in percent
    pub slippage_tolerance_pct: f64,
    /// Pool ETH reserve
    pub liquidity_eth: f64,
}

impl SimulationInputs {
    pub fn new(trade_amount: f64, slippage_tolerance_pct: f64, liquidity_eth: f64) -> Self {
        Self {
            trade_amount,
            slippage_tolerance_pct,
            liquidity_eth,
        }
    }
}

/// Simulate a sandwich around one victim buy.
///
/// Fails on non-positive or non-finite amounts, on an invalid config, or if
/// any step would leave a reserve that is not strictly positive.
pub fn run_attack_simulation(inputs: &SimulationInputs, config: &SimulationConfig) -> Result<SimulationOutcome> {
    config.validate()?;
    let liquidity = ensure_positive("liquidity_eth", inputs.liquidity_eth)?;
    let victim = VictimTrade::new(inputs.trade_amount, inputs.slippage_tolerance_pct)?;

    let pool = PoolState::with_price(liquidity, config.initial_price, config.fee_bps);
    let attacker = SandwichAttacker::from_config(config);
    let trace = attacker.execute_sandwich(&pool, &victim)?;
    let outcome = MetricsCalculator::outcome(&victim, trace);

    debug!(
        "Sandwich on {} ETH: loss {} TOKEN, profit {} ETH",
        inputs.trade_amount, outcome.user_loss, outcome.attacker_profit_eth
    );
    Ok(outcome)
}

/// Results of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResults {
    /// Configuration used
    pub config: SweepConfig,
    /// Engine parameters used
    pub engine: SimulationConfig,
    /// One outcome per run, in run order
    pub outcomes: Vec<SimulationOutcome>,
    /// Summary statistics
    pub summary: SweepSummary,
}

/// Summary statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    /// Runs simulated
    pub total_runs: u32,
    /// Runs where the back-run returned more ETH than the front-run cost
    pub profitable_attacks: u32,
    /// Profitable attacks as a percentage of runs
    pub attack_success_rate: f64,
    /// Sum of attacker profit (ETH)
    pub total_attacker_profit: f64,
    /// Sum of victim losses (TOKEN)
    pub total_victim_losses: f64,
    /// Average victim loss per run (TOKEN)
    pub avg_loss_per_run: f64,
    /// Average victim slippage in percent
    pub avg_victim_slippage_pct: f64,
    /// Runs where the victim got less than their minimum
    pub tolerance_breaches: u32,
    /// Total victim volume (ETH)
    pub total_volume: f64,
    /// Average victim trade (ETH)
    pub avg_trade_amount: f64,
}

/// Runs many independent simulations
pub struct Orchestrator {
    config: SweepConfig,
    engine: SimulationConfig,
    rng: StdRng,
}

impl Orchestrator {
    /// Create a new orchestrator with the given configuration
    pub fn new(config: SweepConfig, engine: SimulationConfig) -> Result<Self> {
        config.validate()?;
        engine.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self { config, engine, rng })
    }

    /// Run the complete sweep. Every run starts from a fresh pool.
    pub fn run(&mut self) -> Result<SweepResults> {
        info!("Starting sandwich sweep...");
        info!("Runs: {}", self.config.runs);
        info!(
            "Trade range: {} - {} ETH, pool {} ETH",
            self.config.min_trade_eth, self.config.max_trade_eth, self.config.liquidity_eth
        );

        let mut outcomes = Vec::with_capacity(self.config.runs as usize);

        for i in 0..self.config.runs {
            let amount = random_trade_amount(
                &mut self.rng,
                self.config.min_trade_eth,
                self.config.max_trade_eth,
            );
            let inputs = SimulationInputs::new(
                amount,
                self.config.slippage_tolerance_pct,
                self.config.liquidity_eth,
            );
            outcomes.push(run_attack_simulation(&inputs, &self.engine)?);

            // Progress logging
            if (i + 1) % 100 == 0 || i == 0 {
                info!("Progress: {}/{} runs", i + 1, self.config.runs);
            }
        }

        let summary = calculate_summary(&outcomes);

        info!("Sweep complete!");
        info!("Total attacker profit: {:.6} ETH", summary.total_attacker_profit);
        info!("Total victim losses: {:.4} TOKEN", summary.total_victim_losses);

        Ok(SweepResults {
            config: self.config.clone(),
            engine: self.engine.clone(),
            outcomes,
            summary,
        })
    }
}

/// Calculate summary statistics
pub fn calculate_summary(outcomes: &[SimulationOutcome]) -> SweepSummary {
    let total_runs = outcomes.len() as u32;
    if total_runs == 0 {
        return SweepSummary::default();
    }
    let runs = total_runs as f64;

    let profitable_attacks = outcomes.iter().filter(|o| o.is_profitable()).count() as u32;
    let tolerance_breaches = outcomes.iter().filter(|o| o.exceeded_tolerance).count() as u32;

    let total_attacker_profit: f64 = outcomes.iter().map(|o| o.attacker_profit_eth).sum();
    let total_victim_losses: f64 = outcomes.iter().map(|o| o.user_loss).sum();
    let total_slippage: f64 = outcomes.iter().map(|o| o.victim_slippage_pct).sum();
    let total_volume: f64 = outcomes.iter().map(|o| o.trade_amount).sum();

    SweepSummary {
        total_runs,
        profitable_attacks,
        attack_success_rate: profitable_attacks as f64 / runs * 100.0,
        total_attacker_profit,
        total_victim_losses,
        avg_loss_per_run: total_victim_losses / runs,
        avg_victim_slippage_pct: total_slippage / runs,
        tolerance_breaches,
        total_volume,
        avg_trade_amount: total_volume / runs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;

    #[test]
    fn test_scenario_reference_pool() {
        let outcome = run_attack_simulation(
            &SimulationInputs::new(10.0, 1.0, 1000.0),
            &SimulationConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.trace.initial.token_reserve, 100_000.0);
        assert_eq!(outcome.trace.frontrun_amount, 5.0);
        assert!(outcome.actual_tokens < outcome.expected_tokens);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let config = SimulationConfig::default();
        for inputs in [
            SimulationInputs::new(0.0, 1.0, 1000.0),
            SimulationInputs::new(10.0, 1.0, 0.0),
            SimulationInputs::new(10.0, 1.0, -1.0),
            SimulationInputs::new(f64::NAN, 1.0, 1000.0),
            SimulationInputs::new(10.0, -1.0, 1000.0),
        ] {
            assert!(run_attack_simulation(&inputs, &config).is_err(), "{:?}", inputs);
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SimulationConfig {
            initial_price: 0.0,
            ..Default::default()
        };
        let err = run_attack_simulation(&SimulationInputs::new(1.0, 1.0, 10.0), &config).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn test_orchestrator_quick_run() {
        let mut orchestrator =
            Orchestrator::new(SweepConfig::quick_test(), SimulationConfig::default()).unwrap();
        let results = orchestrator.run().unwrap();

        assert_eq!(results.outcomes.len(), 100);
        assert_eq!(results.summary.total_runs, 100);
        assert!(results.summary.total_victim_losses > 0.0);
        assert!(results.outcomes.iter().all(|o| o.trade_amount >= 0.1 && o.trade_amount <= 50.0));
    }

    #[test]
    fn test_seeded_sweep_is_reproducible() {
        let config = SweepConfig {
            runs: 20,
            seed: Some(1234),
            ..Default::default()
        };
        let a = Orchestrator::new(config.clone(), SimulationConfig::default()).unwrap().run().unwrap();
        let b = Orchestrator::new(config, SimulationConfig::default()).unwrap().run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_of_nothing() {
        assert_eq!(calculate_summary(&[]), SweepSummary::default());
    }
}
