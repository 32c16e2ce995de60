//! Simulation modules

pub mod orchestrator;
pub mod pool_state;

pub use orchestrator::{run_attack_simulation, Orchestrator, SimulationInputs, SweepResults, SweepSummary};
pub use pool_state::{AttackStep, PoolSnapshot, SimulatedPool};
