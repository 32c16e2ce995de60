//! Sandwich Attack Simulation Engine
//!
//! Simulates a front-run / victim / back-run sandwich against a
//! constant-product ETH/TOKEN pool and measures the victim's loss and the
//! attacker's profit.

pub mod analytics;
pub mod bots;
pub mod config;
pub mod error;
pub mod simulation;
pub mod utils;

pub use analytics::{report::generate_report, SimulationOutcome};
pub use config::{SimulationConfig, SweepConfig};
pub use error::{Result, SimulationError};
pub use simulation::{run_attack_simulation, Orchestrator, SimulationInputs};
