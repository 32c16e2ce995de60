//! Analytics modules for metrics, logging and report generation

pub mod logger;
pub mod metrics;
pub mod report;
pub mod risk;

pub use logger::SimulationLogger;
pub use metrics::{MetricsCalculator, SimulationOutcome};
pub use report::generate_report;
pub use risk::{assess_slippage_risk, plan_batches, BatchPlan, RiskLevel, SlippageRisk};
