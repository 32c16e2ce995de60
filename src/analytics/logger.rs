//! Structured logging for simulation results

use crate::analytics::metrics::SimulationOutcome;
use crate::simulation::SweepResults;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Handles logging of simulation results to files
pub struct SimulationLogger {
    output_dir: String,
}

impl SimulationLogger {
    /// Create a new logger with the specified output directory
    pub fn new(output_dir: &str) -> Self {
        Self {
            output_dir: output_dir.to_string(),
        }
    }

    /// Ensure output directories exist
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(format!("{}/logs", self.output_dir))
            .context("Failed to create logs directory")?;
        fs::create_dir_all(format!("{}/reports", self.output_dir))
            .context("Failed to create reports directory")?;
        Ok(())
    }

    /// Where the HTML report for this output directory goes
    pub fn report_path(&self) -> String {
        format!("{}/reports/report.html", self.output_dir)
    }

    /// Save a single outcome to a JSON file
    pub fn save_outcome(&self, outcome: &SimulationOutcome) -> Result<String> {
        self.write_json("sandwich", outcome)
    }

    /// Save sweep results to a JSON file
    pub fn save_results(&self, results: &SweepResults) -> Result<String> {
        self.write_json("sweep", results)
    }

    fn write_json<T: Serialize>(&self, prefix: &str, value: &T) -> Result<String> {
        self.ensure_dirs()?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}/logs/{}_{}.json", self.output_dir, prefix, timestamp);

        let json = serde_json::to_string_pretty(value)
            .context("Failed to serialize results")?;

        let mut file = File::create(&filename)
            .context("Failed to create log file")?;

        file.write_all(json.as_bytes())
            .context("Failed to write log file")?;

        info!("Results saved to: {}", filename);
        Ok(filename)
    }

    /// Load sweep results from a JSON file
    pub fn load_results(path: &Path) -> Result<SweepResults> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read results file {}", path.display()))?;

        serde_json::from_str(&contents)
            .context("Failed to parse results file")
    }

    /// Save a summary text file
    pub fn save_summary(&self, results: &SweepResults) -> Result<String> {
        self.ensure_dirs()?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}/logs/summary_{}.txt", self.output_dir, timestamp);

        let mut file = File::create(&filename)
            .context("Failed to create summary file")?;

        file.write_all(format_summary(results).as_bytes())
            .context("Failed to write summary file")?;

        info!("Summary saved to: {}", filename);
        Ok(filename)
    }
}

/// Format one outcome with its step-by-step trace
pub fn format_outcome(outcome: &SimulationOutcome) -> String {
    let t = &outcome.trace;
    let mut out = String::new();

    out.push_str("\n  POOL STATES\n");
    out.push_str("  ───────────\n");
    for snap in &t.history {
        out.push_str(&format!(
            "  {:<10} {:>16.4} ETH {:>18.4} TOKEN   price {:>10.2}\n",
            snap.step.to_string(),
            snap.eth_reserve,
            snap.token_reserve,
            snap.price
        ));
    }

    out.push_str(&format!(
        r#"
  STEPS
  ─────
  1. Front-run:  buy  {:>12.4} ETH   -> {:>14.2} TOKEN
  2. Victim:     buy  {:>12.4} ETH   -> {:>14.2} TOKEN
  3. Back-run:   sell {:>12.2} TOKEN -> {:>14.4} ETH

  RESULT
  ──────
  Expected tokens:     {:>14.2} TOKEN
  Actual tokens:       {:>14.2} TOKEN
  Victim loss:         {:>14.2} TOKEN ({:.2}%)
  Attacker profit:     {:>14.4} ETH
  Within tolerance:    {:>14}
"#,
        t.frontrun_amount,
        t.frontrun.output,
        outcome.trade_amount,
        t.victim.output,
        t.frontrun.output,
        t.backrun.output,
        outcome.expected_tokens,
        outcome.actual_tokens,
        outcome.user_loss,
        outcome.victim_slippage_pct,
        outcome.attacker_profit_eth,
        if outcome.exceeded_tolerance { "no" } else { "yes" },
    ));

    out
}

/// Format sweep results as a text summary
pub fn format_summary(results: &SweepResults) -> String {
    let s = &results.summary;
    let c = &results.config;

    format!(
        r#"
╔══════════════════════════════════════════════════════════════════╗
║            SANDWICH SWEEP RESULTS                                ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  CONFIGURATION                                                   ║
║  ─────────────                                                   ║
║  Runs:                  {:>10}                                   ║
║  Pool Liquidity:        {:>10.2} ETH                             ║
║  Min Trade:             {:>10.4} ETH                             ║
║  Max Trade:             {:>10.4} ETH                             ║
║  Slippage Tolerance:    {:>10.2}%                                ║
║  Pool Fee:              {:>10.2}%                                ║
║                                                                  ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  ATTACKER                                                        ║
║  ────────                                                        ║
║  Profitable Attacks:    {:>10}                                   ║
║  Success Rate:          {:>10.1}%                                ║
║  Total Profit:          {:>10.4} ETH                             ║
║                                                                  ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  VICTIMS                                                         ║
║  ───────                                                         ║
║  Total Losses:          {:>10.2} TOKEN                           ║
║  Avg Loss per Run:      {:>10.4} TOKEN                           ║
║  Avg Slippage:          {:>10.4}%                                ║
║  Tolerance Breaches:    {:>10}                                   ║
║                                                                  ║
║  Total Volume:          {:>10.4} ETH                             ║
║  Average Trade:         {:>10.4} ETH                             ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝

Generated: {}
"#,
        s.total_runs,
        c.liquidity_eth,
        c.min_trade_eth,
        c.max_trade_eth,
        c.slippage_tolerance_pct,
        results.engine.fee_bps as f64 / 100.0,
        s.profitable_attacks,
        s.attack_success_rate,
        s.total_attacker_profit,
        s.total_victim_losses,
        s.avg_loss_per_run,
        s.avg_victim_slippage_pct,
        s.tolerance_breaches,
        s.total_volume,
        s.avg_trade_amount,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// Print summary to terminal
pub fn print_summary(results: &SweepResults) {
    println!("{}", format_summary(results));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SimulationConfig, SweepConfig};
    use crate::simulation::{run_attack_simulation, Orchestrator, SimulationInputs};

    fn sweep() -> SweepResults {
        let config = SweepConfig {
            runs: 5,
            seed: Some(9),
            ..Default::default()
        };
        Orchestrator::new(config, SimulationConfig::default())
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn test_results_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let logger = SimulationLogger::new(dir.path().to_str().unwrap());
        let results = sweep();

        let path = logger.save_results(&results).unwrap();
        let loaded = SimulationLogger::load_results(Path::new(&path)).unwrap();
        assert_eq!(loaded.outcomes.len(), 5);
        assert_eq!(loaded.summary.total_runs, results.summary.total_runs);

        let summary_path = logger.save_summary(&results).unwrap();
        assert!(fs::read_to_string(summary_path).unwrap().contains("SANDWICH SWEEP RESULTS"));
    }

    #[test]
    fn test_format_outcome_lists_steps() {
        let outcome = run_attack_simulation(
            &SimulationInputs::new(10.0, 1.0, 1000.0),
            &SimulationConfig::default(),
        )
        .unwrap();
        let text = format_outcome(&outcome);

        assert!(text.contains("front-run"));
        assert!(text.contains("back-run"));
        assert!(text.contains("Victim loss"));
    }

    #[test]
    fn test_report_path_follows_output_dir() {
        let logger = SimulationLogger::new("runs/deep-pool");
        assert_eq!(logger.report_path(), "runs/deep-pool/reports/report.html");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(SimulationLogger::load_results(Path::new("/nonexistent/sweep.json")).is_err());
    }
}
