//! HTML Report Generation with Chart.js

use crate::analytics::metrics::{MetricsCalculator, SimulationOutcome};
use crate::simulation::SweepResults;
use anyhow::{Context, Result};
use minijinja::{context, Environment};
use serde::Serialize;
use std::fs;
use tracing::info;

const REPORT_TEMPLATE: &str = include_str!("report.html.j2");

/// Generate an HTML report with interactive charts
pub fn generate_report(results: &SweepResults, output_path: &str) -> Result<String> {
    // Ensure output directory exists
    if let Some(parent) = std::path::Path::new(output_path).parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }

    let html = render_html(results)?;

    fs::write(output_path, html).context("Failed to write report file")?;

    info!("Report generated: {}", output_path);
    Ok(output_path.to_string())
}

/// Run with the largest victim loss; its price path is charted
fn worst_run(results: &SweepResults) -> Option<&SimulationOutcome> {
    results
        .outcomes
        .iter()
        .max_by(|a, b| a.user_loss.total_cmp(&b.user_loss))
}

fn render_html(results: &SweepResults) -> Result<String> {
    let s = &results.summary;

    // Prepare chart data
    let cumulative_profit = MetricsCalculator::cumulative_profit(results);
    let cumulative_losses = MetricsCalculator::cumulative_losses(results);
    let loss_distribution = MetricsCalculator::loss_distribution(results);
    let profit_distribution = MetricsCalculator::profit_distribution(results);
    let scatter = MetricsCalculator::profit_by_trade_size(results);

    let run_labels: Vec<u32> = cumulative_profit.iter().map(|p| p.run + 1).collect();
    let profit_values: Vec<f64> = cumulative_profit.iter().map(|p| p.value).collect();
    let loss_values: Vec<f64> = cumulative_losses.iter().map(|p| p.value).collect();
    let hist_labels: Vec<&str> = loss_distribution.iter().map(|b| b.label.as_str()).collect();
    let hist_values: Vec<u32> = loss_distribution.iter().map(|b| b.count).collect();
    let profit_hist_labels: Vec<&str> = profit_distribution.iter().map(|b| b.label.as_str()).collect();
    let profit_hist_values: Vec<u32> = profit_distribution.iter().map(|b| b.count).collect();

    let (path_labels, path_prices, worst_trade) = match worst_run(results) {
        Some(o) => (
            o.trace.history.iter().map(|h| h.step.to_string()).collect(),
            o.trace.history.iter().map(|h| h.price).collect(),
            o.trade_amount,
        ),
        None => (Vec::<String>::new(), Vec::<f64>::new(), 0.0),
    };

    let mut env = Environment::new();
    env.add_template("report.html", REPORT_TEMPLATE)
        .context("Failed to parse report template")?;
    let template = env.get_template("report.html")?;

    let html = template
        .render(context! {
            timestamp => chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            total_runs => s.total_runs,
            liquidity => format!("{:.2}", results.config.liquidity_eth),
            trade_range => format!("{:.2} - {:.2}", results.config.min_trade_eth, results.config.max_trade_eth),
            fee_pct => format!("{:.2}", results.engine.fee_bps as f64 / 100.0),
            total_profit => format!("{:.4}", s.total_attacker_profit),
            total_losses => format!("{:.2}", s.total_victim_losses),
            avg_loss => format!("{:.4}", s.avg_loss_per_run),
            avg_slippage => format!("{:.4}", s.avg_victim_slippage_pct),
            success_rate => format!("{:.1}", s.attack_success_rate),
            profitable => s.profitable_attacks,
            breaches => s.tolerance_breaches,
            worst_trade => format!("{:.4}", worst_trade),
            run_labels => json(&run_labels)?,
            profit_values => json(&profit_values)?,
            loss_values => json(&loss_values)?,
            hist_labels => json(&hist_labels)?,
            hist_values => json(&hist_values)?,
            profit_hist_labels => json(&profit_hist_labels)?,
            profit_hist_values => json(&profit_hist_values)?,
            scatter => json(&scatter)?,
            path_labels => json(&path_labels)?,
            path_prices => json(&path_prices)?,
        })
        .context("Failed to render report")?;

    Ok(html)
}

/// Chart data serialized for embedding in a `<script>` block
fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("Failed to serialize chart data")
}
