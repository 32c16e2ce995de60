//! Metrics calculation for simulation analysis

use crate::bots::{AttackTrace, VictimTrade};
use crate::simulation::SweepResults;
use serde::{Deserialize, Serialize};

/// Economic result of one sandwich, plus the trace it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// ETH the victim paid in
    pub trade_amount: f64,
    /// TOKEN the victim would have received from the untouched pool
    pub expected_tokens: f64,
    /// TOKEN the victim actually received
    pub actual_tokens: f64,
    /// expected - actual, in TOKEN
    pub user_loss: f64,
    /// Back-run proceeds minus front-run capital, in ETH (may be negative)
    pub attacker_profit_eth: f64,
    /// Minimum output the victim's tolerance allowed
    pub victim_min_tokens: f64,
    /// Loss as a percentage of the expected output
    pub victim_slippage_pct: f64,
    /// Whether the victim received less than their minimum
    pub exceeded_tolerance: bool,
    /// Every swap and pool state of the run
    pub trace: AttackTrace,
}

impl SimulationOutcome {
    pub fn is_profitable(&self) -> bool {
        self.attacker_profit_eth > 0.0
    }
}

/// Calculator for simulation metrics
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Compare the sandwiched trade against the no-attack baseline
    pub fn outcome(victim: &VictimTrade, trace: AttackTrace) -> SimulationOutcome {
        // Baseline is quoted against the pool before the front-run
        let expected_tokens = victim.calculate_expected(&trace.initial);
        let actual_tokens = trace.victim_actual_tokens();
        let user_loss = expected_tokens - actual_tokens;
        let attacker_profit_eth = trace.backrun_eth_received() - trace.frontrun_amount;

        let victim_min_tokens = victim.min_output(&trace.initial);
        let victim_slippage_pct = if expected_tokens > 0.0 {
            user_loss / expected_tokens * 100.0
        } else {
            0.0
        };

        SimulationOutcome {
            trade_amount: victim.amount_in,
            expected_tokens,
            actual_tokens,
            user_loss,
            attacker_profit_eth,
            victim_min_tokens,
            victim_slippage_pct,
            exceeded_tolerance: actual_tokens < victim_min_tokens,
            trace,
        }
    }

    /// Calculate cumulative attacker profit over the sweep
    pub fn cumulative_profit(results: &SweepResults) -> Vec<CumulativeDataPoint> {
        Self::cumulative(results.outcomes.iter().map(|o| o.attacker_profit_eth))
    }

    /// Calculate cumulative victim losses over the sweep
    pub fn cumulative_losses(results: &SweepResults) -> Vec<CumulativeDataPoint> {
        Self::cumulative(results.outcomes.iter().map(|o| o.user_loss))
    }

    fn cumulative(values: impl Iterator<Item = f64>) -> Vec<CumulativeDataPoint> {
        let mut total = 0.0;
        values
            .enumerate()
            .map(|(i, v)| {
                total += v;
                CumulativeDataPoint {
                    run: i as u32,
                    value: total,
                }
            })
            .collect()
    }

    /// Calculate loss distribution (histogram)
    pub fn loss_distribution(results: &SweepResults) -> Vec<HistogramBucket> {
        let losses: Vec<f64> = results
            .outcomes
            .iter()
            .filter(|o| o.user_loss > 0.0)
            .map(|o| o.user_loss)
            .collect();

        histogram(&losses, 4)
    }

    /// Calculate attack profitability distribution
    pub fn profit_distribution(results: &SweepResults) -> Vec<HistogramBucket> {
        let profits: Vec<f64> = results.outcomes.iter().map(|o| o.attacker_profit_eth).collect();

        histogram(&profits, 6)
    }

    /// Victim trade size against attacker profit, one point per run
    pub fn profit_by_trade_size(results: &SweepResults) -> Vec<ScatterPoint> {
        results
            .outcomes
            .iter()
            .map(|o| ScatterPoint {
                x: o.trade_amount,
                y: o.attacker_profit_eth,
            })
            .collect()
    }
}

const HISTOGRAM_BUCKETS: usize = 10;

/// Split `values` into ten equal-width buckets between their min and max
fn histogram(values: &[f64], precision: usize) -> Vec<HistogramBucket> {
    if values.is_empty() {
        return vec![];
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let bucket_size = (max - min) / HISTOGRAM_BUCKETS as f64;

    if bucket_size == 0.0 {
        return vec![HistogramBucket {
            range_start: min,
            range_end: max,
            count: values.len() as u32,
            label: format!("{:.*}", precision, min),
        }];
    }

    let mut buckets: Vec<HistogramBucket> = (0..HISTOGRAM_BUCKETS)
        .map(|i| {
            let start = min + (i as f64 * bucket_size);
            let end = start + bucket_size;
            HistogramBucket {
                range_start: start,
                range_end: end,
                count: 0,
                label: format!("{:.*}-{:.*}", precision, start, precision, end),
            }
        })
        .collect();

    for value in values {
        let idx = (((value - min) / bucket_size).floor() as usize).min(HISTOGRAM_BUCKETS - 1);
        buckets[idx].count += 1;
    }

    buckets
}

/// Data point for cumulative charts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumulativeDataPoint {
    pub run: u32,
    pub value: f64,
}

/// Histogram bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub range_start: f64,
    pub range_end: f64,
    pub count: u32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}
