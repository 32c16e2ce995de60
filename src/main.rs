//! Sandwich Simulation CLI
//!
//! Command-line interface for the sandwich attack simulation engine.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sandwich_sim::{
    analytics::{
        logger::{format_outcome, print_summary, SimulationLogger},
        report::generate_report,
        risk::{assess_slippage_risk, plan_batches},
    },
    config::{SimulationConfig, SweepConfig},
    simulation::{run_attack_simulation, Orchestrator, SimulationInputs},
};

#[derive(Parser)]
#[command(name = "sandwich-sim")]
#[command(version = "0.1.0")]
#[command(about = "Sandwich Attack Simulation on a constant-product AMM", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with engine parameters (fee, initial price, front-run sizing)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one sandwich around a victim buy
    Simulate {
        /// Victim trade in ETH
        #[arg(short, long, default_value = "10")]
        amount: f64,

        /// Victim slippage tolerance in percent
        #[arg(short, long, default_value = "1")]
        slippage: f64,

        /// Pool ETH liquidity
        #[arg(short, long, default_value = "1000")]
        liquidity: f64,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Save the outcome under the output directory
        #[arg(long)]
        save: bool,
    },

    /// Run many simulations over random trade sizes
    Sweep {
        /// Number of simulations
        #[arg(short, long, default_value = "1000")]
        runs: u32,

        /// Minimum victim trade in ETH
        #[arg(long, default_value = "0.1")]
        min_trade: f64,

        /// Maximum victim trade in ETH
        #[arg(long, default_value = "50.0")]
        max_trade: f64,

        /// Pool ETH liquidity
        #[arg(short, long, default_value = "1000.0")]
        liquidity: f64,

        /// Victim slippage tolerance in percent
        #[arg(short, long, default_value = "1.0")]
        slippage: f64,

        /// RNG seed for a reproducible sweep
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for results
        #[arg(short, long)]
        output: Option<String>,

        /// Skip HTML report generation
        #[arg(long)]
        no_report: bool,
    },

    /// Estimate sandwich exposure for a slippage tolerance
    Risk {
        /// Trade value
        #[arg(short, long)]
        amount: f64,

        /// Slippage tolerance in percent
        #[arg(short, long)]
        slippage: f64,
    },

    /// Suggest how to split a large order
    Batch {
        /// Total order in ETH
        #[arg(short, long)]
        total: f64,

        /// Pool ETH liquidity
        #[arg(short, long)]
        liquidity: f64,
    },

    /// Generate report from existing sweep results
    Report {
        /// Input JSON file with sweep results
        #[arg(short, long)]
        input: PathBuf,

        /// Output HTML file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print configuration info
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG takes precedence over --verbose
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    let engine = match &cli.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };

    match cli.command {
        Commands::Simulate {
            amount,
            slippage,
            liquidity,
            json,
            save,
        } => {
            let inputs = SimulationInputs::new(amount, slippage, liquidity);
            simulate(&inputs, &engine, json, save)?;
        }

        Commands::Sweep {
            runs,
            min_trade,
            max_trade,
            liquidity,
            slippage,
            seed,
            output,
            no_report,
        } => {
            let sweep = SweepConfig {
                runs,
                min_trade_eth: min_trade,
                max_trade_eth: max_trade,
                liquidity_eth: liquidity,
                slippage_tolerance_pct: slippage,
                seed,
            };
            let output_dir = output.unwrap_or_else(|| engine.output_dir.clone());
            run_sweep(sweep, engine, &output_dir, !no_report)?;
        }

        Commands::Risk { amount, slippage } => {
            let risk = assess_slippage_risk(amount, slippage)?;
            println!();
            println!("  Max potential loss:   {:.2}", risk.max_loss);
            println!("  Attacker profit room: {:.2}", risk.attacker_space);
            println!("  Risk level:           {}", risk.level);
            println!();
        }

        Commands::Batch { total, liquidity } => {
            let plan = plan_batches(total, liquidity)?;
            println!();
            println!("  Batches:         {}", plan.batch_count);
            println!("  Batch size:      {:.2} ETH", plan.batch_size);
            println!("  Price impact:    {:.2}% per batch", plan.price_impact_pct);
            println!();
        }

        Commands::Report { input, output } => {
            generate_report_from_file(&input, output.as_deref(), &engine)?;
        }

        Commands::Info => {
            print_info(&engine);
        }
    }

    Ok(())
}

fn simulate(inputs: &SimulationInputs, engine: &SimulationConfig, json: bool, save: bool) -> Result<()> {
    let outcome = run_attack_simulation(inputs, engine)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!();
        println!("╔══════════════════════════════════════════════════════════╗");
        println!("║       Sandwich Attack Simulation                         ║");
        println!("╚══════════════════════════════════════════════════════════╝");
        print!("{}", format_outcome(&outcome));
        println!();
    }

    if save {
        let logger = SimulationLogger::new(&engine.output_dir);
        let path = logger.save_outcome(&outcome)?;
        println!("📁 Outcome saved to: {}", path);
    }

    Ok(())
}

fn run_sweep(sweep: SweepConfig, engine: SimulationConfig, output_dir: &str, generate_html: bool) -> Result<()> {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║       Sandwich Attack Sweep                              ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    info!("Configuration:");
    info!("  Runs:                {}", sweep.runs);
    info!("  Trade Range:         {:.2} - {:.2} ETH", sweep.min_trade_eth, sweep.max_trade_eth);
    info!("  Pool Liquidity:      {:.2} ETH", sweep.liquidity_eth);
    info!("  Slippage Tolerance:  {:.2}%", sweep.slippage_tolerance_pct);
    info!("  Fee:                 {:.2}%", engine.fee_bps as f64 / 100.0);

    let mut orchestrator = Orchestrator::new(sweep, engine)?;
    let results = orchestrator.run()?;

    print_summary(&results);

    let logger = SimulationLogger::new(output_dir);
    let json_path = logger.save_results(&results)?;
    logger.save_summary(&results)?;

    if generate_html {
        let report_path = logger.report_path();
        generate_report(&results, &report_path)?;

        println!();
        println!("📊 Report generated: {}", report_path);
        println!("   Open in browser to view interactive charts");
    }

    println!();
    println!("📁 Results saved to: {}", json_path);
    println!();

    Ok(())
}

fn generate_report_from_file(input: &Path, output: Option<&Path>, engine: &SimulationConfig) -> Result<()> {
    info!("Loading results from: {:?}", input);

    let results = SimulationLogger::load_results(input)?;

    let output_path = output
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| SimulationLogger::new(&engine.output_dir).report_path());

    generate_report(&results, &output_path)?;

    println!("📊 Report generated: {}", output_path);

    Ok(())
}

fn print_info(engine: &SimulationConfig) {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║       Sandwich Simulation - Info                         ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
    println!("Simulates a front-run / victim / back-run sandwich against a");
    println!("constant-product ETH/TOKEN pool.");
    println!();
    println!("ENGINE:");
    println!("  Fee:                   {:.2}%", engine.fee_bps as f64 / 100.0);
    println!("  Initial price:         {} TOKEN/ETH", engine.initial_price);
    println!(
        "  Front-run size:        min({} x trade, {} x liquidity)",
        engine.frontrun_trade_fraction, engine.frontrun_liquidity_fraction
    );
    println!();
    println!("USAGE:");
    println!("  sandwich-sim simulate -a 10 -l 1000     # One sandwich");
    println!("  sandwich-sim sweep --runs 1000          # Many random trades");
    println!("  sandwich-sim risk -a 5000 -s 1.5        # Slippage exposure");
    println!("  sandwich-sim batch -t 100 -l 1000       # Order splitting");
    println!("  sandwich-sim report -i results.json     # Rebuild report");
    println!();
}
