// Cadenza Festival Planner — CLI entry point.
//
// Subcommands:
//   festival solve --events <programme.json> --budget <N> [--strategy NAME]
//     Reads a JSON array of {"duration": .., "cost": ..} objects and prints
//     the best total duration. Without --strategy, all three solvers run and
//     must agree.
//   festival trial [--strategy NAME] [--config <trial.json>] [--seed N] [--json]
//     Times one solver over growing programme sizes and budgets. The config
//     file overrides fields of the strategy's preset; --json prints one JSON
//     object per sample and nothing else.
//
// Log verbosity comes from RUST_LOG, falling back to --log-level.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cadenza_festival::trials::{TrialAxis, TrialConfig, run_trials};
use cadenza_festival::{Event, Strategy, cross_check};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "festival",
    version,
    about = "Plan the longest festival programme within a budget"
)]
struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve one programme.
    Solve {
        /// JSON file holding the programme.
        #[arg(long)]
        events: PathBuf,
        /// Budget in dollars.
        #[arg(long, allow_negative_numbers = true)]
        budget: i64,
        /// Solver to use; all three are cross-checked when omitted.
        #[arg(long)]
        strategy: Option<Strategy>,
    },
    /// Time a solver over random programmes.
    Trial {
        #[arg(long, default_value_t = Strategy::Tabulated)]
        strategy: Strategy,
        /// JSON trial config; fields left out come from the strategy's preset.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the config's seed.
        #[arg(long)]
        seed: Option<u64>,
        /// Print samples as JSON lines instead of a table.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Solve {
            events,
            budget,
            strategy,
        } => solve(&events, budget, strategy),
        Command::Trial {
            strategy,
            config,
            seed,
            json,
        } => trial(strategy, config.as_deref(), seed, json),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn solve(path: &Path, budget: i64, strategy: Option<Strategy>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading programme from {}", path.display()))?;
    let events: Vec<Event> = serde_json::from_str(&text)
        .with_context(|| format!("parsing programme in {}", path.display()))?;

    let minutes = match strategy {
        Some(strategy) => strategy.solve(&events, budget)?,
        None => cross_check(&events, budget)?,
    };
    let label = strategy.map_or("all strategies agree", Strategy::name);
    println!(
        "{minutes} minutes from {} events with ${budget} ({label})",
        events.len()
    );
    Ok(())
}

fn trial(
    strategy: Strategy,
    config_path: Option<&Path>,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(path) => TrialConfig::load(path, strategy)
            .with_context(|| format!("loading trial config from {}", path.display()))?,
        None => TrialConfig::for_strategy(strategy),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    if !json {
        println!("=== {strategy} ({}) ===", strategy.complexity());
    }
    let samples = run_trials(strategy, &config)?;
    for sample in &samples {
        if json {
            println!("{}", serde_json::to_string(sample)?);
            continue;
        }
        let varied = match sample.axis {
            TrialAxis::Size => format!("n = {:>5}", sample.events),
            TrialAxis::Budget => format!("m = {:>5}", sample.budget),
        };
        println!(
            "  {varied}  {:>6} minutes  {:>10.3} ms",
            sample.minutes,
            sample.elapsed.as_secs_f64() * 1000.0
        );
    }
    Ok(())
}
