//! Headless Selector Comparison
//!
//! Runs every registered selector over a range of seeds and prints one JSON
//! summary per selector.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use delivery_bot::core::error::Result;
use delivery_bot::core::types::BatteryProfile;
use delivery_bot::planning::SelectorRegistry;
use delivery_bot::simulation::{RunResult, RunSummary, Simulation};
use delivery_bot::SimulationConfig;

/// Headless Selector Comparison - every selector on the same worlds
#[derive(Parser, Debug)]
#[command(name = "compare_selectors")]
#[command(about = "Run all selectors over a seed range and print JSON summaries")]
struct Args {
    /// First seed of the range
    #[arg(long, default_value_t = 0)]
    start_seed: u64,

    /// Number of seeds
    #[arg(long, default_value_t = 20)]
    runs: u64,

    /// Battery profile for every run
    #[arg(long)]
    profile: Option<String>,

    /// TOML file with [world] and [agent] settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only run these selectors
    #[arg(long, num_args = 1..)]
    only: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("delivery_bot=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(name) = &args.profile {
        config.agent.profile = BatteryProfile::from_name_or_conservative(name);
    }
    config.validate()?;

    let registry = SelectorRegistry::default();
    let names: Vec<&str> = if args.only.is_empty() {
        registry.names()
    } else {
        args.only.iter().map(String::as_str).collect()
    };

    let seeds = args.start_seed..args.start_seed.saturating_add(args.runs);
    let mut summaries = Vec::with_capacity(names.len());

    for name in names {
        let mut results: Vec<RunResult> = Vec::with_capacity(args.runs as usize);
        for seed in seeds.clone() {
            let mut sim = Simulation::generate(&config, seed, registry.create(name)?)?;
            results.push(sim.run());
        }
        summaries.push(RunSummary::from_results(name, &results));
    }

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
