//! Delivery Bot - command line runner
//!
//! Generates one world per seed, runs one or every selector on it and
//! appends the results to a CSV or JSON-lines file.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use delivery_bot::core::error::Result;
use delivery_bot::core::types::BatteryProfile;
use delivery_bot::planning::SelectorRegistry;
use delivery_bot::simulation::{
    CsvFileSink, JsonLinesSink, ResultSink, RunResult, Simulation, TracingObserver,
};
use delivery_bot::SimulationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

/// Delivery Bot - compare target selection strategies on generated worlds
#[derive(Parser, Debug)]
#[command(name = "delivery_bot")]
#[command(about = "Run the delivery agent on generated worlds")]
struct Args {
    /// World seed (ignored when --maps is given)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Run on each of these seeds in turn
    #[arg(long, num_args = 1..)]
    maps: Vec<u64>,

    /// Run every registered selector instead of just --selector
    #[arg(long)]
    multi: bool,

    /// Selector to run
    #[arg(long, default_value = "astar")]
    selector: String,

    /// Battery profile: conservative, balanced or adventurous
    #[arg(long)]
    profile: Option<String>,

    /// TOML file with [world] and [agent] settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Results file (appended to)
    #[arg(long, default_value = "results.csv")]
    output: PathBuf,

    /// Results file format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Do not write results anywhere
    #[arg(long)]
    no_save: bool,

    /// Log a text frame after every move (trace level)
    #[arg(long)]
    frames: bool,

    /// List the available selectors and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("delivery_bot=info")),
        )
        .init();

    let args = Args::parse();
    let registry = SelectorRegistry::default();

    if args.list {
        for selector in registry.create_all() {
            println!("{:<10} {}", selector.name(), selector.description());
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(name) = &args.profile {
        config.agent.profile = BatteryProfile::from_name_or_conservative(name);
    }
    config.validate()?;

    let selectors = if args.multi {
        registry.names()
    } else {
        // Fail before any run if the name is wrong
        let selector = registry.create(&args.selector)?;
        vec![selector.name()]
    };

    let seeds = if args.maps.is_empty() {
        vec![args.seed]
    } else {
        args.maps.clone()
    };

    let mut sink: Option<Box<dyn ResultSink>> = match (args.no_save, args.format) {
        (true, _) => None,
        (false, OutputFormat::Csv) => Some(Box::new(CsvFileSink::new(&args.output))),
        (false, OutputFormat::Json) => Some(Box::new(JsonLinesSink::new(&args.output))),
    };

    tracing::info!(
        seeds = seeds.len(),
        selectors = selectors.len(),
        profile = config.agent.profile.name(),
        "Delivery Bot starting"
    );

    let mut observer = TracingObserver::new(args.frames);
    for &seed in &seeds {
        for &name in &selectors {
            let mut sim = Simulation::generate(&config, seed, registry.create(name)?)?;
            let result = sim.run_with(&mut observer);
            print_result(&result);

            if let Some(sink) = sink.as_mut() {
                sink.record(&result)?;
            }
        }
    }

    if !args.no_save {
        tracing::info!(path = %args.output.display(), "Results saved");
    }

    Ok(())
}

fn print_result(result: &RunResult) {
    println!(
        "seed {:>6} | {:<8} | score {:>6} | steps {:>5} | deliveries {:>2} | battery {:>4} | {:.2}s | {}",
        result.seed,
        result.selector,
        result.score,
        result.steps,
        result.deliveries,
        result.battery,
        result.duration_secs,
        result.outcome
    );
}
