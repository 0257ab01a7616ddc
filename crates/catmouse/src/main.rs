//! catmouse - cats and mice sharing food bowls
//!
//! Runs the simulation against one synchronization policy and reports bowl
//! utilization and mean waiting times. It wires together:
//! - Configuration (positional values or a TOML scenario)
//! - The selected policy
//! - The core simulation
//!
//! Exit status is 0 for a completed run and 1 for a configuration error.
//! An invariant violation aborts the process.

use anyhow::{Context, Result};
use catmouse_config::{load_config, parse_args, SimulationConfig, USAGE};
use catmouse_core::{RunError, Simulation, SimulationReport};
use catmouse_policies::build_policy;
use catmouse_policy_api::PolicyKind;
use catmouse_util::TimeUnit;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// catmouse - Check a synchronization policy with cats and mice sharing bowls
#[derive(Parser, Debug)]
#[command(name = "catmouse", version)]
#[command(about = "Check a synchronization policy with cats and mice sharing bowls", long_about = None)]
struct Args {
    /// NUM_BOWLS NUM_CATS NUM_MICE NUM_LOOPS [CAT_EAT CAT_SLEEP MOUSE_EAT MOUSE_SLEEP]
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    values: Vec<String>,

    /// TOML scenario file instead of positional values
    #[arg(short, long, conflicts_with = "values")]
    scenario: Option<PathBuf>,

    /// Synchronization policy: unsynchronized, single-eater or species-turns
    #[arg(short, long, env = "CATMOUSE_POLICY")]
    policy: Option<PolicyKind>,

    /// Seed for bowl choices (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per time unit (default: 1000)
    #[arg(long, env = "CATMOUSE_TIME_UNIT_MS")]
    time_unit_ms: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Build the run configuration from the command line
fn resolve_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.scenario {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load scenario from {:?}", path))?,
        None => parse_args(args.values.as_slice())?,
    };

    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(millis) = args.time_unit_ms {
        config.time_unit = TimeUnit::from_millis(millis);
    }

    Ok(config)
}

fn banner(config: &SimulationConfig) -> String {
    format!(
        "Using {} bowls, {} cats, and {} mice. Looping {} times.\n\
         Using cat eating time {}, cat sleeping time {}\n\
         Using mouse eating time {}, mouse sleeping time {}\n\
         Using policy {}",
        config.bowls,
        config.cats,
        config.mice,
        config.loops,
        config.timing.cat_eat,
        config.timing.cat_sleep,
        config.timing.mouse_eat,
        config.timing.mouse_sleep,
        config.policy,
    )
}

fn render(report: &SimulationReport, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(report).context("Failed to serialize report")
    } else {
        Ok(report.to_string())
    }
}

fn config_failure(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("catmouse: {message}");
    eprintln!("{USAGE}");
    ExitCode::from(1)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "catmouse starting");

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => return config_failure(format!("{e:#}")),
    };

    if !args.json {
        println!("{}", banner(&config));
    }

    let policy = build_policy(config.policy, config.bowls);
    match Simulation::new(config, policy).run().await {
        Ok(report) => match render(&report, args.json) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Failed to print report");
                ExitCode::FAILURE
            }
        },
        Err(RunError::Config(e)) => config_failure(e),
        Err(fatal) => {
            error!(error = %fatal, "Aborting run");
            eprintln!("catmouse: {fatal}");
            std::process::abort();
        }
    }
}
