//! EcoTrack scenario runner
//!
//! Runs a TOML scenario (or the built-in demo) against a fresh tracker and
//! prints the outcome of every step.
//!
//! # Usage
//!
//! ```bash
//! # Run the built-in food chain
//! cargo run --bin ecotrack -- --demo --pretty
//!
//! # Run a scenario file and print JSON
//! cargo run --bin ecotrack -- scenario/scenarios/savanna.toml --json
//!
//! # Run with debug logging
//! RUST_LOG=debug cargo run --bin ecotrack -- scenario/scenarios/savanna.toml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ecotrack_logging::{EcoTrackSubscriberBuilder, LogConfig, WorkerGuard};
use ecotrack_scenario::{render, RunReport, Scenario, ScenarioRunner};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ecotrack")]
#[command(about = "Run species tracking scenarios")]
#[command(version)]
struct Args {
    /// Path to the TOML scenario to run
    #[arg(required_unless_present = "demo", conflicts_with = "demo")]
    scenario: Option<PathBuf>,

    /// Run the built-in demo food chain
    #[arg(long)]
    demo: bool,

    /// Print outcomes as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Use pretty console logs instead of JSONL
    #[arg(short, long)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error); overrides the scenario
    #[arg(short, long)]
    level: Option<String>,

    /// Don't initialize logging
    #[arg(long)]
    no_logging: bool,
}

fn load_scenario(args: &Args) -> Result<Scenario> {
    match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario {}", path.display())),
        None => Ok(Scenario::demo()),
    }
}

fn init_logging(args: &Args, scenario: &Scenario) -> Option<WorkerGuard> {
    let config = match (&scenario.logging, args.pretty) {
        (_, true) => LogConfig::development(),
        (Some(config), false) => config.clone(),
        (None, false) => LogConfig::default(),
    };

    let mut builder = EcoTrackSubscriberBuilder::new()
        .with_config(config)
        .with_stderr(true);
    if let Some(level) = &args.level {
        builder = builder.with_level(level);
    }
    builder.init()
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(report).context("Failed to serialize outcomes")?;
        println!("{}", output);
    } else {
        print!("{}", render::report(report));
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let scenario = match load_scenario(&args) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    // Keep the guard alive so file output is flushed on exit
    let _guard = if args.no_logging {
        None
    } else {
        init_logging(&args, &scenario)
    };

    info!(
        scenario = scenario.name.as_deref().unwrap_or("unnamed"),
        steps = scenario.steps.len(),
        "Running scenario"
    );

    let report = ScenarioRunner::run_fresh(&scenario);

    if let Err(e) = print_report(&report, args.json) {
        error!("{:#}", e);
        return ExitCode::from(1);
    }

    if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        error!(failures = report.failures, "Scenario completed with failures");
        ExitCode::from(1)
    }
}
