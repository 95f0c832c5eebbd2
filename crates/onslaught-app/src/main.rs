use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use onslaught_app::game_loop::{self, RunOptions};
use onslaught_core::config::ManagerConfig;

/// Run the enemy population manager headless and report how it behaves.
#[derive(Debug, Parser)]
#[command(name = "onslaught", version, about)]
struct Args {
    /// Simulated seconds to run.
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,

    /// Override the RNG seed from the config.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON manager configuration. Missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace ticks to the wall clock instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Simulated seconds between population reports.
    #[arg(long, default_value_t = 10.0)]
    report_every: f64,

    /// Print each report snapshot and the summary as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Override the AI update budget per tick.
    #[arg(long)]
    updates_per_frame: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("onslaught=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ManagerConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => ManagerConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(updates) = args.updates_per_frame {
        config.ai.updates_per_frame = updates;
    }
    config.validate().context("invalid configuration")?;

    let options = RunOptions {
        seconds: args.seconds,
        realtime: args.realtime,
        report_every: args.report_every,
    };
    info!(seed = config.seed, seconds = options.seconds, "starting headless run");

    let json = args.json;
    let summary = game_loop::run(config, &options, |snapshot| {
        if json {
            match serde_json::to_string(snapshot) {
                Ok(line) => println!("{line}"),
                Err(err) => tracing::warn!(%err, "failed to serialize snapshot"),
            }
        }
    })?;

    if json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "{:.1}s simulated over {} ticks: peak {} enemies, {} spawned, {} killed, {} hits taken, final difficulty {:.2}",
            summary.simulated_secs,
            summary.ticks,
            summary.peak_population,
            summary.spawned,
            summary.killed,
            summary.target_hits,
            summary.final_difficulty
        );
    }
    Ok(())
}
