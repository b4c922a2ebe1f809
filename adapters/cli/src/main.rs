#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a scripted Upstairs session.

mod config;
mod driver;
mod sink;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use upstairs_rendering::{project, PresentationSink, WindowSize};
use upstairs_system_layout::MazeGenerator;
use upstairs_world::WorldState;

use crate::{
    driver::{parse_script, planned_duration, Driver},
    sink::TextSink,
};

/// Plays a scripted session of Upstairs and prints the final frame.
#[derive(Debug, Parser)]
#[command(name = "upstairs", version)]
struct Args {
    /// TOML file overriding the engine configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the maze generator.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Keys pressed one per tick; `_` presses the space bar.
    #[arg(long, default_value = "")]
    script: String,

    /// Number of ticks to run. Defaults to the script length.
    #[arg(long)]
    ticks: Option<usize>,

    /// Pace ticks against the wall clock instead of simulating them.
    #[arg(long)]
    realtime: bool,
}

/// Entry point for the Upstairs command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = config::load(args.config.as_deref())?;
    let keys = parse_script(&args.script);
    let ticks = args.ticks.unwrap_or(keys.len());
    log::debug!(
        "running {ticks} ticks, about {:?} of simulated time",
        planned_duration(config.pacing.target_interval(), ticks)
    );

    let state = WorldState::welcome(config.clone()).context("failed to build the welcome floor")?;
    let mut driver = Driver::new(config.pacing, MazeGenerator::new(args.seed), args.realtime);
    let outcome = driver.run(state, &keys, ticks);

    let request = project(&outcome.state, WindowSize::REFERENCE)
        .context("failed to project the final frame")?;
    let mut sink = TextSink::new(std::io::stdout().lock());
    sink.present(&request)?;

    match outcome.rejection {
        Some(error) => {
            Err(error).with_context(|| format!("tick {} was rejected", outcome.ticks))
        }
        None => Ok(()),
    }
}
