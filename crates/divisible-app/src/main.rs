//! DIVISIBLE terminal host.
//!
//! Usage:
//!   divisible [--config game.json] [--seed N] [--time-scale X] [--events-only]
//!
//! Reads player commands from stdin and writes one JSON snapshot per tick
//! to stdout. Logging goes to stderr (RUST_LOG, default `info`).

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use divisible_app::game_loop::{self, JsonLinesSink};
use divisible_app::input::{parse_line, InputLine};
use divisible_app::state::AppState;
use divisible_sim::SimConfig;

#[derive(Parser)]
#[command(name = "divisible")]
#[command(about = "Throw numbered balls at number monsters")]
struct Args {
    /// JSON file with simulation settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Loop speed multiplier, 0.0..=4.0 (overrides the config file)
    #[arg(long)]
    time_scale: Option<f64>,
    /// Limit the number of throws per wave
    #[arg(long)]
    turn_limit: bool,
    /// Only write snapshots that carry events
    #[arg(long)]
    events_only: bool,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid config in {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(time_scale) = args.time_scale {
        config.time_scale = time_scale;
    }
    config.turn_limit |= args.turn_limit;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(
        "seed {} | time scale {} | turn limit {}",
        config.seed, config.time_scale, config.turn_limit
    );

    let state = AppState::new();
    let sink = JsonLinesSink::new(io::stdout(), args.events_only);
    state.start_simulation(config, Box::new(sink))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match parse_line(&line) {
            Ok(InputLine::Command(command)) => state.send_command(command)?,
            Ok(InputLine::Quit) => break,
            Ok(InputLine::Blank) => {}
            Err(e) => warn!("{e:#}"),
        }
    }

    state.shutdown()?;
    if let Some(snapshot) = state.snapshot()? {
        eprintln!("{}", game_loop::summary(&snapshot));
    }
    Ok(())
}
