//! Kokaton Musou headless runner
//!
//! Drives the simulation with the autopilot at the real 50 fps cadence (or
//! as fast as possible with `--unpaced`) and logs progress.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use kokaton_musou::Tuning;
use kokaton_musou::autopilot::Autopilot;
use kokaton_musou::consts::TARGET_FPS;
use kokaton_musou::session::{FixedRateClock, LogRenderer, UnpacedClock, run_session};
use kokaton_musou::sim::{GameState, SimContext, build_snapshot};

#[derive(Debug, Parser)]
#[command(name = "kokaton-musou", about = "Headless arcade shooter simulation")]
struct Cli {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,
    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Do not sleep between frames
    #[arg(long)]
    unpaced: bool,
    /// Log a summary line every N frames (0 disables)
    #[arg(long, default_value_t = TARGET_FPS as u64)]
    log_every: u64,
    /// Print the final frame snapshot as JSON
    #[arg(long)]
    dump_final: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let seed = cli.seed.unwrap_or_else(time_seed);

    let mut state = GameState::try_new(tuning).context("invalid tuning")?;
    let mut ctx = SimContext::new(seed);
    let mut input = Autopilot;
    let mut renderer = LogRenderer {
        every: cli.log_every,
    };

    let report = if cli.unpaced {
        let mut clock = UnpacedClock::default();
        run_session(&mut state, &mut ctx, &mut input, &mut renderer, &mut clock, cli.frames)
    } else {
        let mut clock = FixedRateClock::default();
        run_session(&mut state, &mut ctx, &mut input, &mut renderer, &mut clock, cli.frames)
    };

    println!(
        "seed={} end={:?} frames={} destroyed={} damage_taken={}",
        seed, report.end, report.frames, report.enemies_destroyed, report.damage_taken
    );
    if cli.dump_final {
        let snapshot = build_snapshot(&state, ctx.frame);
        let json = serde_json::to_string_pretty(&snapshot).context("encoding final snapshot")?;
        println!("{json}");
    }
    Ok(())
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
