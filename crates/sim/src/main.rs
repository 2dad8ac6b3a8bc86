//! Headless battle simulator.
//!
//! Loads a JSON scenario, lets the opponent planner play both sides and
//! prints the battle log (or a JSON summary with `--json`).
//!
//! # Examples
//!
//! ```bash
//! cargo run -p battle-sim -- --scenario crates/sim/scenarios/sample.json
//! BATTLE_DIFFICULTY=expert cargo run -p battle-sim -- --scenario crates/sim/scenarios/sample.json --json
//! ```

mod autoplay;
mod config;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_core::{Difficulty, PcgRng, start_battle};
use clap::Parser;

use autoplay::Summary;
use config::SimConfig;
use scenario::Scenario;

/// Run a battle scenario with the planner on both sides
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Headless battle simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario file (JSON)
    #[arg(long)]
    scenario: PathBuf,

    /// Battle seed (overrides BATTLE_SEED and the scenario seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty tier: easy, medium, hard or expert
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Stop after this many turns
    #[arg(long)]
    max_turns: Option<u32>,

    /// Print a JSON summary instead of the battle log
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = SimConfig::from_env();
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.difficulty.is_some() {
        config.difficulty = cli.difficulty;
    }
    if let Some(turns) = cli.max_turns {
        config.max_turns = turns.max(1);
    }

    let mut scenario = Scenario::load(&cli.scenario)?;
    if let Some(tier) = config.difficulty {
        scenario = scenario.with_difficulty(tier);
    }
    let seed = config.seed.or(scenario.seed).unwrap_or_default();
    let label = scenario.label().to_owned();

    tracing::info!("Scenario: {label}");
    tracing::info!("Seed: {seed}");
    tracing::info!("Difficulty: {}", scenario.opponent.profile.tier);

    let state = start_battle(scenario.player, scenario.opponent, seed)
        .with_context(|| format!("scenario {label} cannot start"))?;
    let report = autoplay::run(state, config.max_turns, &PcgRng);

    tracing::info!(
        "Battle finished: {} after {} turns ({} side turns)",
        report.state.phase,
        report.state.turn,
        report.side_turns
    );

    if cli.json {
        let summary = Summary::new(&label, &report);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for entry in &report.state.log {
            println!("{entry}");
        }
        println!("Result: {}", report.state.phase);
        println!("Digest: {}", autoplay::hex_digest(&report.state));
    }

    Ok(())
}
