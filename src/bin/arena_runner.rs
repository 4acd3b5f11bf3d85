//! Headless Arena Runner
//!
//! Runs a skirmish on the standard map with the chosen policies and prints
//! the report as JSON or text.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tank_tactics::arena::{Skirmish, SkirmishReport, SkirmishSettings};
use tank_tactics::core::error::Result;
use tank_tactics::core::TacticsConfig;
use tank_tactics::tactics::PolicyKind;

/// Headless Arena Runner - tank AI skirmish on the standard map
#[derive(Parser, Debug)]
#[command(name = "arena_runner")]
#[command(about = "Run a tank skirmish between decision policies and report the outcome")]
struct Args {
    /// Policy for player tanks (aggressive, common, classic)
    #[arg(long, default_value = "aggressive")]
    players: PolicyKind,

    /// Policy for bot tanks
    #[arg(long, default_value = "classic")]
    bots: PolicyKind,

    /// Maximum ticks before the run ends undecided
    #[arg(long, default_value_t = 5000)]
    max_ticks: u64,

    /// Ticks between classic period advances
    #[arg(long, default_value_t = 512)]
    period_ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Tactics config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Include the event log in text output
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tank_tactics=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => TacticsConfig::load_from_toml(path)?,
        None => TacticsConfig::default(),
    };
    let settings = SkirmishSettings {
        period_ticks: args.period_ticks,
        ..Default::default()
    };

    tracing::info!(seed, players = %args.players, bots = %args.bots, "starting skirmish");
    let mut skirmish = Skirmish::standard(config, settings, seed, args.players, args.bots)?;
    let report = skirmish.run(args.max_ticks);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report, args.verbose);
    }
    Ok(())
}

fn print_text(report: &SkirmishReport, verbose: bool) {
    println!("=== Skirmish Result ===");
    println!("Seed: {}", report.seed);
    println!("Ticks: {}", report.ticks);
    match report.winner {
        Some(faction) => println!("Winner: {faction:?}"),
        None => println!("Winner: none (undecided)"),
    }
    println!("Objective destroyed: {}", report.objective_destroyed);
    println!("Terrain destroyed: {}", report.terrain_destroyed);
    println!();
    for tank in &report.tanks {
        println!(
            "  {:?} {:?} [{}] alive={} shots={} kills={} bonuses={} at ({},{})",
            tank.id,
            tank.faction,
            tank.policy,
            tank.alive,
            tank.shots_fired,
            tank.kills,
            tank.bonuses_collected,
            tank.final_tile.x,
            tank.final_tile.y
        );
    }
    if verbose {
        println!();
        for event in &report.events {
            println!("  [{}] {:?}: {}", event.tick, event.event_type, event.description);
        }
    }
}
