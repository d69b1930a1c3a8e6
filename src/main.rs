//! Headless colony simulation runner
//!
//! Founds NPC colonies and one idle player colony, runs batch ticks and
//! prints who is left standing.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use colony_sim::colony::Controller;
use colony_sim::core::config::GameConfig;
use colony_sim::core::context::SimContext;
use colony_sim::core::error::Result;
use colony_sim::core::types::Timestamp;
use colony_sim::covert::MissionState;
use colony_sim::world::World;

#[derive(Parser, Debug)]
#[command(name = "colony-sim")]
#[command(about = "Run a headless colony simulation and summarize the outcome")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of NPC colonies (defaults to the configured initial count)
    #[arg(long)]
    npcs: Option<u32>,

    /// Batch ticks to run
    #[arg(long, default_value_t = 200)]
    ticks: u32,

    /// TOML balance overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the final store as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("colony_sim=info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let npcs = args.npcs.unwrap_or(config.npc.initial_count);

    let mut world = World::new(SimContext::with_config(config)?, args.seed);
    let now = Timestamp(0);
    world.spawn_npcs(npcs, now);
    let player = world.found_colony("Player", Controller::Player, now);
    tracing::info!(seed = args.seed, npcs, ticks = args.ticks, "simulation starting");

    let start = Instant::now();
    let mut failures = 0usize;
    for _ in 0..args.ticks {
        let report = world.process_all();
        failures += report.failed.len();
        if world.store.active_ids().is_empty() {
            break;
        }
    }
    let elapsed = start.elapsed();

    println!("=== COLONY SIM ===");
    println!("Seed {}, {} ticks in {:.2}ms", args.seed, args.ticks, elapsed.as_secs_f64() * 1000.0);
    println!();

    let mut survivors: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for colony in world.store.colonies.values() {
        let label = match colony.personality() {
            Some(p) => p.to_string(),
            None => "player".to_string(),
        };
        let entry = survivors.entry(label).or_default();
        entry.1 += 1;
        if !colony.destroyed {
            entry.0 += 1;
        }
    }
    println!("--- Survivors ---");
    for (label, (alive, total)) in &survivors {
        println!("{:<12} {}/{}", label, alive, total);
    }

    let battles = &world.store.battles;
    let wins = battles.iter().filter(|b| b.attacker_wins).count();
    let destroyed = battles.iter().filter(|b| b.defender_destroyed || b.attacker_destroyed).count();
    println!();
    println!("--- Battles ---");
    println!("{} fought, {} won by the attacker, {} ended a colony", battles.len(), wins, destroyed);

    let missions = &world.store.missions;
    let succeeded = missions
        .iter()
        .filter(|m| matches!(m.state, MissionState::Success { .. }))
        .count();
    let detected = missions.iter().filter(|m| m.state == MissionState::Detected).count();
    println!();
    println!("--- Missions ---");
    println!("{} dispatched, {} succeeded, {} detected", missions.len(), succeeded, detected);

    if let Some(colony) = world.colony(player) {
        println!();
        println!(
            "Player colony: boss {} hp, {} guards, {} adults, {} children, {} babies{}",
            colony.boss_health,
            colony.guard,
            colony.adult,
            colony.child,
            colony.baby,
            if colony.destroyed { " (destroyed)" } else { "" }
        );
    }
    if failures > 0 {
        println!("{} colony turns were rolled back", failures);
    }

    if let Some(path) = &args.output {
        world.store.save(path)?;
        println!("\nFull store written to {}", path.display());
    }
    Ok(())
}
