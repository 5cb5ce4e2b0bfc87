//! History Sim - headless runner
//!
//! Bootstraps a random population, runs the tick pipeline and reports what
//! the NPCs ended up doing.

use ahash::AHashMap;
use clap::Parser;
use history_sim::core::config::SimulationConfig;
use history_sim::core::error::Result;
use history_sim::entity::drives::{most_pressing, DriveType};
use history_sim::events::{EventSink, JsonFileSink};
use history_sim::simulation::{bootstrap_world, run_simulation};
use history_sim::world::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Run a non-verbal NPC history simulation
#[derive(Parser, Debug)]
#[command(name = "history-sim")]
#[command(about = "Simulate NPCs forming memories and habits over generations")]
struct Args {
    /// TOML configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long)]
    ticks: Option<u64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Perception radius in world units
    #[arg(long)]
    perception_range: Option<f32>,

    /// Write every simulation event to this JSON file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Log filter, e.g. "history_sim=debug" (RUST_LOG takes precedence)
    #[arg(long, default_value = "history_sim=info")]
    log: String,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.params.seed = seed;
    }
    if let Some(range) = args.perception_range {
        config.perception_range = range;
    }
    config.validate()?;
    Ok(config)
}

fn report(world: &World) {
    let npc_count = world.npcs.len().max(1) as f32;

    let mut actions: AHashMap<&'static str, usize> = AHashMap::new();
    for npc in &world.npcs {
        let name = npc
            .identity
            .current_action
            .map(|a| a.name())
            .unwrap_or("None");
        *actions.entry(name).or_default() += 1;
    }
    let mut actions: Vec<_> = actions.into_iter().collect();
    actions.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (action, count) in actions {
        tracing::info!(action, count, "final action distribution");
    }

    let buffered: usize = world.npcs.iter().map(|n| n.perception.len()).sum();
    let episodes: usize = world.npcs.iter().map(|n| n.episodic_memory.len()).sum();
    tracing::info!(
        avg_buffer = buffered as f32 / npc_count,
        avg_episodes = episodes as f32 / npc_count,
        "memory"
    );

    for drive_type in DriveType::ALL {
        let levels: Vec<f32> = world
            .npcs
            .iter()
            .flat_map(|n| n.drives.iter())
            .filter(|d| d.drive_type == drive_type)
            .map(|d| d.intensity)
            .collect();
        if levels.is_empty() {
            continue;
        }
        let average = levels.iter().sum::<f32>() / levels.len() as f32;
        tracing::info!(drive = drive_type.name(), average, "drive level");
    }

    let mut pressing: AHashMap<&'static str, usize> = AHashMap::new();
    for npc in &world.npcs {
        if let Some(drive) = most_pressing(&npc.drives) {
            *pressing.entry(drive.drive_type.name()).or_default() += 1;
        }
    }
    let mut pressing: Vec<_> = pressing.into_iter().collect();
    pressing.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (drive, count) in pressing {
        tracing::info!(drive, count, "most pressing drive");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&args)?;
    tracing::info!(
        npcs = config.npc_count,
        ticks = config.ticks,
        seed = config.params.seed,
        "History Sim starting..."
    );

    let mut sink = match &args.events {
        Some(path) => Some(JsonFileSink::create(path)?),
        None => None,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(config.params.seed);
    let world = bootstrap_world(&config, &mut rng);

    let final_world = run_simulation(
        world,
        config.ticks,
        &config.params,
        config.perception_range,
        sink.as_mut().map(|s| s as &mut dyn EventSink),
        None,
    );

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
        tracing::info!(path = %sink.path().display(), events = sink.len(), "events written");
    }

    report(&final_world);
    Ok(())
}
