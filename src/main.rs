//! Pet engine main entry point.
//!
//! Headless driver for the desktop pet engine. Spawns one pet, then ticks it
//! against wall-clock time and prints the status of every pet after each
//! tick. Windowing and drawing belong to a separate front end; this binary
//! only exercises the engine.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --pet-type "Patamon Shimeji" --behavior walking --ticks 10
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info, warn};

use petengine::components::behavior::Behavior;
use petengine::components::petposition::PetPosition;
use petengine::engine::{PetEngine, TickTarget};
use petengine::error::EngineError;
use petengine::resources::engineconfig::EngineConfig;

/// Desktop pet engine
#[derive(Parser)]
#[command(version, about = "Drive the desktop pet animation engine without a window.")]
struct Cli {
    /// INI configuration file (default: ./petengine.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Visual type (asset pack) of the pet. Defaults to the configured type.
    #[arg(long, value_name = "TYPE")]
    pet_type: Option<String>,

    /// Name of the spawned pet.
    #[arg(long, default_value = "Fluffy")]
    name: String,

    /// Behavior to start in: idle, walking, sleeping, eating or playing.
    #[arg(long)]
    behavior: Option<Behavior>,

    /// Action to play, applied after --behavior.
    #[arg(long)]
    action: Option<String>,

    /// Number of ticks to run; 0 runs until interrupted.
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Print status snapshots as JSON lines.
    #[arg(long)]
    json: bool,

    /// Print the actions of the visual type and exit.
    #[arg(long)]
    list_actions: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::with_path(path),
        None => EngineConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &EngineConfig) -> Result<(), EngineError> {
    let pet_type = cli.pet_type.as_deref().unwrap_or(&config.default_type);
    let mut engine = PetEngine::new(config);

    if cli.list_actions {
        for action in engine.list_actions(pet_type)? {
            println!("{action}");
        }
        return Ok(());
    }

    engine.spawn(&cli.name, pet_type, PetPosition::new(100, 100))?;
    if let Some(behavior) = cli.behavior {
        engine.set_behavior(&cli.name, behavior)?;
    }
    if let Some(action) = &cli.action {
        engine.set_action(&cli.name, action)?;
    }

    info!("Pet engine started!");
    let interval = Duration::from_millis(u64::from(config.tick_ms));
    let mut last = Instant::now();
    let mut ticks = 0u64;
    while cli.ticks == 0 || ticks < cli.ticks {
        std::thread::sleep(interval);
        let now = Instant::now();
        let elapsed = u32::try_from(now.duration_since(last).as_millis()).unwrap_or(u32::MAX);
        last = now;

        engine.tick(TickTarget::All, elapsed)?;
        display_status(&engine, cli.json);
        ticks += 1;
    }
    info!("Pet engine stopped!");
    Ok(())
}

fn display_status(engine: &PetEngine, json: bool) {
    if engine.is_empty() {
        return;
    }

    if json {
        for status in engine.pet_ids().filter_map(|id| engine.status(id)) {
            match serde_json::to_string(&status) {
                Ok(line) => println!("{line}"),
                Err(e) => error!("Failed to serialize status of '{}': {}", status.id, e),
            }
        }
        return;
    }

    println!("\n{}", "=".repeat(50));
    for status in engine.pet_ids().filter_map(|id| engine.status(id)) {
        let sprite = status
            .sprite
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}: {} at ({}, {}) [{} #{}] {}",
            status.id,
            status.behavior,
            status.position.x,
            status.position.y,
            status.action,
            status.frame_index,
            sprite
        );
    }
    println!("{}", "=".repeat(50));
}
