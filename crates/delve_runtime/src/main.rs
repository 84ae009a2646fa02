//! Delve Runtime
//!
//! Headless roguelike host: generates a dungeon, drives the ECS for a fixed
//! number of ticks and prints the map.

use anyhow::{Context, Result};
use clap::Parser;
use delve_metrics::TickBudget;
use delve_services::{ScriptedInput, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod components;
mod dungeon;
mod game;
mod render;
mod systems;

use dungeon::Dungeon;
use render::AsciiFrame;

#[derive(Parser)]
#[command(name = "delve")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless ECS roguelike", long_about = None)]
struct Cli {
    /// Settings file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of update ticks to run
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Dungeon generator seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the map every N ticks (0 = final frame only)
    #[arg(short, long)]
    render_every: Option<u64>,

    /// Player input script, e.g. "hhjjl."
    #[arg(long)]
    script: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    init_logging(&settings, cli.verbose);

    if let Some(ticks) = cli.ticks {
        settings.simulation.ticks = ticks;
    }
    if let Some(seed) = cli.seed {
        settings.dungeon.seed = Some(seed);
    }
    if let Some(every) = cli.render_every {
        settings.simulation.render_every = every;
    }
    if let Some(script) = cli.script {
        settings.simulation.script = script;
    }
    settings.validate().context("invalid settings")?;

    info!("Delve v{}", delve_core::VERSION);
    run(&settings)
}

fn init_logging(settings: &Settings, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(settings: &Settings) -> Result<()> {
    let seed = settings.dungeon.seed.unwrap_or_else(rand::random);
    info!(seed, "generating dungeon");
    let dungeon = Dungeon::generate(&settings.dungeon, &mut StdRng::seed_from_u64(seed));
    let (width, height) = (dungeon.width() as usize, dungeon.height() as usize);
    info!(
        rooms = dungeon.rooms().len(),
        floor = dungeon.floor_count(),
        "dungeon ready"
    );

    let input = ScriptedInput::parse(&settings.simulation.script).context("parsing input script")?;
    let mut world = game::build_world(settings, dungeon, input);

    world.start().context("startup pass failed")?;
    info!(
        entities = world.entities().len(),
        components = world.components().total_len(),
        "world started"
    );

    let mut budget = TickBudget::new(world.time().tick_duration());
    let render_every = settings.simulation.render_every;
    for _ in 0..settings.simulation.ticks {
        budget.begin();
        world
            .tick()
            .with_context(|| format!("tick {} failed", world.tick_count()))?;
        budget.end();

        if render_every > 0 && world.tick_count() % render_every == 0 {
            println!("tick {}", world.tick_count());
            print!("{}", AsciiFrame::capture(&world, width, height));
        }
    }

    let frame = AsciiFrame::capture(&world, width, height);
    print!("{frame}");

    info!(
        ticks = world.tick_count(),
        simulated_ms = world.time().total_time().as_millis() as u64,
        budget_us = budget.budget().as_micros() as u64,
        avg_tick_us = budget.average().as_micros() as u64,
        worst_tick_us = budget.worst().as_micros() as u64,
        overruns = budget.overruns(),
        load = budget.load(),
        cells_drawn = frame.drawn(),
        "simulation finished"
    );
    if let Some(pos) = game::player_position(&world) {
        info!(x = pos.x, y = pos.y, "final player position");
    }
    for (system, timing) in world.profiler().iter() {
        info!(
            system,
            calls = timing.calls,
            avg_us = timing.average().as_micros() as u64,
            "system timing"
        );
    }

    Ok(())
}
