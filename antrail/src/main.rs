mod app;
mod engine;

use std::path::PathBuf;

use anyhow::{Context, Result};
use antrail::config::{load_config, window_conf};
use antrail::simulation::{Control, Simulation};
use app::AntApp;
use clap::Parser;
use tracing::info;

/// Command-line arguments for the ant trail simulation.
#[derive(Parser)]
#[command(name = "antrail", version, about = "Ant foraging trail simulation")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random generator, overrides the config file.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run without a window and log colony statistics.
    #[arg(long)]
    headless: bool,

    /// Number of ticks to run in headless mode.
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(seed) = cli.seed {
        config.simulation.rng_seed = Some(seed);
    }

    let simulation =
        Simulation::new(config.simulation.clone()).context("failed to build simulation")?;

    if cli.headless {
        run_headless(simulation, cli.ticks);
        return Ok(());
    }

    let viewer = config.viewer;
    macroquad::Window::from_config(window_conf(&viewer), async move {
        let mut app = AntApp::new(simulation, viewer);
        app.run().await;
    });
    Ok(())
}

/// Runs `ticks` fixed-length ticks and logs a summary once per simulated second.
fn run_headless(mut simulation: Simulation, ticks: u64) {
    let dt = simulation.world.config().tick_dt();
    let per_second = u64::from(simulation.world.config().tick_rate);

    simulation.apply(Control::Start);
    for tick in 1..=ticks {
        simulation.update(dt);
        if tick % per_second == 0 || tick == ticks {
            let world = &simulation.world;
            info!(
                tick,
                carrying = world.agents().iter().filter(|a| a.carrying_food).count(),
                markers = world.trails().len(),
                food_stock = world.food().stock.unwrap_or(0),
                "colony status"
            );
        }
    }
    simulation.apply(Control::Quit);
}
