use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gridlife_app::{AsciiRenderer, RunOptions, run_headless};
use gridlife_core::{GridLifeConfig, Scenario, World};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "gridlife",
    version,
    about = "Run a GridLife lattice simulation headlessly"
)]
struct Cli {
    /// JSON file holding a GridLifeConfig; flags below override its fields.
    #[arg(long, env = "GRIDLIFE_CONFIG")]
    config: Option<PathBuf>,

    /// Edge length of the square grid.
    #[arg(long)]
    size: Option<usize>,

    /// RNG seed; omit to draw one from the OS.
    #[arg(long)]
    seed: Option<u64>,

    /// Initial population.
    #[arg(long, value_enum)]
    scenario: Option<ScenarioArg>,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Print an ASCII frame every N ticks (0 disables frames).
    #[arg(long, default_value_t = 0)]
    frames: u64,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScenarioArg {
    Empty,
    Showcase,
    Parity,
}

impl From<ScenarioArg> for Scenario {
    fn from(value: ScenarioArg) -> Self {
        match value {
            ScenarioArg::Empty => Scenario::Empty,
            ScenarioArg::Showcase => Scenario::Showcase,
            ScenarioArg::Parity => Scenario::parity_field(),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let mut world = World::new(config).context("invalid world configuration")?;
    info!(seed = world.seed(), ticks = cli.ticks, "Starting GridLife run");

    let options = RunOptions {
        ticks: cli.ticks,
        frame_every: cli.frames,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = run_headless(&mut world, &AsciiRenderer, options, &mut out)?;

    if let Some(path) = &cli.report {
        report
            .write_json(path)
            .with_context(|| format!("failed to write run report to {}", path.display()))?;
        info!(path = %path.display(), "run report written");
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn resolve_config(cli: &Cli) -> Result<GridLifeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<GridLifeConfig>(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => GridLifeConfig::default(),
    };
    if let Some(size) = cli.size {
        config.size = size;
    }
    if let Some(seed) = cli.seed {
        config.rng_seed = Some(seed);
    }
    if let Some(scenario) = cli.scenario {
        config.scenario = scenario.into();
    }
    Ok(config)
}
