mod error;
mod input;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pc_components::{Component, ComponentSnapshot};
use pc_core::Defaults;
use pc_solver::PointSnapshot;
use serde::Serialize;
use tracing::Level;

use crate::error::{AppResult, read_file};
use crate::input::{CoolerSizing, CycleInput};

#[derive(Parser)]
#[command(name = "pc-cli")]
#[command(about = "Power-cycle sizing and steady-state simulation", long_about = None)]
struct Cli {
    /// Solver defaults YAML; keys not given keep their built-in values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log per-iteration detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective solver defaults as YAML
    Defaults,
    /// Size one attribute of a basic cooler from its inlet and outlet states
    SizeCooler {
        /// Path to the sizing YAML file
        path: PathBuf,
    },
    /// Converge a cycle and print the solution as JSON
    RunCycle {
        /// Path to the cycle YAML file
        path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let defaults = load_defaults(cli.config.as_deref())?;
    match cli.command {
        Commands::Defaults => cmd_defaults(&defaults),
        Commands::SizeCooler { path } => cmd_size_cooler(&path, &defaults),
        Commands::RunCycle { path } => cmd_run_cycle(&path, &defaults),
    }
}

fn load_defaults(path: Option<&Path>) -> AppResult<Defaults> {
    match path {
        Some(path) => Ok(Defaults::from_yaml_str(&read_file(path)?)?),
        None => Ok(Defaults::default()),
    }
}

fn cmd_defaults(defaults: &Defaults) -> AppResult<()> {
    print!("{}", defaults.to_yaml_string()?);
    Ok(())
}

#[derive(Serialize)]
struct SizingReport<'a> {
    attr: &'static str,
    value: f64,
    component: ComponentSnapshot,
    inlet: PointSnapshot,
    outlet: PointSnapshot,
    species: &'a str,
}

fn cmd_size_cooler(path: &Path, defaults: &Defaults) -> AppResult<()> {
    let sizing: CoolerSizing = serde_yaml::from_str(&read_file(path)?)?;
    let backend = sizing.backend.build(defaults);
    let mut cooler = sizing.cooler(backend.as_ref(), defaults)?;
    let setup = sizing.setup();

    tracing::info!(component = %sizing.name, attr = setup.attr.key(), "sizing");
    let value = cooler.size(backend.as_ref(), &setup)?;

    let (Some(inlet), Some(outlet)) = (cooler.inlet(), cooler.outlet()) else {
        return Err(error::AppError::Input {
            what: "sized cooler has no inlet or outlet state".into(),
        });
    };
    let species = sizing.species.to_string();
    let report = SizingReport {
        attr: setup.attr.key(),
        value,
        component: cooler.snapshot(),
        inlet: PointSnapshot::new("inlet", inlet),
        outlet: PointSnapshot::new("outlet", outlet),
        species: &species,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_run_cycle(path: &Path, defaults: &Defaults) -> AppResult<()> {
    let input: CycleInput = serde_yaml::from_str(&read_file(path)?)?;
    let backend = input.backend.build(defaults);
    let mut cycle = input.cycle(backend.as_ref(), defaults)?;
    tracing::info!(
        backend = backend.name(),
        components = cycle.components().len(),
        closed = cycle.graph().is_closed(),
        "solving cycle"
    );

    let solution = cycle.solve(backend.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&solution)?);
    Ok(())
}
