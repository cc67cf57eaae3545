//! bhavan-nav - Building Navigation Grids from the Command Line
//!
//! Turns classified building meshes into multi-floor occupancy grids and
//! plans paths through them.
//!
//! ## Subcommands
//!
//! - **rasterize**: mesh record (JSON) to grid record (JSON)
//! - **plan**: A* from a start cell to one or more goals, optionally to every exit
//! - **exits**: list doors with a clear line to the building perimeter
//! - **show**: floor bands, cell counts, ASCII or SVG floor plans
//!
//! Settings come from `--config`, else `configs/config.yaml`, else built-in
//! defaults. Command-line flags override the file.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::{Directive, EnvFilter};

use bhavan_grid::BhavanConfig;

use error::Result;

/// Multi-floor navigation grids and path planning
#[derive(Parser)]
#[command(name = "bhavan-nav")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a grid record from a mesh record
    Rasterize(commands::RasterizeArgs),

    /// Plan a path through a grid record
    Plan(commands::PlanArgs),

    /// List building exits
    Exits(commands::ExitsArgs),

    /// Summarize or draw a grid record
    Show(commands::ShowArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            BhavanConfig::load(path)?
        }
        None => BhavanConfig::load_default()?,
    };

    match cli.command {
        Commands::Rasterize(args) => commands::rasterize(&config, &args),
        Commands::Plan(args) => commands::plan(&config, &args),
        Commands::Exits(args) => commands::exits(&args),
        Commands::Show(args) => commands::show(&args),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("bhavan_nav={}", level).parse::<Directive>()?)
        .add_directive(format!("bhavan_grid={}", level).parse::<Directive>()?);
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
