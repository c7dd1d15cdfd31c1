//! Terrain command-line interface.
//!
//! Builds printable terrain surfaces from a region boundary and a directory
//! of elevation tiles.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Printable terrain builder
#[derive(Parser)]
#[command(name = "terrain")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build printable terrain surfaces from region boundaries", long_about = None)]
struct Cli {
    /// Log level
    #[arg(short, long, value_enum, ignore_case = true, default_value = "info")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build surfaces and STL for one region
    Build(commands::build::BuildArgs),
    /// Write the region grid only
    Grid(commands::grid::GridArgs),
    /// Print the tile file covering a coordinate
    Tile(commands::tile::TileArgs),
}

/// Verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build(args) => commands::build::execute(args),
        Commands::Grid(args) => commands::grid::execute(args),
        Commands::Tile(args) => commands::tile::execute(args),
    }
}
