//! Tile lookup helper.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use terrain_elevation::{tile_file_name, TileLocator};

/// Tile lookup arguments
#[derive(Args)]
pub struct TileArgs {
    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Tile directory; when given, the file must exist
    #[arg(short, long)]
    pub tiles: Option<PathBuf>,
}

/// Prints the tile file name, or its resolved path when `--tiles` is set.
pub fn execute(args: TileArgs) -> Result<()> {
    match args.tiles {
        Some(root) => {
            let path = TileLocator::new(root).resolve(args.lat, args.lon)?;
            println!("{}", path.display());
        }
        None => println!("{}", tile_file_name(args.lat, args.lon)),
    }
    Ok(())
}
