//! Grid-only build: tessellate the working frame and pull it back onto the
//! region.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use config::constants::{DEFAULT_TRIANGLE_BASE, WORKING_FRAME_MAX, WORKING_FRAME_MIN};
use terrain_geometry::grid::generate_triangle_mesh;
use terrain_geometry::persistence::{read_boundary, save_mesh};
use terrain_geometry::wkt::parse_boundary;
use terrain_geometry::CoordinateScaler;
use tracing::info;

/// Grid arguments
#[derive(Args)]
pub struct GridArgs {
    /// Boundary file (WKT, optionally `SRID=n;` prefixed)
    #[arg(short, long)]
    pub boundary: PathBuf,

    /// Output JSON file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Triangle base in working-frame units
    #[arg(short, long, default_value_t = DEFAULT_TRIANGLE_BASE)]
    pub step: f64,
}

/// Writes the region grid for the boundary.
pub fn execute(args: GridArgs) -> Result<()> {
    let text = read_boundary(&args.boundary)
        .with_context(|| format!("reading boundary {}", args.boundary.display()))?;
    let boundary = parse_boundary(&text)?;

    let mut scaler = CoordinateScaler::new();
    scaler.fit(&boundary)?;
    let grid = generate_triangle_mesh(
        WORKING_FRAME_MIN,
        WORKING_FRAME_MIN,
        WORKING_FRAME_MAX,
        WORKING_FRAME_MAX,
        args.step,
    )?;
    let regional = scaler.inverse_transform_mesh(&grid)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    save_mesh(&regional, &args.output)
        .with_context(|| format!("writing grid to {}", args.output.display()))?;

    info!(faces = regional.len(), path = %args.output.display(), "Wrote grid");
    Ok(())
}
