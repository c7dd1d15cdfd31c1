//! Full terrain build for one region.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use config::constants::{DEFAULT_NEIGHBORS, DEFAULT_TRIANGLE_BASE, DEFAULT_XY_TARGET, DEFAULT_Z_TARGET};
use terrain_elevation::EstimatorConfig;
use terrain_geometry::persistence::read_boundary;
use terrain_mesh::{BuildParams, TerrainBuilder};
use tracing::info;

use super::ColumnOrderArg;

/// Build arguments
#[derive(Args)]
pub struct BuildArgs {
    /// Region name; artifacts land in `<output>/<region>/`
    #[arg(short, long)]
    pub region: String,

    /// Boundary file (WKT, optionally `SRID=n;` prefixed)
    #[arg(short, long)]
    pub boundary: PathBuf,

    /// Directory holding the elevation tile files
    #[arg(short, long)]
    pub tiles: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Triangle base in working-frame units
    #[arg(short, long, default_value_t = DEFAULT_TRIANGLE_BASE)]
    pub step: f64,

    /// Drop the pedestal around the region
    #[arg(long)]
    pub without_bottom: bool,

    /// Longer planar side of the printed model
    #[arg(long, default_value_t = DEFAULT_XY_TARGET)]
    pub xy_target: f64,

    /// Height range of the printed model
    #[arg(long, default_value_t = DEFAULT_Z_TARGET)]
    pub z_target: f64,

    /// Samples blended per elevation query
    #[arg(short = 'k', long, default_value_t = DEFAULT_NEIGHBORS)]
    pub neighbors: usize,

    /// Column layout of tile rows
    #[arg(long, value_enum, default_value = "lon-lat")]
    pub column_order: ColumnOrderArg,
}

/// Runs the build and writes all artifacts.
pub fn execute(args: BuildArgs) -> Result<()> {
    let started = Instant::now();

    let boundary = read_boundary(&args.boundary)
        .with_context(|| format!("reading boundary {}", args.boundary.display()))?;

    let params = BuildParams {
        region: args.region.clone(),
        triangle_base: args.step,
        include_exterior: !args.without_bottom,
        xy_target: args.xy_target,
        z_target: args.z_target,
    };
    let spec = params.param_spec();
    let estimator = EstimatorConfig {
        neighbors: args.neighbors,
        column_order: args.column_order.into(),
    };

    let mut builder = TerrainBuilder::from_tiles(params, &args.tiles, estimator)
        .context("configuring elevation estimator")?;
    let build = builder
        .build(&boundary)
        .with_context(|| format!("building region {}", args.region))?;

    let dir = args.output.join(&args.region);
    let paths = build
        .write_artifacts(&dir, &spec)
        .with_context(|| format!("writing artifacts to {}", dir.display()))?;

    info!(
        region = args.region.as_str(),
        tile_loads = builder.source().tile_loads(),
        faces = build.normalized.len(),
        stl = %paths.stl.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Build finished"
    );
    Ok(())
}
