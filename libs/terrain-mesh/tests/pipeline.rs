use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use terrain_elevation::{tile_file_name, ElevationError, EstimatorConfig};
use terrain_geometry::persistence::load_mesh;
use terrain_geometry::Mesh3;
use terrain_mesh::{BuildParams, TerrainBuilder, TerrainError};

const BOUNDARY: &str =
    "SRID=4326;POLYGON((-46.8 -23.9,-46.3 -23.9,-46.3 -23.4,-46.8 -23.4,-46.8 -23.9))";

fn elevation_at(lat: f64, lon: f64) -> f64 {
    700.0 + 1000.0 * (lat + 23.9) + 200.0 * (lon + 46.8)
}

/// Writes a 0.05° sample lattice around the boundary, split into the tile
/// files the estimator will look for. Rows are `lon lat elevation`.
fn write_tiles(dir: &Path) {
    let mut files: BTreeMap<String, String> = BTreeMap::new();
    for i in 0..13 {
        for j in 0..13 {
            let lon = -46.85 + 0.05 * i as f64;
            let lat = -23.95 + 0.05 * j as f64;
            let row = format!("{:.4} {:.4} {:.3}\n", lon, lat, elevation_at(lat, lon));
            files.entry(tile_file_name(lat, lon)).or_default().push_str(&row);
        }
    }
    for (name, rows) in files {
        fs::write(dir.join(name), rows).unwrap();
    }
}

fn params(include_exterior: bool) -> BuildParams {
    BuildParams {
        region: "test_region".to_string(),
        triangle_base: 2.0,
        include_exterior,
        ..BuildParams::default()
    }
}

fn interior_range(flat: &Mesh3, elevated: &Mesh3) -> (f64, f64) {
    flat.points()
        .zip(elevated.points())
        .filter(|(f, _)| f.z == 1.0)
        .fold((f64::MAX, f64::MIN), |(lo, hi), (_, e)| (lo.min(e.z), hi.max(e.z)))
}

#[test]
fn build_with_pedestal() {
    let tiles = tempfile::tempdir().unwrap();
    write_tiles(tiles.path());
    let mut builder =
        TerrainBuilder::from_tiles(params(true), tiles.path(), EstimatorConfig::default()).unwrap();
    let build = builder.build(BOUNDARY).unwrap();

    assert_eq!(build.elevated.len(), build.grid.len());
    assert_eq!(build.flat.len(), build.elevated.len());
    // Interior vertices sorted by longitude cross the band edge at -46.5 once
    assert_eq!(builder.source().tile_loads(), 2);

    let (min, max) = interior_range(&build.flat, &build.elevated);
    assert!(min >= elevation_at(-23.95, -46.85) && max <= elevation_at(-23.35, -46.25));
    let pedestal = min - 0.1 * (max - min);
    for (f, e) in build.flat.points().zip(build.elevated.points()) {
        assert_eq!((f.x, f.y), (e.x, e.y));
        if f.z == 0.0 {
            assert_relative_eq!(e.z, pedestal);
        }
    }

    let (lo, hi) = build.normalized.bounding_box().unwrap();
    assert_relative_eq!(lo.z, 0.0, epsilon = 1e-9);
    assert_relative_eq!(hi.z, 2.0, epsilon = 1e-9);
    assert_relative_eq!(hi.x.max(hi.y), 20.0, epsilon = 1e-9);
}

#[test]
fn build_without_pedestal_keeps_only_interior() {
    let tiles = tempfile::tempdir().unwrap();
    write_tiles(tiles.path());
    let mut builder =
        TerrainBuilder::from_tiles(params(false), tiles.path(), EstimatorConfig::default()).unwrap();
    let build = builder.build(BOUNDARY).unwrap();

    assert!(!build.elevated.is_empty());
    assert!(build.elevated.len() < build.grid.len());
    assert!(build.flat.points().all(|p| p.z == 1.0));
    for p in build.elevated.points() {
        assert!(p.x > -46.8 && p.x < -46.3 && p.y > -23.9 && p.y < -23.4);
    }
}

#[test]
fn artifacts_round_trip() {
    let tiles = tempfile::tempdir().unwrap();
    write_tiles(tiles.path());
    let out = tempfile::tempdir().unwrap();
    let params = params(true);
    let spec = params.param_spec();
    let mut builder =
        TerrainBuilder::from_tiles(params, tiles.path(), EstimatorConfig::default()).unwrap();
    let build = builder.build(BOUNDARY).unwrap();

    let paths = build.write_artifacts(out.path().join("test_region"), &spec).unwrap();
    assert!(paths.stl.ends_with("surface_20_with_bottom.stl"));

    let surface: Mesh3 = load_mesh(&paths.surface).unwrap();
    assert_eq!(surface, build.elevated);
    let flat: Mesh3 = load_mesh(&paths.flat_surface).unwrap();
    assert_eq!(flat, build.flat);

    let stl_len = fs::metadata(&paths.stl).unwrap().len() as usize;
    assert_eq!(stl_len, 84 + 50 * build.normalized.len());
}

#[test]
fn missing_tiles_abort_the_build() {
    let tiles = tempfile::tempdir().unwrap();
    let mut builder =
        TerrainBuilder::from_tiles(params(true), tiles.path(), EstimatorConfig::default()).unwrap();
    let result = builder.build(BOUNDARY);
    assert!(matches!(
        result,
        Err(TerrainError::Elevation(ElevationError::TileNotFound { .. }))
    ));
    assert_eq!(builder.source().tile_loads(), 0);
}

#[test]
fn multipolygon_uses_first_member() {
    let tiles = tempfile::tempdir().unwrap();
    write_tiles(tiles.path());
    let multi = "MULTIPOLYGON(((-46.8 -23.9,-46.3 -23.9,-46.3 -23.4,-46.8 -23.4,-46.8 -23.9)),((10 10,11 10,11 11,10 10)))";

    let mut single =
        TerrainBuilder::from_tiles(params(true), tiles.path(), EstimatorConfig::default()).unwrap();
    let mut first =
        TerrainBuilder::from_tiles(params(true), tiles.path(), EstimatorConfig::default()).unwrap();
    assert_eq!(first.build(multi).unwrap(), single.build(BOUNDARY).unwrap());
}

#[test]
fn malformed_boundary_is_reported() {
    let tiles = tempfile::tempdir().unwrap();
    let mut builder =
        TerrainBuilder::from_tiles(params(true), tiles.path(), EstimatorConfig::default()).unwrap();
    assert!(matches!(
        builder.build("POLYGON((0 0,1 0,1 1,0 0)"),
        Err(TerrainError::Geometry(
            terrain_geometry::GeometryError::MalformedBoundary { .. }
        ))
    ));
}
