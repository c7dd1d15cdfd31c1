//! # Build Pipeline
//!
//! One strictly sequential build, from boundary text to a normalized surface:
//!
//! ```text
//! boundary text → parse → fit scaler → grid (working frame) → grid (region)
//!               → classify → flat surface → resolve elevations → normalize
//! ```
//!
//! Any stage error aborts the build; nothing partial is returned.

use std::fs;
use std::path::{Path, PathBuf};

use config::constants::{
    DEFAULT_TRIANGLE_BASE, DEFAULT_XY_TARGET, DEFAULT_Z_TARGET, WORKING_FRAME_MAX,
    WORKING_FRAME_MIN,
};
use terrain_elevation::{ElevationEstimator, ElevationSource, EstimatorConfig, TileLocator};
use terrain_geometry::grid::generate_triangle_mesh;
use terrain_geometry::persistence::save_mesh;
use terrain_geometry::wkt::parse_boundary;
use terrain_geometry::{CoordinateScaler, Mesh2, Mesh3, Polygon};
use tracing::info;

use crate::assign::ElevationAssigner;
use crate::classify::{flatten, SurfaceClassifier};
use crate::error::TerrainResult;
use crate::normalize::MeshNormalizer;
use crate::stl::save_stl;

// =============================================================================
// PARAMETERS
// =============================================================================

/// Parameters of a single build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildParams {
    /// Region name, used to label logs and artifacts
    pub region: String,
    /// Triangle base in working-frame units
    pub triangle_base: f64,
    /// Keep exterior (pedestal) geometry around the region
    pub include_exterior: bool,
    /// Longer planar side of the printed model
    pub xy_target: f64,
    /// Height range of the printed model
    pub z_target: f64,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            region: "region".to_string(),
            triangle_base: DEFAULT_TRIANGLE_BASE,
            include_exterior: true,
            xy_target: DEFAULT_XY_TARGET,
            z_target: DEFAULT_Z_TARGET,
        }
    }
}

impl BuildParams {
    /// Artifact tag: the triangle base without its decimal point, then
    /// whether the pedestal is included.
    ///
    /// # Example
    ///
    /// ```rust
    /// use terrain_mesh::BuildParams;
    ///
    /// let params = BuildParams { triangle_base: 0.5, ..BuildParams::default() };
    /// assert_eq!(params.param_spec(), "05_with_bottom");
    ///
    /// let params = BuildParams { triangle_base: 1.0, include_exterior: false, ..BuildParams::default() };
    /// assert_eq!(params.param_spec(), "10_without_bottom");
    /// ```
    pub fn param_spec(&self) -> String {
        let step = format!("{:?}", self.triangle_base).replace('.', "");
        let bottom = if self.include_exterior {
            "with_bottom"
        } else {
            "without_bottom"
        };
        format!("{}_{}", step, bottom)
    }
}

// =============================================================================
// BUILD OUTPUT
// =============================================================================

/// Everything one build produces.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainBuild {
    /// Boundary polygon in region coordinates
    pub boundary: Polygon,
    /// Tessellation of the working frame
    pub grid: Mesh2,
    /// Classified surface with placeholder elevations
    pub flat: Mesh3,
    /// Surface with resolved elevations
    pub elevated: Mesh3,
    /// Surface scaled into the print envelope
    pub normalized: Mesh3,
}

/// Files written by [`TerrainBuild::write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// `grid_<spec>.json`
    pub grid: PathBuf,
    /// `flat_surface_<spec>.json`
    pub flat_surface: PathBuf,
    /// `surface_<spec>.json`
    pub surface: PathBuf,
    /// `surface_<spec>.stl`
    pub stl: PathBuf,
}

impl ArtifactPaths {
    /// Artifact paths under `dir` for the given tag.
    pub fn new(dir: &Path, spec: &str) -> Self {
        Self {
            grid: dir.join(format!("grid_{}.json", spec)),
            flat_surface: dir.join(format!("flat_surface_{}.json", spec)),
            surface: dir.join(format!("surface_{}.json", spec)),
            stl: dir.join(format!("surface_{}.stl", spec)),
        }
    }
}

impl TerrainBuild {
    /// Writes the grid, both surfaces and the STL under `dir`, creating it
    /// if needed.
    pub fn write_artifacts(&self, dir: impl AsRef<Path>, spec: &str) -> TerrainResult<ArtifactPaths> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let paths = ArtifactPaths::new(dir, spec);
        save_mesh(&self.grid, &paths.grid)?;
        save_mesh(&self.flat, &paths.flat_surface)?;
        save_mesh(&self.elevated, &paths.surface)?;
        save_stl(&self.normalized, &paths.stl)?;
        info!(dir = %dir.display(), spec, "Wrote build artifacts");
        Ok(paths)
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Runs builds against one elevation source.
#[derive(Debug)]
pub struct TerrainBuilder<S> {
    params: BuildParams,
    assigner: ElevationAssigner<S>,
}

impl TerrainBuilder<ElevationEstimator> {
    /// Builder backed by tile files under `tiles`.
    pub fn from_tiles(
        params: BuildParams,
        tiles: impl Into<PathBuf>,
        config: EstimatorConfig,
    ) -> TerrainResult<Self> {
        let estimator = ElevationEstimator::new(TileLocator::new(tiles), config)?;
        Ok(Self::new(params, estimator))
    }
}

impl<S: ElevationSource> TerrainBuilder<S> {
    /// Creates a builder.
    pub fn new(params: BuildParams, source: S) -> Self {
        Self {
            params,
            assigner: ElevationAssigner::new(source),
        }
    }

    /// Build parameters.
    pub fn params(&self) -> &BuildParams {
        &self.params
    }

    /// The elevation source.
    pub fn source(&self) -> &S {
        self.assigner.source()
    }

    /// Parses boundary text (WKT, optionally SRID-prefixed) and builds.
    pub fn build(&mut self, boundary_text: &str) -> TerrainResult<TerrainBuild> {
        let boundary = parse_boundary(boundary_text)?;
        self.build_polygon(boundary)
    }

    /// Builds the surface for an already parsed boundary.
    pub fn build_polygon(&mut self, boundary: Polygon) -> TerrainResult<TerrainBuild> {
        let params = &self.params;
        info!(
            region = params.region.as_str(),
            spec = %params.param_spec(),
            "Starting terrain build"
        );

        let mut scaler = CoordinateScaler::new();
        scaler.fit(&boundary)?;

        let grid = generate_triangle_mesh(
            WORKING_FRAME_MIN,
            WORKING_FRAME_MIN,
            WORKING_FRAME_MAX,
            WORKING_FRAME_MAX,
            params.triangle_base,
        )?;
        let regional = scaler.inverse_transform_mesh(&grid)?;

        let tagged = SurfaceClassifier::new(&boundary, params.include_exterior).classify(&regional);
        let flat = flatten(&tagged);
        info!(
            grid_faces = grid.len(),
            surface_faces = tagged.len(),
            "Classified surface"
        );

        let elevated = self.assigner.resolve(&tagged)?;
        let normalized = MeshNormalizer::new(params.xy_target, params.z_target).normalize(&elevated)?;

        info!(
            region = params.region.as_str(),
            faces = normalized.len(),
            "Terrain build complete"
        );
        Ok(TerrainBuild {
            boundary,
            grid,
            flat,
            elevated,
            normalized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain_elevation::ElevationResult;

    #[test]
    fn test_param_spec() {
        let params = BuildParams {
            triangle_base: 0.1,
            include_exterior: false,
            ..BuildParams::default()
        };
        assert_eq!(params.param_spec(), "01_without_bottom");
        assert_eq!(BuildParams::default().param_spec(), "05_with_bottom");
    }

    #[test]
    fn test_build_with_synthetic_source() {
        let source = |lat: f64, lon: f64| -> ElevationResult<f64> { Ok(100.0 * lat + lon) };
        let params = BuildParams {
            triangle_base: 2.0,
            ..BuildParams::default()
        };
        let mut builder = TerrainBuilder::new(params, source);
        let build = builder
            .build("SRID=4326;POLYGON((0 0,4 0,4 4,0 4,0 0))")
            .unwrap();

        assert_eq!(build.flat.len(), build.elevated.len());
        assert_eq!(build.elevated.len(), build.normalized.len());
        // Every grid face survives when exterior geometry is kept
        assert_eq!(build.elevated.len(), build.grid.len());

        let (min, max) = build.normalized.bounding_box().unwrap();
        assert!((min.x - 1.0).abs() < 1e-9 && (min.y - 1.0).abs() < 1e-9);
        assert!(min.z.abs() < 1e-9 && (max.z - 2.0).abs() < 1e-9);
        assert!((max.x.max(max.y) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_step_aborts() {
        let source = |_: f64, _: f64| -> ElevationResult<f64> { Ok(1.0) };
        let params = BuildParams {
            triangle_base: 0.0,
            ..BuildParams::default()
        };
        let result = TerrainBuilder::new(params, source).build("POLYGON((0 0,4 0,4 4,0 0))");
        assert!(matches!(
            result,
            Err(crate::TerrainError::Geometry(
                terrain_geometry::GeometryError::InvalidDimensions(_)
            ))
        ));
    }
}
