//! # Elevation Assigner
//!
//! Replaces tag placeholders with real elevations.
//!
//! Interior vertices are deduplicated by [`VertexKey`] and queried once each,
//! in key order, so a build touches tiles in the same sequence every run.
//! Exterior vertices all receive the pedestal: the lowest interior elevation
//! minus a tenth of the interior range.
//!
//! Region coordinates carry longitude in x and latitude in y.

use std::collections::BTreeMap;

use config::constants::{FALLBACK_ELEVATION, PEDESTAL_DEPTH_FRACTION};
use glam::DVec2;
use terrain_elevation::ElevationSource;
use terrain_geometry::{Mesh3, RingPoint};
use tracing::{info, warn};

use crate::classify::{TaggedMesh, VertexTag};
use crate::error::TerrainResult;
use crate::key::VertexKey;

/// Pedestal elevation for a set of interior elevations.
///
/// Returns `None` when there are no elevations.
///
/// # Example
///
/// ```rust
/// use terrain_mesh::assign::pedestal_elevation;
///
/// assert_eq!(pedestal_elevation(&[100.0, 150.0, 200.0]), Some(90.0));
/// assert_eq!(pedestal_elevation(&[]), None);
/// ```
pub fn pedestal_elevation(elevations: &[f64]) -> Option<f64> {
    let (min, max) = elevation_range(elevations)?;
    Some(min - PEDESTAL_DEPTH_FRACTION * (max - min))
}

fn elevation_range(elevations: &[f64]) -> Option<(f64, f64)> {
    let first = *elevations.first()?;
    Some(
        elevations
            .iter()
            .fold((first, first), |(lo, hi), &z| (lo.min(z), hi.max(z))),
    )
}

/// Elevations resolved for one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedElevations {
    elevations: BTreeMap<VertexKey, f64>,
    floor: f64,
    pedestal: f64,
}

impl ResolvedElevations {
    /// Elevation given to every exterior vertex.
    pub fn pedestal(&self) -> f64 {
        self.pedestal
    }

    /// Lowest interior elevation (or the fallback when there is none).
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Number of distinct interior vertices resolved.
    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    /// True if no interior vertex was resolved.
    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    /// Resolved elevation at `p`, if it was an interior vertex.
    pub fn get(&self, p: DVec2) -> Option<f64> {
        self.elevations.get(&VertexKey::new(p)).copied()
    }
}

/// Resolves elevations for classified surfaces.
#[derive(Debug)]
pub struct ElevationAssigner<S> {
    source: S,
}

impl<S: ElevationSource> ElevationAssigner<S> {
    /// Creates an assigner querying `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The elevation source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes the assigner, returning its source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Queries every distinct interior vertex of `mesh` once.
    pub fn resolve_elevations(&mut self, mesh: &TaggedMesh) -> TerrainResult<ResolvedElevations> {
        let mut interior: BTreeMap<VertexKey, DVec2> = BTreeMap::new();
        for v in mesh.points().filter(|v| v.tag == VertexTag::Interior) {
            interior.entry(VertexKey::new(v.position)).or_insert(v.position);
        }

        let queries: Vec<(f64, f64)> = interior.values().map(|p| (p.y, p.x)).collect();
        let values = self.source.estimate_all(&queries)?;

        let (floor, pedestal) = match (elevation_range(&values), pedestal_elevation(&values)) {
            (Some((min, _)), Some(pedestal)) => (min, pedestal),
            _ => {
                warn!(
                    elevation = FALLBACK_ELEVATION,
                    "No interior vertices, using fallback elevation"
                );
                (FALLBACK_ELEVATION, FALLBACK_ELEVATION)
            }
        };

        info!(
            vertices = values.len(),
            pedestal,
            "Resolved interior elevations"
        );
        Ok(ResolvedElevations {
            elevations: interior.into_keys().zip(values).collect(),
            floor,
            pedestal,
        })
    }

    /// Resolves elevations and builds the elevated surface.
    ///
    /// # Example
    ///
    /// ```rust
    /// use terrain_elevation::ElevationResult;
    /// use terrain_geometry::{grid::generate_triangle_mesh, wkt::parse_boundary};
    /// use terrain_mesh::{classify::classify, ElevationAssigner};
    ///
    /// let boundary = parse_boundary("POLYGON((0 0,10 0,10 10,0 10,0 0))").unwrap();
    /// let grid = generate_triangle_mesh(-2.0, -2.0, 12.0, 12.0, 1.0).unwrap();
    /// let tagged = classify(&boundary, &grid, true);
    ///
    /// // Elevation grows with latitude (y)
    /// let source = |lat: f64, _lon: f64| -> ElevationResult<f64> { Ok(100.0 + lat) };
    /// let surface = ElevationAssigner::new(source).resolve(&tagged).unwrap();
    /// assert_eq!(surface.len(), tagged.len());
    /// ```
    pub fn resolve(&mut self, mesh: &TaggedMesh) -> TerrainResult<Mesh3> {
        let resolved = self.resolve_elevations(mesh)?;
        Ok(apply_elevations(mesh, &resolved))
    }
}

/// Builds the elevated surface from resolved elevations.
///
/// An interior vertex missing from `resolved` falls back to its floor.
pub fn apply_elevations(mesh: &TaggedMesh, resolved: &ResolvedElevations) -> Mesh3 {
    let mut missing = 0usize;
    let surface = mesh.map_points(|v| {
        let z = match v.tag {
            VertexTag::Interior => resolved.get(v.xy()).unwrap_or_else(|| {
                missing += 1;
                resolved.floor
            }),
            VertexTag::Exterior => resolved.pedestal,
        };
        v.position.extend(z)
    });
    if missing > 0 {
        warn!(missing, "Interior vertices without a resolved elevation");
    }
    surface
}
