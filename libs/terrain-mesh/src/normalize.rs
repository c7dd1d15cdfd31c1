//! # Mesh Normalizer
//!
//! Rescales an elevated surface into the print envelope.
//!
//! x and y share one factor, `xy_target / max(x_extent, y_extent)`, so the
//! planar aspect ratio survives. z gets its own factor, `z_target / z_extent`.
//! After scaling, the minimum corner sits at `(xy_margin, xy_margin, z_offset)`.

use config::constants::{DEFAULT_XY_TARGET, DEFAULT_Z_TARGET, XY_MARGIN, Z_OFFSET};
use glam::DVec3;
use terrain_geometry::Mesh3;
use tracing::debug;

use crate::error::{TerrainError, TerrainResult};

/// Target envelope for the printed model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshNormalizer {
    /// Length of the longer planar side after scaling
    pub xy_target: f64,
    /// Height range after scaling
    pub z_target: f64,
    /// Offset added to x and y
    pub xy_margin: f64,
    /// Offset added to z
    pub z_offset: f64,
}

impl Default for MeshNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_XY_TARGET, DEFAULT_Z_TARGET)
    }
}

impl MeshNormalizer {
    /// Creates a normalizer with the default margins.
    pub fn new(xy_target: f64, z_target: f64) -> Self {
        Self {
            xy_target,
            z_target,
            xy_margin: XY_MARGIN,
            z_offset: Z_OFFSET,
        }
    }

    /// Overrides the margins.
    pub fn with_margins(mut self, xy_margin: f64, z_offset: f64) -> Self {
        self.xy_margin = xy_margin;
        self.z_offset = z_offset;
        self
    }

    /// Rescales every vertex of `mesh`.
    ///
    /// Fails with `EmptyMesh` for a mesh without faces and `DegenerateMesh`
    /// if any axis has zero extent.
    pub fn normalize(&self, mesh: &Mesh3) -> TerrainResult<Mesh3> {
        let (min, max) = mesh.bounding_box().ok_or(TerrainError::EmptyMesh)?;
        let extent = max - min;
        for (axis, value) in [("x", extent.x), ("y", extent.y), ("z", extent.z)] {
            if !(value > 0.0) {
                return Err(TerrainError::DegenerateMesh { axis });
            }
        }

        let xy_scale = self.xy_target / extent.x.max(extent.y);
        let z_scale = self.z_target / extent.z;
        let scale = DVec3::new(xy_scale, xy_scale, z_scale);
        let offset = DVec3::new(self.xy_margin, self.xy_margin, self.z_offset);

        debug!(xy_scale, z_scale, "normalizing surface");
        Ok(mesh.map_points(|p| (*p - min) * scale + offset))
    }
}

/// Normalizes `mesh` into an envelope with the default margins.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use terrain_geometry::{Mesh3, Polygon};
/// use terrain_mesh::normalize::normalize;
///
/// let face = Polygon::triangle(
///     DVec3::new(-46.8, -23.9, 700.0),
///     DVec3::new(-46.3, -23.9, 760.0),
///     DVec3::new(-46.8, -23.4, 820.0),
/// )
/// .unwrap();
/// let mesh: Mesh3 = vec![face].into_iter().collect();
///
/// let (min, max) = normalize(&mesh, 19.0, 2.0).unwrap().bounding_box().unwrap();
/// assert!((min - DVec3::new(1.0, 1.0, 0.0)).length() < 1e-9);
/// assert!((max - DVec3::new(20.0, 20.0, 2.0)).length() < 1e-9);
/// ```
pub fn normalize(mesh: &Mesh3, xy_target: f64, z_target: f64) -> TerrainResult<Mesh3> {
    MeshNormalizer::new(xy_target, z_target).normalize(mesh)
}
