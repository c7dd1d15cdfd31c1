//! # Coordinate Scaler
//!
//! Affine map between a region's bounding box and the working frame.
//!
//! Fitting scales x and y independently so the region bounds land on
//! `[WORKING_MARGIN, WORKING_MARGIN + WORKING_SPAN]` on both axes, i.e. the
//! square `[1, 19] × [1, 19]`. The map is used in both directions: grids are
//! generated in the working frame and pulled back into region coordinates.

use config::constants::{WORKING_MARGIN, WORKING_SPAN};
use glam::DVec2;
use tracing::debug;

use crate::error::{GeometryError, GeometryResult};
use crate::mesh::Mesh;
use crate::polygon::{Bounds, Polygon};

// =============================================================================
// TRANSFORM
// =============================================================================

/// A fitted axis-aligned affine map: `p' = p * scale + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalerTransform {
    scale: DVec2,
    translation: DVec2,
}

impl ScalerTransform {
    /// Fits the transform to a bounding box.
    ///
    /// Fails with `InvalidDimensions` if either extent is not positive.
    pub fn fit(bounds: &Bounds) -> GeometryResult<Self> {
        let (width, height) = (bounds.width(), bounds.height());
        if !(width > 0.0 && height > 0.0) {
            return Err(GeometryError::invalid_dimensions(format!(
                "cannot fit scaler to bounds with extent {} x {}",
                width, height
            )));
        }
        let scale = DVec2::new(WORKING_SPAN / width, WORKING_SPAN / height);
        let translation = DVec2::splat(WORKING_MARGIN) - bounds.min * scale;
        Ok(Self { scale, translation })
    }

    /// Scale factors (x, y).
    pub fn scale(&self) -> DVec2 {
        self.scale
    }

    /// Translation offsets (x, y).
    pub fn translation(&self) -> DVec2 {
        self.translation
    }

    /// Region coordinates to working frame.
    #[inline]
    pub fn forward(&self, p: DVec2) -> DVec2 {
        p * self.scale + self.translation
    }

    /// Working frame to region coordinates.
    #[inline]
    pub fn inverse(&self, p: DVec2) -> DVec2 {
        (p - self.translation) / self.scale
    }
}

// =============================================================================
// SCALER
// =============================================================================

/// Holds an optional fitted transform and applies it to points, polygons and
/// meshes.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use terrain_geometry::{CoordinateScaler, wkt::parse_boundary};
///
/// let region = parse_boundary("POLYGON((0 0,10 0,10 10,0 10,0 0))").unwrap();
/// let mut scaler = CoordinateScaler::new();
/// scaler.fit(&region).unwrap();
///
/// assert_eq!(scaler.transform_point(DVec2::ZERO).unwrap(), DVec2::new(1.0, 1.0));
/// assert_eq!(scaler.transform_point(DVec2::splat(10.0)).unwrap(), DVec2::splat(19.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoordinateScaler {
    transform: Option<ScalerTransform>,
}

impl CoordinateScaler {
    /// Creates an unfitted scaler.
    pub fn new() -> Self {
        Self { transform: None }
    }

    /// Fits the scaler to a polygon's bounding box.
    pub fn fit(&mut self, polygon: &Polygon) -> GeometryResult<&mut Self> {
        self.fit_bounds(&polygon.bounds())
    }

    /// Fits the scaler to an explicit bounding box.
    pub fn fit_bounds(&mut self, bounds: &Bounds) -> GeometryResult<&mut Self> {
        let transform = ScalerTransform::fit(bounds)?;
        debug!(
            scale_x = transform.scale.x,
            scale_y = transform.scale.y,
            "fitted coordinate scaler"
        );
        self.transform = Some(transform);
        Ok(self)
    }

    /// True once `fit` has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.transform.is_some()
    }

    /// The fitted transform, or `NotFitted`.
    pub fn transform(&self) -> GeometryResult<&ScalerTransform> {
        self.transform.as_ref().ok_or(GeometryError::NotFitted)
    }

    /// Maps a region point into the working frame.
    pub fn transform_point(&self, p: DVec2) -> GeometryResult<DVec2> {
        Ok(self.transform()?.forward(p))
    }

    /// Maps a working frame point back into region coordinates.
    pub fn inverse_transform_point(&self, p: DVec2) -> GeometryResult<DVec2> {
        Ok(self.transform()?.inverse(p))
    }

    /// Maps every ring of a polygon into the working frame.
    pub fn transform_polygon(&self, polygon: &Polygon) -> GeometryResult<Polygon> {
        let t = self.transform()?;
        Ok(polygon.map(|p| t.forward(*p)))
    }

    /// Maps every ring of a polygon back into region coordinates.
    pub fn inverse_transform_polygon(&self, polygon: &Polygon) -> GeometryResult<Polygon> {
        let t = self.transform()?;
        Ok(polygon.map(|p| t.inverse(*p)))
    }

    /// Maps a whole mesh into the working frame.
    pub fn transform_mesh(&self, mesh: &Mesh) -> GeometryResult<Mesh> {
        let t = self.transform()?;
        Ok(mesh.map_points(|p| t.forward(*p)))
    }

    /// Maps a whole mesh back into region coordinates.
    pub fn inverse_transform_mesh(&self, mesh: &Mesh) -> GeometryResult<Mesh> {
        let t = self.transform()?;
        Ok(mesh.map_points(|p| t.inverse(*p)))
    }
}
