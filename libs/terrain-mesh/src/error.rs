//! # Terrain Errors
//!
//! Pipeline-level error type. Stage errors from the geometry and elevation
//! crates pass through unchanged; any error aborts the build.

use terrain_elevation::ElevationError;
use terrain_geometry::GeometryError;
use thiserror::Error;

/// Errors that can occur while building a terrain surface.
#[derive(Error, Debug)]
pub enum TerrainError {
    /// Boundary, scaling, tessellation or persistence failure.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Tile resolution, loading or estimation failure.
    #[error(transparent)]
    Elevation(#[from] ElevationError),

    /// The mesh has zero extent along an axis and cannot be normalized.
    #[error("Degenerate mesh: zero extent along {axis}")]
    DegenerateMesh {
        /// Axis name (`x`, `y` or `z`)
        axis: &'static str,
    },

    /// The mesh has no faces.
    #[error("Mesh has no faces")]
    EmptyMesh,

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for terrain operations.
pub type TerrainResult<T> = Result<T, TerrainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_errors_pass_through() {
        let err: TerrainError = GeometryError::NotFitted.into();
        assert_eq!(err.to_string(), GeometryError::NotFitted.to_string());

        let err: TerrainError = ElevationError::tile_not_found("x/1_2_cor_rec.txt").into();
        assert!(matches!(
            err,
            TerrainError::Elevation(ElevationError::TileNotFound { .. })
        ));
    }

    #[test]
    fn test_degenerate_display() {
        let err = TerrainError::DegenerateMesh { axis: "z" };
        assert_eq!(err.to_string(), "Degenerate mesh: zero extent along z");
    }
}
