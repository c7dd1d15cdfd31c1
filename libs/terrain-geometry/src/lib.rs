//! # Terrain Geometry
//!
//! Planar geometry for the terrain surface pipeline.
//!
//! ## Architecture
//!
//! ```text
//! boundary text → wkt (Region) → scaler (fit) → grid (working frame Mesh)
//!                                            ↘ scaler.inverse → region-frame Mesh
//! ```
//!
//! - **Polygon / Region**: closed-ring polygons and the single/multi boundary variant
//! - **WKT**: SRID-aware boundary reader and writer
//! - **Scaler**: affine map between a region's bounding box and `[1, 19] × [1, 19]`
//! - **Grid**: uniform two-triangles-per-cell tessellation
//! - **Persistence**: JSON ring records for 2D and 3D meshes
//!
//! ## Usage
//!
//! ```rust
//! use terrain_geometry::{grid::generate_triangle_mesh, wkt::parse_boundary, CoordinateScaler};
//!
//! let boundary = parse_boundary("SRID=4326;POLYGON((0 0,10 0,10 10,0 10,0 0))").unwrap();
//! let mut scaler = CoordinateScaler::new();
//! scaler.fit(&boundary).unwrap();
//!
//! let grid = generate_triangle_mesh(0.0, 0.0, 20.0, 20.0, 0.5).unwrap();
//! let regional = scaler.inverse_transform_mesh(&grid).unwrap();
//! assert_eq!(regional.len(), grid.len());
//! ```

pub mod error;
pub mod grid;
pub mod mesh;
pub mod persistence;
pub mod polygon;
pub mod region;
pub mod scaler;
pub mod wkt;

pub use error::{GeometryError, GeometryResult};
pub use grid::GridMesher;
pub use mesh::{Mesh, Mesh2, Mesh3};
pub use persistence::RecordPoint;
pub use polygon::{Bounds, Polygon, RingPoint};
pub use region::Region;
pub use scaler::{CoordinateScaler, ScalerTransform};
