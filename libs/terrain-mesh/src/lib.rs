//! # Terrain Mesh
//!
//! Turns a region boundary and an elevation source into a printable terrain
//! surface.
//!
//! ## Architecture
//!
//! ```text
//! terrain-geometry (grid in region coordinates)
//!     → classify (interior / exterior tags)
//!     → assign   (elevations, pedestal)
//!     → normalize (print envelope)
//!     → stl      (binary facets)
//! ```
//!
//! [`TerrainBuilder`] runs the whole chain for one region.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use terrain_elevation::EstimatorConfig;
//! use terrain_mesh::{BuildParams, TerrainBuilder};
//!
//! let params = BuildParams { region: "saopaulo_city".into(), ..BuildParams::default() };
//! let spec = params.param_spec();
//! let mut builder = TerrainBuilder::from_tiles(params, "data/elevation", EstimatorConfig::default())?;
//!
//! let wkt = std::fs::read_to_string("data/maps/saopaulo_city/poly.wkt")?;
//! let build = builder.build(&wkt)?;
//! build.write_artifacts("data/maps/saopaulo_city", &spec)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assign;
pub mod classify;
pub mod error;
pub mod key;
pub mod normalize;
pub mod pipeline;
pub mod stl;

pub use assign::ElevationAssigner;
pub use classify::{SurfaceClassifier, TaggedMesh, TaggedVertex, VertexTag};
pub use error::{TerrainError, TerrainResult};
pub use key::VertexKey;
pub use normalize::MeshNormalizer;
pub use pipeline::{ArtifactPaths, BuildParams, TerrainBuild, TerrainBuilder};
pub use stl::MeshExporter;
