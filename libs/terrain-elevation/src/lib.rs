//! # Terrain Elevation
//!
//! Elevation lookup over tiled point-sample files.
//!
//! ## Architecture
//!
//! ```text
//! (lat, lon) → naming (tile file) → tile (R-tree on the unit sphere) → IDW → elevation
//! ```
//!
//! A single tile is resident at a time and is swapped out when a query leaves
//! its sample extent. Distances are great-circle angles in radians.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use terrain_elevation::{ElevationEstimator, ElevationSource, EstimatorConfig, TileLocator};
//!
//! let locator = TileLocator::new("data/elevation");
//! let mut estimator = ElevationEstimator::new(locator, EstimatorConfig::default()).unwrap();
//! let z = estimator.estimate(-23.55, -46.63).unwrap();
//! ```

pub mod error;
pub mod estimator;
pub mod naming;
pub mod tile;

pub use error::{ElevationError, ElevationResult};
pub use estimator::{ElevationEstimator, ElevationSource, EstimatorConfig};
pub use naming::{tile_file_name, TileLocator};
pub use tile::{ColumnOrder, ElevationTile};
