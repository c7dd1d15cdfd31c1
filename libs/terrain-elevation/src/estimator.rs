//! # Elevation Estimator
//!
//! Answers `(lat, lon) → elevation` queries from a single resident tile.
//!
//! The resident tile is replaced wholesale when a query falls outside its
//! sample extent. Only one tile is held at a time, so queries alternating
//! between two tiles reload on every switch; [`ElevationEstimator::tile_loads`]
//! exposes how often that happened. A query outside the extent that resolves
//! to the file already resident (a point in the gap at the edge of the
//! samples) keeps the tile instead of re-reading it.

use config::constants::{DEFAULT_NEIGHBORS, IDW_DISTANCE_FLOOR};
use tracing::{debug, info};

use crate::error::{ElevationError, ElevationResult};
use crate::naming::TileLocator;
use crate::tile::{ColumnOrder, ElevationTile, Neighbor};

// =============================================================================
// SOURCE TRAIT
// =============================================================================

/// Anything that can produce an elevation for a coordinate.
///
/// Closures implement this, which keeps callers testable without tile files.
///
/// # Example
///
/// ```rust
/// use terrain_elevation::{ElevationResult, ElevationSource};
///
/// let mut flat = |_lat: f64, _lon: f64| -> ElevationResult<f64> { Ok(42.0) };
/// assert_eq!(flat.estimate(-23.5, -46.6).unwrap(), 42.0);
/// ```
pub trait ElevationSource {
    /// Elevation at `(lat, lon)` in degrees.
    fn estimate(&mut self, lat: f64, lon: f64) -> ElevationResult<f64>;

    /// Estimates a batch of `(lat, lon)` points in order, stopping at the
    /// first failure.
    fn estimate_all(&mut self, points: &[(f64, f64)]) -> ElevationResult<Vec<f64>> {
        points
            .iter()
            .map(|&(lat, lon)| self.estimate(lat, lon))
            .collect()
    }
}

impl<F> ElevationSource for F
where
    F: FnMut(f64, f64) -> ElevationResult<f64>,
{
    fn estimate(&mut self, lat: f64, lon: f64) -> ElevationResult<f64> {
        self(lat, lon)
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Runtime estimator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Number of nearest samples blended per query
    pub neighbors: usize,
    /// Column layout of the tile files
    pub column_order: ColumnOrder,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            neighbors: DEFAULT_NEIGHBORS,
            column_order: ColumnOrder::default(),
        }
    }
}

// =============================================================================
// ESTIMATOR
// =============================================================================

/// Tile-backed nearest-neighbour estimator.
#[derive(Debug)]
pub struct ElevationEstimator {
    locator: TileLocator,
    config: EstimatorConfig,
    resident: Option<ElevationTile>,
    tile_loads: usize,
}

impl ElevationEstimator {
    /// Creates an estimator with no resident tile.
    ///
    /// Fails with `InvalidNeighborCount` if `config.neighbors` is zero.
    pub fn new(locator: TileLocator, config: EstimatorConfig) -> ElevationResult<Self> {
        if config.neighbors == 0 {
            return Err(ElevationError::InvalidNeighborCount(config.neighbors));
        }
        Ok(Self {
            locator,
            config,
            resident: None,
            tile_loads: 0,
        })
    }

    /// Estimator settings.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// The tile currently held, if any.
    pub fn resident_tile(&self) -> Option<&ElevationTile> {
        self.resident.as_ref()
    }

    /// Number of tile files read so far.
    pub fn tile_loads(&self) -> usize {
        self.tile_loads
    }

    fn ensure_tile(&mut self, lat: f64, lon: f64) -> ElevationResult<&ElevationTile> {
        let covered = self
            .resident
            .as_ref()
            .is_some_and(|tile| tile.covers(lat, lon));
        if !covered {
            self.replace_tile(lat, lon)?;
        }
        self.resident
            .as_ref()
            .ok_or_else(|| ElevationError::tile_not_found(self.locator.path_for(lat, lon)))
    }

    /// Swaps in the tile covering `(lat, lon)`.
    ///
    /// The path is resolved before anything is dropped, so a missing tile
    /// leaves the resident tile in place.
    fn replace_tile(&mut self, lat: f64, lon: f64) -> ElevationResult<()> {
        let path = self.locator.resolve(lat, lon)?;
        if self.resident.as_ref().is_some_and(|tile| tile.path() == path) {
            debug!(lat, lon, "query outside sample extent of the resident tile");
            return Ok(());
        }
        let tile = ElevationTile::load(&path, self.config.column_order)?;
        self.tile_loads += 1;
        info!(
            path = %path.display(),
            samples = tile.len(),
            loads = self.tile_loads,
            "Loaded elevation tile"
        );
        self.resident = Some(tile);
        Ok(())
    }
}

impl ElevationSource for ElevationEstimator {
    fn estimate(&mut self, lat: f64, lon: f64) -> ElevationResult<f64> {
        let k = self.config.neighbors;
        let tile = self.ensure_tile(lat, lon)?;
        let neighbors = tile.nearest(lat, lon, k);
        weighted_elevation(&neighbors).ok_or_else(|| ElevationError::EmptyTile {
            path: tile.path().to_path_buf(),
        })
    }
}

/// Inverse-distance-weighted mean of neighbour elevations.
///
/// Distances are floored at [`IDW_DISTANCE_FLOOR`] so an exact hit does not
/// divide by zero. Returns `None` for an empty slice.
///
/// # Example
///
/// ```rust
/// use terrain_elevation::estimator::weighted_elevation;
/// use terrain_elevation::tile::Neighbor;
///
/// let near = Neighbor { elevation: 100.0, distance: 1.0 };
/// let far = Neighbor { elevation: 200.0, distance: 3.0 };
/// let z = weighted_elevation(&[near, far]).unwrap();
/// assert!((z - 125.0).abs() < 1e-9);
/// ```
pub fn weighted_elevation(neighbors: &[Neighbor]) -> Option<f64> {
    if neighbors.is_empty() {
        return None;
    }
    let (weighted, total) = neighbors.iter().fold((0.0, 0.0), |(sum, total), n| {
        let weight = 1.0 / n.distance.max(IDW_DISTANCE_FLOOR);
        (sum + weight * n.elevation, total + weight)
    });
    Some(weighted / total)
}
