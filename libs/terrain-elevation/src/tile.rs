//! # Elevation Tile
//!
//! One loaded tile file: its sample extent plus a nearest-neighbour index.
//!
//! Samples are indexed as unit vectors on the sphere. The straight-line
//! (chord) distance between two unit vectors grows monotonically with the
//! great-circle angle between them, so nearest-neighbour order under the
//! R-tree's Euclidean metric is nearest-neighbour order on the sphere. The
//! chord is converted back to an angle in radians for weighting.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use crate::error::{ElevationError, ElevationResult};

// =============================================================================
// SAMPLES
// =============================================================================

/// Column layout of a tile file.
///
/// Every row holds two coordinates and an elevation, separated by whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnOrder {
    /// `latitude longitude elevation`
    LatLon,
    /// `longitude latitude elevation`
    #[default]
    LonLat,
}

/// A single elevation sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Elevation in the tile's units
    pub elevation: f64,
}

/// A sample returned by a nearest-neighbour query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Elevation of the sample
    pub elevation: f64,
    /// Great-circle distance to the query, in radians
    pub distance: f64,
}

/// Latitude/longitude extent of a tile's samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds {
    /// Smallest sample latitude
    pub lat_min: f64,
    /// Largest sample latitude
    pub lat_max: f64,
    /// Smallest sample longitude
    pub lon_min: f64,
    /// Largest sample longitude
    pub lon_max: f64,
}

impl TileBounds {
    fn from_samples(samples: &[Sample]) -> Option<Self> {
        let first = samples.first()?;
        let init = Self {
            lat_min: first.lat,
            lat_max: first.lat,
            lon_min: first.lon,
            lon_max: first.lon,
        };
        Some(samples.iter().fold(init, |b, s| Self {
            lat_min: b.lat_min.min(s.lat),
            lat_max: b.lat_max.max(s.lat),
            lon_min: b.lon_min.min(s.lon),
            lon_max: b.lon_max.max(s.lon),
        }))
    }

    /// True if the point lies inside or on the extent.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }
}

// =============================================================================
// SPATIAL INDEX
// =============================================================================

/// Index entry: sample position on the unit sphere.
#[derive(Debug, Clone)]
struct SampleEntry {
    position: [f64; 3],
    elevation: f64,
}

impl RTreeObject for SampleEntry {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for SampleEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Unit vector for a latitude/longitude pair in degrees.
fn unit_vector(lat: f64, lon: f64) -> [f64; 3] {
    let (lat, lon) = (lat.to_radians(), lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Great-circle angle subtended by a chord of the unit sphere.
fn chord_to_angle(chord: f64) -> f64 {
    2.0 * (chord / 2.0).min(1.0).asin()
}

// =============================================================================
// TILE
// =============================================================================

/// A loaded tile: sample extent and nearest-neighbour index.
#[derive(Debug)]
pub struct ElevationTile {
    path: PathBuf,
    bounds: TileBounds,
    tree: RTree<SampleEntry>,
}

impl ElevationTile {
    /// Builds a tile from samples.
    ///
    /// Fails with `EmptyTile` if there are none.
    pub fn from_samples(path: impl Into<PathBuf>, samples: Vec<Sample>) -> ElevationResult<Self> {
        let path = path.into();
        let Some(bounds) = TileBounds::from_samples(&samples) else {
            return Err(ElevationError::EmptyTile { path });
        };
        let entries = samples
            .into_iter()
            .map(|s| SampleEntry {
                position: unit_vector(s.lat, s.lon),
                elevation: s.elevation,
            })
            .collect();
        Ok(Self {
            path,
            bounds,
            tree: RTree::bulk_load(entries),
        })
    }

    /// Loads a tile file from disk.
    pub fn load(path: &Path, order: ColumnOrder) -> ElevationResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(path, BufReader::new(file), order)
    }

    /// Reads whitespace-delimited sample rows. Blank lines are skipped.
    ///
    /// `path` only labels errors and the resulting tile.
    pub fn from_reader<R: BufRead>(
        path: &Path,
        reader: R,
        order: ColumnOrder,
    ) -> ElevationResult<Self> {
        let mut samples = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            samples.push(parse_row(path, index + 1, &line, order)?);
        }
        debug!(path = %path.display(), samples = samples.len(), "read tile samples");
        Self::from_samples(path, samples)
    }

    /// Path the tile was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sample extent.
    pub fn bounds(&self) -> &TileBounds {
        &self.bounds
    }

    /// True if the point lies inside the sample extent.
    pub fn covers(&self, lat: f64, lon: f64) -> bool {
        self.bounds.contains(lat, lon)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// True if the tile holds no samples.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The `k` samples nearest to `(lat, lon)`, closest first.
    pub fn nearest(&self, lat: f64, lon: f64, k: usize) -> Vec<Neighbor> {
        let query = unit_vector(lat, lon);
        self.tree
            .nearest_neighbor_iter(&query)
            .take(k)
            .map(|entry| Neighbor {
                elevation: entry.elevation,
                distance: chord_to_angle(entry.distance_2(&query).sqrt()),
            })
            .collect()
    }
}

fn parse_row(path: &Path, line: usize, text: &str, order: ColumnOrder) -> ElevationResult<Sample> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(ElevationError::malformed_tile(
            path,
            line,
            format!("expected 3 columns, found {}", fields.len()),
        ));
    }
    let mut values = [0.0; 3];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                ElevationError::malformed_tile(path, line, format!("invalid number '{}'", field))
            })?;
    }
    let [first, second, elevation] = values;
    let (lat, lon) = match order {
        ColumnOrder::LatLon => (first, second),
        ColumnOrder::LonLat => (second, first),
    };
    Ok(Sample {
        lat,
        lon,
        elevation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tile_from(text: &str, order: ColumnOrder) -> ElevationResult<ElevationTile> {
        ElevationTile::from_reader(Path::new("tile.txt"), text.as_bytes(), order)
    }

    #[test]
    fn test_bounds_follow_column_order() {
        let text = "-46.7 -23.6 700\n-46.6 -23.5 710\n\n-46.5 -23.4 720\n";
        let tile = tile_from(text, ColumnOrder::LonLat).unwrap();
        assert_eq!(tile.len(), 3);
        assert_eq!(tile.bounds().lat_min, -23.6);
        assert_eq!(tile.bounds().lon_max, -46.5);
        assert!(tile.covers(-23.55, -46.65));
        assert!(!tile.covers(-23.55, -46.8));

        let swapped = tile_from(text, ColumnOrder::LatLon).unwrap();
        assert_eq!(swapped.bounds().lat_min, -46.7);
    }

    #[test]
    fn test_nearest_is_great_circle() {
        let text = "0 0 10\n0 1 20\n0 3 30\n";
        let tile = tile_from(text, ColumnOrder::LatLon).unwrap();
        let hits = tile.nearest(0.0, 0.9, 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].elevation, 20.0);
        assert_eq!(hits[1].elevation, 10.0);
        assert_relative_eq!(hits[0].distance, 0.1_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(hits[1].distance, 0.9_f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_meridian_convergence() {
        // Near the pole one degree of longitude is much shorter than one of latitude.
        // (81, 5) is about 0.78 degrees away, (80, 0) a full degree.
        let text = "80 0 1\n81 5 2\n";
        let tile = tile_from(text, ColumnOrder::LatLon).unwrap();
        let hits = tile.nearest(81.0, 0.0, 1);
        assert_eq!(hits[0].elevation, 2.0);
        assert!(hits[0].distance < 1.0_f64.to_radians());
    }

    #[test]
    fn test_exact_hit_has_zero_distance() {
        let tile = tile_from("-23.5 -46.6 812.5\n", ColumnOrder::LatLon).unwrap();
        let hits = tile.nearest(-23.5, -46.6, 1);
        assert_eq!(hits[0].elevation, 812.5);
        assert!(hits[0].distance < 1e-7);
    }

    #[test]
    fn test_malformed_rows() {
        match tile_from("1 2 3\n1 2\n", ColumnOrder::LatLon) {
            Err(ElevationError::MalformedTile { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedTile, got {:?}", other),
        }
        assert!(matches!(
            tile_from("1 x 3\n", ColumnOrder::LatLon),
            Err(ElevationError::MalformedTile { line: 1, .. })
        ));
        assert!(matches!(
            tile_from("1 NaN 3\n", ColumnOrder::LatLon),
            Err(ElevationError::MalformedTile { .. })
        ));
    }

    #[test]
    fn test_empty_tile() {
        assert!(matches!(
            tile_from("\n  \n", ColumnOrder::LonLat),
            Err(ElevationError::EmptyTile { .. })
        ));
    }
}
