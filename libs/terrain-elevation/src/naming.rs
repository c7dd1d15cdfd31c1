//! # Tile Naming
//!
//! Elevation samples are published as one text file per geographic band.
//! A file name is built from two parts:
//!
//! - the whole-degree latitude, unsigned (`-23.55` → `23`)
//! - the longitude floored to a 1.5° band, in unsigned tenths of a degree,
//!   with a trailing zero written as `_` (`-46.63` → band `-48.0` → `48_`)
//!
//! followed by `cor_rec.txt`, e.g. `23_48_cor_rec.txt`. A few published
//! files break the pattern and are mapped through [`TILE_NAME_EXCEPTIONS`].

use std::path::{Path, PathBuf};

use config::constants::{TILE_BAND_TENTHS, TILE_FILE_SUFFIX, TILE_NAME_EXCEPTIONS};

use crate::error::{ElevationError, ElevationResult};

/// File name of the tile covering `(lat, lon)`, exceptions applied.
///
/// # Example
///
/// ```rust
/// use terrain_elevation::naming::tile_file_name;
///
/// assert_eq!(tile_file_name(-23.55, -46.63), "23_48_cor_rec.txt");
/// assert_eq!(tile_file_name(-23.55, -46.3), "23_465cor_rec.txt");
/// ```
pub fn tile_file_name(lat: f64, lon: f64) -> String {
    let name = band_file_name(lat, lon);
    TILE_NAME_EXCEPTIONS
        .iter()
        .find(|(computed, _)| *computed == name)
        .map(|(_, published)| (*published).to_string())
        .unwrap_or(name)
}

/// File name produced by the band pattern alone.
fn band_file_name(lat: f64, lon: f64) -> String {
    let whole_degrees = lat.abs().trunc() as u64;
    let band = (lon * 10.0 / TILE_BAND_TENTHS).floor() * TILE_BAND_TENTHS;
    let mut band_label = (band.abs() as u64).to_string();
    if band_label.ends_with('0') {
        band_label.pop();
        band_label.push('_');
    }
    format!("{}_{}{}", whole_degrees, band_label, TILE_FILE_SUFFIX)
}

/// Resolves tile files under a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLocator {
    root: PathBuf,
}

impl TileLocator {
    /// Creates a locator rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the tile covering `(lat, lon)` would have. Not checked on disk.
    pub fn path_for(&self, lat: f64, lon: f64) -> PathBuf {
        self.root.join(tile_file_name(lat, lon))
    }

    /// Path of the existing tile covering `(lat, lon)`.
    ///
    /// Fails with `TileNotFound` if no such file exists.
    pub fn resolve(&self, lat: f64, lon: f64) -> ElevationResult<PathBuf> {
        let path = self.path_for(lat, lon);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ElevationError::tile_not_found(path))
        }
    }
}
