//! # Elevation Errors
//!
//! Error types for tile resolution, tile loading and estimation.
//!
//! ## Error Policy
//!
//! - A missing tile is fatal for the query that needed it, never retried
//! - Malformed tile rows are reported with file and line

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while estimating elevation.
#[derive(Error, Debug)]
pub enum ElevationError {
    /// The tile covering a query point does not exist.
    #[error("Elevation tile not found: {}", path.display())]
    TileNotFound {
        /// Resolved path that was looked up
        path: PathBuf,
    },

    /// A tile row could not be parsed.
    #[error("Malformed tile {}:{line}: {message}", path.display())]
    MalformedTile {
        /// Tile path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What was wrong with the row
        message: String,
    },

    /// A tile contained no samples.
    #[error("Elevation tile has no samples: {}", path.display())]
    EmptyTile {
        /// Tile path
        path: PathBuf,
    },

    /// Neighbour count must be at least one.
    #[error("Invalid neighbour count: {0}")]
    InvalidNeighborCount(usize),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ElevationError {
    /// Creates a tile-not-found error.
    pub fn tile_not_found(path: impl Into<PathBuf>) -> Self {
        Self::TileNotFound { path: path.into() }
    }

    /// Creates a malformed-tile error.
    pub fn malformed_tile(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::MalformedTile {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for elevation operations.
pub type ElevationResult<T> = Result<T, ElevationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ElevationError::tile_not_found("data/19_48_cor_rec.txt");
        assert!(err.to_string().contains("19_48_cor_rec.txt"));

        let err = ElevationError::malformed_tile("t.txt", 3, "expected 3 columns");
        assert_eq!(err.to_string(), "Malformed tile t.txt:3: expected 3 columns");
    }
}
