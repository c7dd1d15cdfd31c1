//! # Geometry Errors
//!
//! Error types for boundary parsing, scaling, tessellation and persistence.
//!
//! ## Error Policy
//!
//! - No fallback when an operation fails
//! - Errors carry enough context to locate the bad input

use thiserror::Error;

/// Errors that can occur while building planar geometry.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// Degenerate tessellation or fitting input.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Coordinate scaler used before `fit`.
    #[error("Scaler has not been fitted yet")]
    NotFitted,

    /// Boundary text is not a valid polygon or multipolygon.
    #[error("Malformed boundary at byte {offset}: {message}")]
    MalformedBoundary {
        /// What was wrong with the text
        message: String,
        /// Byte offset into the (SRID-stripped) text
        offset: usize,
    },

    /// Ring does not satisfy the closed-ring invariants.
    #[error("Invalid ring: {0}")]
    InvalidRing(String),

    /// Persisted mesh record has the wrong shape.
    #[error("Invalid mesh record: {0}")]
    InvalidRecord(String),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeometryError {
    /// Creates an invalid dimensions error.
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions(message.into())
    }

    /// Creates a malformed boundary error at the given byte offset.
    pub fn malformed(message: impl Into<String>, offset: usize) -> Self {
        Self::MalformedBoundary {
            message: message.into(),
            offset,
        }
    }

    /// Creates an invalid ring error.
    pub fn invalid_ring(message: impl Into<String>) -> Self {
        Self::InvalidRing(message.into())
    }

    /// Creates an invalid record error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
