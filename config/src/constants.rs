//! # Configuration Constants
//!
//! Centralized constants for the terrain surface pipeline. Working frame
//! geometry, tessellation parameters, elevation lookup tuning and print
//! envelope defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Working Frame**: The normalized 2D span the tessellation lives in
//! - **Tessellation**: Grid triangle proportions
//! - **Elevation**: Tile naming and nearest-neighbor weighting
//! - **Surface**: Vertex placeholders and pedestal computation
//! - **Print Envelope**: Final physical scaling targets
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Scale used to quantize planar coordinates into integer vertex keys.
///
/// Two vertices whose coordinates agree to 1e-9 units collapse onto the same
/// key. Region coordinates are degrees, so this is well below a millimeter.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_KEY_SCALE;
///
/// let key = (-46.5_f64 * VERTEX_KEY_SCALE).round() as i64;
/// assert_eq!(key, -46_500_000_000);
/// ```
pub const VERTEX_KEY_SCALE: f64 = 1e9;

// =============================================================================
// WORKING FRAME CONSTANTS
// =============================================================================

/// Lower corner (both axes) of the working frame the grid is generated over.
pub const WORKING_FRAME_MIN: f64 = 0.0;

/// Upper corner (both axes) of the working frame the grid is generated over.
pub const WORKING_FRAME_MAX: f64 = 20.0;

/// Margin between the working frame edge and the fitted region bounds.
///
/// A fitted region occupies `[WORKING_MARGIN, WORKING_MARGIN + WORKING_SPAN]`
/// on both axes.
pub const WORKING_MARGIN: f64 = 1.0;

/// Width and height the region bounding box is scaled to inside the frame.
///
/// # Example
///
/// ```rust
/// use config::constants::{WORKING_FRAME_MAX, WORKING_MARGIN, WORKING_SPAN};
///
/// assert_eq!(WORKING_MARGIN + WORKING_SPAN + WORKING_MARGIN, WORKING_FRAME_MAX);
/// ```
pub const WORKING_SPAN: f64 = 18.0;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Ratio between a grid triangle's height and its base.
///
/// This is `∛3 / 2`, not the equilateral altitude `√3 / 2`. It is kept as a
/// tunable proportion; changing it changes the row count of every grid.
///
/// # Example
///
/// ```rust
/// use config::constants::TRIANGLE_HEIGHT_RATIO;
///
/// let base = 0.5;
/// let height = base * TRIANGLE_HEIGHT_RATIO;
/// assert!(height > 0.36 && height < 0.37);
/// ```
pub const TRIANGLE_HEIGHT_RATIO: f64 = 0.721_124_785_153_704_2;

/// Default triangle base (edge length along x) in working frame units.
pub const DEFAULT_TRIANGLE_BASE: f64 = 0.5;

// =============================================================================
// ELEVATION CONSTANTS
// =============================================================================

/// Default number of neighbors blended by the elevation estimator.
///
/// With one neighbor the inverse-distance weighting reduces to identity.
pub const DEFAULT_NEIGHBORS: usize = 1;

/// Lower bound applied to neighbor distances (radians) before weighting.
///
/// Prevents division by zero when a query lands exactly on a sample.
pub const IDW_DISTANCE_FLOOR: f64 = 1e-7;

/// Width of one tile band along the quantized axis, in tenths of a degree.
///
/// # Example
///
/// ```rust
/// use config::constants::TILE_BAND_TENTHS;
///
/// // -46.3 degrees floors to the -46.5 band
/// let tenths = -46.3_f64 * 10.0;
/// let band = (tenths / TILE_BAND_TENTHS).floor() * TILE_BAND_TENTHS;
/// assert_eq!(band, -465.0);
/// ```
pub const TILE_BAND_TENTHS: f64 = 15.0;

/// Suffix shared by every elevation tile file name.
pub const TILE_FILE_SUFFIX: &str = "cor_rec.txt";

/// Known upstream tile names that do not follow the band naming scheme.
///
/// Each entry maps the computed name to the file actually published.
pub const TILE_NAME_EXCEPTIONS: &[(&str, &str)] = &[
    ("24_465cor_rec.txt", "23_465cor_rec.txt"),
    ("25_48_cor_rec.txt", "24_48_cor_rec.txt"),
];

// =============================================================================
// SURFACE CONSTANTS
// =============================================================================

/// Elevation placeholder stored on interior vertices before resolution.
pub const INTERIOR_PLACEHOLDER: f64 = 1.0;

/// Elevation placeholder stored on exterior vertices before resolution.
pub const EXTERIOR_PLACEHOLDER: f64 = 0.0;

/// Fraction of the interior elevation range the pedestal sits below the
/// lowest interior vertex.
///
/// # Example
///
/// ```rust
/// use config::constants::PEDESTAL_DEPTH_FRACTION;
///
/// let (min, max) = (100.0, 200.0);
/// let pedestal = min - PEDESTAL_DEPTH_FRACTION * (max - min);
/// assert!((pedestal - 90.0).abs() < 1e-9);
/// ```
pub const PEDESTAL_DEPTH_FRACTION: f64 = 0.1;

/// Elevation used when a surface has no interior vertices at all.
pub const FALLBACK_ELEVATION: f64 = 1.0;

// =============================================================================
// PRINT ENVELOPE CONSTANTS
// =============================================================================

/// Default planar size (longest side) of the printed model.
pub const DEFAULT_XY_TARGET: f64 = 19.0;

/// Default height of the printed model.
pub const DEFAULT_Z_TARGET: f64 = 2.0;

/// Offset added to normalized x and y so the model sits inside the bed margin.
pub const XY_MARGIN: f64 = 1.0;

/// Offset added to normalized z.
pub const Z_OFFSET: f64 = 0.0;

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Size of the binary STL header in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of one binary STL facet record (normal + 3 vertices + attribute).
pub const STL_FACET_SIZE: usize = 50;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Upper bound on the triangle count of one grid.
///
/// A base of 0.01 over the 20 × 20 frame is about 11 million triangles and
/// is rejected.
pub const MAX_TRIANGLES: usize = 10_000_000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// True if `a` and `b` differ by less than [`EPSILON`].
///
/// Used to read tag placeholders back from persisted surfaces.
///
/// ```rust
/// use config::constants::{approx_equal, INTERIOR_PLACEHOLDER};
///
/// assert!(approx_equal(INTERIOR_PLACEHOLDER, 1.0 + 1e-11));
/// assert!(!approx_equal(INTERIOR_PLACEHOLDER, 0.0));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
