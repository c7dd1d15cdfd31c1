//! # Grid Mesher
//!
//! Uniform triangular tessellation of a rectangle.
//!
//! The rectangle is cut into rows of height `triangle_base * height_ratio`
//! and columns of width `triangle_base`. Each cell is split into two
//! triangles. The diagonal alternates between neighbouring cells, so the
//! leading triangle of each row flips orientation from one row to the next.
//! A partial last row or column is closed with cells sized to the remaining
//! span, which makes the triangles cover the rectangle exactly.
//!
//! All stops are computed as offsets from the rectangle's lower corner; a
//! translated rectangle yields a translated, topologically identical mesh.

use config::constants::{MAX_TRIANGLES, TRIANGLE_HEIGHT_RATIO};
use glam::DVec2;
use tracing::debug;

use crate::error::{GeometryError, GeometryResult};
use crate::mesh::Mesh;
use crate::polygon::{Bounds, Polygon};

/// Relative slack used when deciding whether a trailing partial cell exists.
const STOP_SLACK: f64 = 1e-6;

/// Tessellation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMesher {
    triangle_base: f64,
    height_ratio: f64,
}

impl GridMesher {
    /// Creates a mesher with the default height ratio.
    pub fn new(triangle_base: f64) -> Self {
        Self {
            triangle_base,
            height_ratio: TRIANGLE_HEIGHT_RATIO,
        }
    }

    /// Overrides the height-to-base ratio.
    pub fn with_height_ratio(mut self, height_ratio: f64) -> Self {
        self.height_ratio = height_ratio;
        self
    }

    /// Triangle base (cell width).
    pub fn triangle_base(&self) -> f64 {
        self.triangle_base
    }

    /// Triangle height (row height).
    pub fn triangle_height(&self) -> f64 {
        self.triangle_base * self.height_ratio
    }

    /// Tessellates the rectangle described by `bounds`.
    ///
    /// Fails with `InvalidDimensions` if the base or height is not positive,
    /// the rectangle has no area, or the triangle count would exceed
    /// `MAX_TRIANGLES`.
    pub fn generate(&self, bounds: &Bounds) -> GeometryResult<Mesh> {
        let base = self.triangle_base;
        let height = self.triangle_height();
        if !(is_positive_finite(base) && is_positive_finite(height)) {
            return Err(GeometryError::invalid_dimensions(format!(
                "triangle base and height must be positive and finite, got {} and {}",
                base, height
            )));
        }
        let (width, span) = (bounds.width(), bounds.height());
        if !(bounds.min.is_finite() && is_positive_finite(width) && is_positive_finite(span)) {
            return Err(GeometryError::invalid_dimensions(format!(
                "rectangle must have finite positive extent, got {} x {}",
                width, span
            )));
        }

        let columns = stop_count(width, base);
        let rows = stop_count(span, height);
        let triangle_count = 2.0 * columns * rows;
        if triangle_count > MAX_TRIANGLES as f64 {
            return Err(GeometryError::invalid_dimensions(format!(
                "tessellation would produce {} triangles (max: {})",
                triangle_count, MAX_TRIANGLES
            )));
        }

        let xs = axis_stops(width, base, columns as usize);
        let ys = axis_stops(span, height, rows as usize);
        let origin = bounds.min;
        let mut mesh = Mesh::with_capacity(triangle_count as usize);

        for (j, row) in ys.windows(2).enumerate() {
            for (i, col) in xs.windows(2).enumerate() {
                let a = origin + DVec2::new(col[0], row[0]);
                let b = origin + DVec2::new(col[1], row[0]);
                let c = origin + DVec2::new(col[1], row[1]);
                let d = origin + DVec2::new(col[0], row[1]);

                if (i + j) % 2 == 0 {
                    mesh.push(Polygon::triangle(a, b, c)?);
                    mesh.push(Polygon::triangle(a, c, d)?);
                } else {
                    mesh.push(Polygon::triangle(a, b, d)?);
                    mesh.push(Polygon::triangle(b, c, d)?);
                }
            }
        }

        debug!(
            columns = xs.len() - 1,
            rows = ys.len() - 1,
            triangles = mesh.len(),
            "generated grid tessellation"
        );
        Ok(mesh)
    }
}

/// Tessellates `[x_min, x_max] × [y_min, y_max]` with the default height ratio.
///
/// # Example
///
/// ```rust
/// use terrain_geometry::grid::generate_triangle_mesh;
///
/// let mesh = generate_triangle_mesh(0.0, 0.0, 2.0, 2.0, 1.0).unwrap();
/// assert_eq!(mesh.len() % 2, 0);
/// assert!((mesh.area() - 4.0).abs() < 1e-9);
/// ```
pub fn generate_triangle_mesh(
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
    triangle_base: f64,
) -> GeometryResult<Mesh> {
    GridMesher::new(triangle_base).generate(&Bounds::new(x_min, y_min, x_max, y_max))
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Number of cells needed to cover `extent` with steps of `step`.
fn stop_count(extent: f64, step: f64) -> f64 {
    (extent / step - STOP_SLACK).ceil().max(1.0)
}

/// Cell boundaries along one axis, as offsets from the lower corner.
fn axis_stops(extent: f64, step: f64, cells: usize) -> Vec<f64> {
    let mut stops: Vec<f64> = (0..cells).map(|k| k as f64 * step).collect();
    stops.push(extent);
    stops
}
