//! # Polygon
//!
//! Ring-based polygon shared by boundaries, tessellation triangles and
//! elevated surface faces.
//!
//! Every ring is stored closed: the last point repeats the first, and a ring
//! holds at least three distinct points. The point type is generic so the same
//! structure carries planar points, tagged vertices and 3D vertices.

use std::fmt::Debug;

use geo::Contains;
use glam::{DVec2, DVec3};

use crate::error::{GeometryError, GeometryResult};

// =============================================================================
// RING POINT
// =============================================================================

/// A point that can live in a polygon ring.
///
/// Only the planar projection is needed for bounds and containment.
pub trait RingPoint: Copy + PartialEq + Debug {
    /// Planar (x, y) projection of the point.
    fn xy(&self) -> DVec2;
}

impl RingPoint for DVec2 {
    #[inline]
    fn xy(&self) -> DVec2 {
        *self
    }
}

impl RingPoint for DVec3 {
    #[inline]
    fn xy(&self) -> DVec2 {
        self.truncate()
    }
}

// =============================================================================
// BOUNDS
// =============================================================================

/// Axis-aligned planar bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower-left corner
    pub min: DVec2,
    /// Upper-right corner
    pub max: DVec2,
}

impl Bounds {
    /// Creates bounds from corner coordinates.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            min: DVec2::new(x_min, y_min),
            max: DVec2::new(x_max, y_max),
        }
    }

    /// Computes the bounds of a point set, or `None` when it is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DVec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Grows the bounds to include `p`.
    pub fn include(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Merges two bounds.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Extent along x.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True if `p` lies inside or on the box.
    pub fn contains_point(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

// =============================================================================
// POLYGON
// =============================================================================

/// A polygon with one exterior ring and zero or more holes.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use terrain_geometry::Polygon;
///
/// let square = Polygon::new(
///     vec![
///         DVec2::new(0.0, 0.0),
///         DVec2::new(1.0, 0.0),
///         DVec2::new(1.0, 1.0),
///         DVec2::new(0.0, 1.0),
///     ],
///     Vec::new(),
/// )
/// .unwrap();
///
/// // Ring closure is applied on construction
/// assert_eq!(square.exterior().len(), 5);
/// assert_eq!(square.exterior()[0], square.exterior()[4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<P = DVec2> {
    exterior: Vec<P>,
    interiors: Vec<Vec<P>>,
}

impl<P: RingPoint> Polygon<P> {
    /// Creates a polygon, closing any ring that is not already closed.
    ///
    /// Fails with `InvalidRing` if a ring has fewer than three distinct points.
    pub fn new(exterior: Vec<P>, interiors: Vec<Vec<P>>) -> GeometryResult<Self> {
        let exterior = close_ring(exterior)?;
        let interiors = interiors
            .into_iter()
            .map(close_ring)
            .collect::<GeometryResult<Vec<_>>>()?;
        Ok(Self {
            exterior,
            interiors,
        })
    }

    /// Creates a ring-closed triangle from three distinct points.
    pub fn triangle(a: P, b: P, c: P) -> GeometryResult<Self> {
        Self::new(vec![a, b, c], Vec::new())
    }

    /// The closed exterior ring.
    #[inline]
    pub fn exterior(&self) -> &[P] {
        &self.exterior
    }

    /// The closed interior rings (holes).
    #[inline]
    pub fn interiors(&self) -> &[Vec<P>] {
        &self.interiors
    }

    /// Exterior ring without its closing duplicate.
    #[inline]
    pub fn open_exterior(&self) -> &[P] {
        &self.exterior[..self.exterior.len() - 1]
    }

    /// Iterates the exterior ring followed by every hole.
    pub fn rings(&self) -> impl Iterator<Item = &[P]> {
        std::iter::once(self.exterior.as_slice()).chain(self.interiors.iter().map(Vec::as_slice))
    }

    /// Number of distinct exterior vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.exterior.len() - 1
    }

    /// Planar bounds of the exterior ring.
    pub fn bounds(&self) -> Bounds {
        let first = self.exterior[0].xy();
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for p in &self.exterior[1..] {
            bounds.include(p.xy());
        }
        bounds
    }

    /// Maps every point into a new polygon with the same ring structure.
    ///
    /// The closing point is recomputed from the mapped first point, so the
    /// result is always ring-closed.
    pub fn map<Q, F>(&self, mut f: F) -> Polygon<Q>
    where
        Q: RingPoint,
        F: FnMut(&P) -> Q,
    {
        Polygon {
            exterior: map_ring(&self.exterior, &mut f),
            interiors: self
                .interiors
                .iter()
                .map(|ring| map_ring(ring, &mut f))
                .collect(),
        }
    }

    /// Fallible variant of [`Polygon::map`].
    pub fn try_map<Q, E, F>(&self, mut f: F) -> Result<Polygon<Q>, E>
    where
        Q: RingPoint,
        F: FnMut(&P) -> Result<Q, E>,
    {
        let exterior = try_map_ring(&self.exterior, &mut f)?;
        let interiors = self
            .interiors
            .iter()
            .map(|ring| try_map_ring(ring, &mut f))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Polygon {
            exterior,
            interiors,
        })
    }
}

impl Polygon<DVec2> {
    /// Unsigned area of the exterior minus the holes.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.interiors.iter().map(|r| ring_signed_area(r).abs()).sum();
        ring_signed_area(&self.exterior).abs() - holes
    }

    /// Converts to a `geo` polygon for spatial predicates.
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        geo::Polygon::new(
            to_line_string(&self.exterior),
            self.interiors.iter().map(|r| to_line_string(r)).collect(),
        )
    }

    /// True if `p` lies strictly inside the polygon (boundary excluded).
    ///
    /// Repeated tests against the same polygon should convert once with
    /// [`Polygon::to_geo`] instead.
    pub fn contains(&self, p: DVec2) -> bool {
        self.to_geo().contains(&geo::Point::new(p.x, p.y))
    }
}

// =============================================================================
// RING HELPERS
// =============================================================================

fn close_ring<P: RingPoint>(mut ring: Vec<P>) -> GeometryResult<Vec<P>> {
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
        if first != last {
            ring.push(first);
        }
    }
    if ring.len() < 4 {
        return Err(GeometryError::invalid_ring(format!(
            "ring needs at least 4 points including closure, got {}",
            ring.len()
        )));
    }
    if !has_three_distinct(&ring) {
        return Err(GeometryError::invalid_ring(
            "ring needs at least 3 distinct points",
        ));
    }
    Ok(ring)
}

fn has_three_distinct<P: RingPoint>(ring: &[P]) -> bool {
    let a = ring[0];
    let Some(b) = ring.iter().copied().find(|p| *p != a) else {
        return false;
    };
    ring.iter().any(|p| *p != a && *p != b)
}

fn map_ring<P, Q, F>(ring: &[P], f: &mut F) -> Vec<Q>
where
    P: RingPoint,
    Q: RingPoint,
    F: FnMut(&P) -> Q,
{
    let mut mapped: Vec<Q> = ring[..ring.len() - 1].iter().map(|p| f(p)).collect();
    mapped.push(mapped[0]);
    mapped
}

fn try_map_ring<P, Q, E, F>(ring: &[P], f: &mut F) -> Result<Vec<Q>, E>
where
    P: RingPoint,
    Q: RingPoint,
    F: FnMut(&P) -> Result<Q, E>,
{
    let mut mapped = Vec::with_capacity(ring.len());
    for p in &ring[..ring.len() - 1] {
        mapped.push(f(p)?);
    }
    mapped.push(mapped[0]);
    Ok(mapped)
}

fn ring_signed_area(ring: &[DVec2]) -> f64 {
    ring.windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum::<f64>()
        / 2.0
}

fn to_line_string(ring: &[DVec2]) -> geo::LineString<f64> {
    geo::LineString::from(ring.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>())
}

#[cfg(test)]
mod tests;
