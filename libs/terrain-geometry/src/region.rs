//! # Region
//!
//! A region boundary as read from WKT: either one polygon or a multipolygon.
//! Bounds, containment and ring iteration are implemented once and dispatched
//! over both variants.

use geo::Contains;
use glam::DVec2;

use crate::error::{GeometryError, GeometryResult};
use crate::polygon::{Bounds, Polygon};

/// Region boundary geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// A single polygon.
    Single(Polygon),
    /// A collection of polygons.
    Multi(Vec<Polygon>),
}

impl Region {
    /// Iterates the member polygons in order.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        let slice = match self {
            Region::Single(polygon) => std::slice::from_ref(polygon),
            Region::Multi(polygons) => polygons.as_slice(),
        };
        slice.iter()
    }

    /// Number of member polygons.
    pub fn polygon_count(&self) -> usize {
        match self {
            Region::Single(_) => 1,
            Region::Multi(polygons) => polygons.len(),
        }
    }

    /// Iterates every ring of every member polygon.
    pub fn rings(&self) -> impl Iterator<Item = &[DVec2]> {
        self.polygons().flat_map(|p| p.rings())
    }

    /// Bounds over all member polygons, `None` for an empty multipolygon.
    pub fn bounds(&self) -> Option<Bounds> {
        self.polygons()
            .map(Polygon::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// True if any member polygon strictly contains `p`.
    pub fn contains(&self, p: DVec2) -> bool {
        let point = geo::Point::new(p.x, p.y);
        self.polygons().any(|poly| poly.to_geo().contains(&point))
    }

    /// The first member polygon.
    pub fn first_polygon(&self) -> Option<&Polygon> {
        self.polygons().next()
    }

    /// Consumes the region and keeps only its first polygon.
    ///
    /// Multipolygon boundaries are reduced to their first member; the rest
    /// are discarded.
    pub fn into_first(self) -> GeometryResult<Polygon> {
        match self {
            Region::Single(polygon) => Ok(polygon),
            Region::Multi(polygons) => polygons
                .into_iter()
                .next()
                .ok_or_else(|| GeometryError::malformed("multipolygon has no members", 0)),
        }
    }

    /// Renders the region as WKT text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use terrain_geometry::wkt::parse_region;
    ///
    /// let region = parse_region("POLYGON((0 0,1 0,1 1,0 0))").unwrap();
    /// assert_eq!(region.to_wkt(), "POLYGON((0 0,1 0,1 1,0 0))");
    /// ```
    pub fn to_wkt(&self) -> String {
        match self {
            Region::Single(polygon) => format!("POLYGON{}", polygon_text(polygon)),
            Region::Multi(polygons) => {
                let members: Vec<String> = polygons.iter().map(polygon_text).collect();
                format!("MULTIPOLYGON({})", members.join(","))
            }
        }
    }
}

impl From<Polygon> for Region {
    fn from(polygon: Polygon) -> Self {
        Region::Single(polygon)
    }
}

fn polygon_text(polygon: &Polygon) -> String {
    let rings: Vec<String> = polygon
        .rings()
        .map(|ring| {
            let points: Vec<String> = ring.iter().map(|p| format!("{} {}", p.x, p.y)).collect();
            format!("({})", points.join(","))
        })
        .collect();
    format!("({})", rings.join(","))
}
