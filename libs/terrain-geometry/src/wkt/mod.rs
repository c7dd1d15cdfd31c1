//! # WKT Boundary Reader
//!
//! Reads region boundaries from well-known text. Only `POLYGON` and
//! `MULTIPOLYGON` are accepted; an optional `SRID=<id>;` prefix is stripped
//! first. Z and M ordinates are accepted and dropped.
//!
//! ## Example
//!
//! ```rust
//! use terrain_geometry::wkt::parse_boundary;
//!
//! let polygon = parse_boundary("SRID=4326;POLYGON((0 0,1 0,1 1,0 1,0 0))").unwrap();
//! assert_eq!(polygon.vertex_count(), 4);
//! ```

mod cursor;
mod srid;

pub use srid::{extract_srid, strip_srid, with_srid};

use glam::DVec2;
use tracing::debug;

use crate::error::{GeometryError, GeometryResult};
use crate::polygon::Polygon;
use crate::region::Region;
use cursor::Cursor;

/// Parses boundary text into a [`Region`].
pub fn parse_region(text: &str) -> GeometryResult<Region> {
    let body = strip_srid(text);
    let mut cursor = Cursor::new(body);

    let keyword = cursor.keyword()?;
    skip_dimension_tag(&mut cursor)?;
    let region = match keyword.as_str() {
        "POLYGON" => Region::Single(polygon_text(&mut cursor)?),
        "MULTIPOLYGON" => Region::Multi(multipolygon_text(&mut cursor)?),
        other => {
            return Err(GeometryError::malformed(
                format!("expected POLYGON or MULTIPOLYGON, found {}", other),
                0,
            ))
        }
    };

    if !cursor.is_eof() {
        return Err(cursor.error("unexpected trailing content"));
    }
    debug!(polygons = region.polygon_count(), "parsed boundary");
    Ok(region)
}

/// Parses boundary text and keeps its first polygon.
pub fn parse_boundary(text: &str) -> GeometryResult<Polygon> {
    parse_region(text)?.into_first()
}

fn skip_dimension_tag(cursor: &mut Cursor<'_>) -> GeometryResult<()> {
    if cursor.at_keyword() {
        let offset = cursor.offset();
        let tag = cursor.keyword()?;
        match tag.as_str() {
            "Z" | "M" | "ZM" => {}
            "EMPTY" => return Err(GeometryError::malformed("empty geometry", offset)),
            other => {
                return Err(GeometryError::malformed(
                    format!("unexpected keyword {}", other),
                    offset,
                ))
            }
        }
    }
    Ok(())
}

fn multipolygon_text(cursor: &mut Cursor<'_>) -> GeometryResult<Vec<Polygon>> {
    cursor.expect('(')?;
    let mut polygons = vec![polygon_text(cursor)?];
    while cursor.eat(',') {
        polygons.push(polygon_text(cursor)?);
    }
    cursor.expect(')')?;
    Ok(polygons)
}

fn polygon_text(cursor: &mut Cursor<'_>) -> GeometryResult<Polygon> {
    if cursor.at_keyword() {
        let offset = cursor.offset();
        let word = cursor.keyword()?;
        let message = if word == "EMPTY" {
            "empty polygon".to_string()
        } else {
            format!("unexpected keyword {}", word)
        };
        return Err(GeometryError::malformed(message, offset));
    }

    let start = cursor.offset();
    cursor.expect('(')?;
    let exterior = ring_text(cursor)?;
    let mut interiors = Vec::new();
    while cursor.eat(',') {
        interiors.push(ring_text(cursor)?);
    }
    cursor.expect(')')?;

    Polygon::new(exterior, interiors).map_err(|e| GeometryError::malformed(e.to_string(), start))
}

fn ring_text(cursor: &mut Cursor<'_>) -> GeometryResult<Vec<DVec2>> {
    cursor.expect('(')?;
    let mut points = vec![point(cursor)?];
    while cursor.eat(',') {
        points.push(point(cursor)?);
    }
    cursor.expect(')')?;
    Ok(points)
}

fn point(cursor: &mut Cursor<'_>) -> GeometryResult<DVec2> {
    let x = cursor.number()?;
    let y = cursor.number()?;
    // Optional Z and M ordinates
    for _ in 0..2 {
        if cursor.at_number() {
            cursor.number()?;
        }
    }
    Ok(DVec2::new(x, y))
}
