//! # Mesh Persistence
//!
//! Meshes are stored as a JSON array of GeoJSON-style polygon records:
//!
//! ```text
//! [
//!   {"type": "Polygon", "coordinates": [[[x, y, z], ...], [[x, y, z], ...]]},
//!   ...
//! ]
//! ```
//!
//! The first ring of each record is the exterior, the rest are holes. Points
//! carry two or three ordinates depending on the mesh. Values are written with
//! shortest round-trip formatting, so `load(save(mesh))` is lossless.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::mesh::Mesh;
use crate::polygon::{Polygon, RingPoint};

const POLYGON_TYPE: &str = "Polygon";

/// A point type that can be written to and read from a coordinate array.
pub trait RecordPoint: RingPoint {
    /// Coordinate array for this point.
    fn to_coords(&self) -> Vec<f64>;

    /// Rebuilds a point, `None` if the arity is wrong.
    fn from_coords(coords: &[f64]) -> Option<Self>;
}

impl RecordPoint for DVec2 {
    fn to_coords(&self) -> Vec<f64> {
        vec![self.x, self.y]
    }

    fn from_coords(coords: &[f64]) -> Option<Self> {
        match coords {
            [x, y] => Some(DVec2::new(*x, *y)),
            _ => None,
        }
    }
}

impl RecordPoint for DVec3 {
    fn to_coords(&self) -> Vec<f64> {
        vec![self.x, self.y, self.z]
    }

    fn from_coords(coords: &[f64]) -> Option<Self> {
        match coords {
            [x, y, z] => Some(DVec3::new(*x, *y, *z)),
            _ => None,
        }
    }
}

/// On-disk polygon record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolygonRecord {
    /// Geometry type tag, always `"Polygon"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Rings of coordinate arrays.
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

impl PolygonRecord {
    /// Builds a record from a polygon.
    pub fn from_polygon<P: RecordPoint>(polygon: &Polygon<P>) -> Self {
        Self {
            kind: POLYGON_TYPE.to_string(),
            coordinates: polygon
                .rings()
                .map(|ring| ring.iter().map(RecordPoint::to_coords).collect())
                .collect(),
        }
    }

    /// Rebuilds the polygon, validating type, arity and ring closure.
    pub fn to_polygon<P: RecordPoint>(&self) -> GeometryResult<Polygon<P>> {
        if self.kind != POLYGON_TYPE {
            return Err(GeometryError::invalid_record(format!(
                "expected type {}, found {}",
                POLYGON_TYPE, self.kind
            )));
        }
        let mut rings = self
            .coordinates
            .iter()
            .map(|ring| {
                ring.iter()
                    .map(|coords| {
                        P::from_coords(coords).ok_or_else(|| {
                            GeometryError::invalid_record(format!(
                                "unexpected coordinate arity {}",
                                coords.len()
                            ))
                        })
                    })
                    .collect::<GeometryResult<Vec<P>>>()
            })
            .collect::<GeometryResult<Vec<_>>>()?;
        if rings.is_empty() {
            return Err(GeometryError::invalid_record("polygon has no rings"));
        }
        let exterior = rings.remove(0);
        Polygon::new(exterior, rings)
    }
}

/// Writes a mesh as a JSON array of polygon records.
pub fn mesh_to_writer<P: RecordPoint, W: Write>(mesh: &Mesh<P>, writer: W) -> GeometryResult<()> {
    let records: Vec<PolygonRecord> = mesh.iter().map(PolygonRecord::from_polygon).collect();
    serde_json::to_writer(writer, &records)?;
    Ok(())
}

/// Reads a mesh from a JSON array of polygon records.
pub fn mesh_from_reader<P: RecordPoint, R: Read>(reader: R) -> GeometryResult<Mesh<P>> {
    let records: Vec<PolygonRecord> = serde_json::from_reader(reader)?;
    records.iter().map(PolygonRecord::to_polygon).collect()
}

/// Saves a mesh to `path`.
///
/// # Example
///
/// ```rust,no_run
/// use terrain_geometry::grid::generate_triangle_mesh;
/// use terrain_geometry::persistence::{load_mesh, save_mesh};
/// use terrain_geometry::Mesh2;
///
/// let grid = generate_triangle_mesh(0.0, 0.0, 20.0, 20.0, 0.5).unwrap();
/// save_mesh(&grid, "grid_05.json").unwrap();
/// let loaded: Mesh2 = load_mesh("grid_05.json").unwrap();
/// assert_eq!(loaded, grid);
/// ```
pub fn save_mesh<P: RecordPoint>(mesh: &Mesh<P>, path: impl AsRef<Path>) -> GeometryResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    mesh_to_writer(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Loads a mesh saved by [`save_mesh`].
pub fn load_mesh<P: RecordPoint>(path: impl AsRef<Path>) -> GeometryResult<Mesh<P>> {
    mesh_from_reader(BufReader::new(File::open(path)?))
}

/// Saves a single polygon as one record object.
pub fn save_polygon<P: RecordPoint>(
    polygon: &Polygon<P>,
    path: impl AsRef<Path>,
) -> GeometryResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &PolygonRecord::from_polygon(polygon))?;
    writer.flush()?;
    Ok(())
}

/// Loads a single polygon saved by [`save_polygon`].
pub fn load_polygon<P: RecordPoint>(path: impl AsRef<Path>) -> GeometryResult<Polygon<P>> {
    let record: PolygonRecord = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    record.to_polygon()
}

/// Reads boundary text (WKT, optionally SRID-prefixed) from a file.
pub fn read_boundary(path: impl AsRef<Path>) -> GeometryResult<String> {
    Ok(fs::read_to_string(path)?)
}

/// Writes boundary text to a file.
pub fn write_boundary(path: impl AsRef<Path>, text: &str) -> GeometryResult<()> {
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::generate_triangle_mesh;
    use crate::Mesh3;

    #[test]
    fn test_round_trip_2d_in_memory() {
        let grid = generate_triangle_mesh(0.0, 0.0, 3.0, 3.0, 0.7).unwrap();
        let mut buffer = Vec::new();
        mesh_to_writer(&grid, &mut buffer).unwrap();
        let loaded: Mesh<DVec2> = mesh_from_reader(buffer.as_slice()).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_round_trip_3d_file() {
        let grid = generate_triangle_mesh(-46.3, -23.9, -45.1, -22.8, 0.13).unwrap();
        let lifted: Mesh3 = grid.map_points(|p| p.extend(p.x.sin() * 731.123_456_789));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surface.json");

        save_mesh(&lifted, &path).unwrap();
        let loaded: Mesh3 = load_mesh(&path).unwrap();
        assert_eq!(loaded, lifted);
    }

    #[test]
    fn test_holes_survive() {
        let poly = Polygon::new(
            vec![
                DVec2::ZERO,
                DVec2::new(10.0, 0.0),
                DVec2::new(10.0, 10.0),
                DVec2::new(0.0, 10.0),
            ],
            vec![vec![
                DVec2::new(2.0, 2.0),
                DVec2::new(4.0, 2.0),
                DVec2::new(4.0, 4.0),
            ]],
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poly.json");
        save_polygon(&poly, &path).unwrap();
        let loaded: Polygon = load_polygon(&path).unwrap();
        assert_eq!(loaded, poly);
    }

    #[test]
    fn test_record_layout() {
        let tri = Polygon::triangle(DVec2::ZERO, DVec2::X, DVec2::Y).unwrap();
        let json = serde_json::to_string(&PolygonRecord::from_polygon(&tri)).unwrap();
        assert_eq!(
            json,
            r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[1.0,0.0],[0.0,1.0],[0.0,0.0]]]}"#
        );
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let json = r#"[{"type":"Polygon","coordinates":[[[0,0,1],[1,0,1],[0,1,1],[0,0,1]]]}]"#;
        let result: GeometryResult<Mesh<DVec2>> = mesh_from_reader(json.as_bytes());
        assert!(matches!(result, Err(GeometryError::InvalidRecord(_))));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let json = r#"[{"type":"LineString","coordinates":[[[0,0],[1,0],[0,1],[0,0]]]}]"#;
        let result: GeometryResult<Mesh<DVec2>> = mesh_from_reader(json.as_bytes());
        assert!(matches!(result, Err(GeometryError::InvalidRecord(_))));
    }

    #[test]
    fn test_boundary_text_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("region.wkt");
        let text = "SRID=4326;POLYGON((0 0,1 0,1 1,0 0))";
        write_boundary(&path, text).unwrap();
        assert_eq!(read_boundary(&path).unwrap(), text);
    }
}
