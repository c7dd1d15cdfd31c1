//! # Binary STL Export
//!
//! Binary STL layout:
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count
//! end
//! ```
//!
//! Each face is fanned from its first exterior vertex. Surface faces are
//! triangles, so this emits one facet per face; a non-convex face would come
//! out wrong but does not fail. Holes are not exported. Normals are written as
//! the zero vector; slicers recompute them from winding.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use config::constants::{STL_FACET_SIZE, STL_HEADER_SIZE};
use glam::DVec3;
use terrain_geometry::{Mesh3, Polygon};
use tracing::info;

use crate::error::{TerrainError, TerrainResult};

const HEADER_TEXT: &[u8] = b"Binary STL terrain surface";

/// Fan triangulation of a face's exterior ring.
///
/// For a closed ring `c0 .. cn` (with `cn == c0`) this yields
/// `(c0, ci, ci+1)` for `i` in `1 .. n-1`.
pub fn fan(face: &Polygon<DVec3>) -> impl Iterator<Item = [DVec3; 3]> + '_ {
    let ring = face.open_exterior();
    (1..ring.len().saturating_sub(1)).map(move |i| [ring[0], ring[i], ring[i + 1]])
}

/// Number of facets [`write_stl`] will emit for `mesh`.
pub fn facet_count(mesh: &Mesh3) -> usize {
    mesh.iter().map(|face| face.vertex_count().saturating_sub(2)).sum()
}

/// Size in bytes of the binary STL for `mesh`.
pub fn encoded_len(mesh: &Mesh3) -> usize {
    STL_HEADER_SIZE + 4 + facet_count(mesh) * STL_FACET_SIZE
}

/// Binary STL writer with a configurable header.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use terrain_geometry::{Mesh3, Polygon};
/// use terrain_mesh::stl::MeshExporter;
///
/// let face = Polygon::triangle(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
/// let mesh: Mesh3 = vec![face].into_iter().collect();
///
/// let mut bytes = Vec::new();
/// let facets = MeshExporter::new().with_header("saopaulo_city").export(&mesh, &mut bytes).unwrap();
/// assert_eq!(facets, 1);
/// assert_eq!(bytes.len(), 80 + 4 + 50);
/// assert!(bytes.starts_with(b"saopaulo_city"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshExporter {
    header: [u8; STL_HEADER_SIZE],
}

impl Default for MeshExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshExporter {
    /// Exporter with the default header.
    pub fn new() -> Self {
        Self {
            header: padded_header(HEADER_TEXT),
        }
    }

    /// Replaces the header text. Text past 80 bytes is cut off.
    pub fn with_header(mut self, text: &str) -> Self {
        self.header = padded_header(text.as_bytes());
        self
    }

    /// The 80-byte header as written.
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Writes `mesh` as binary STL, returning the facet count.
    pub fn export<W: Write>(&self, mesh: &Mesh3, mut writer: W) -> TerrainResult<usize> {
        let count = facet_count(mesh);
        let count_field = u32::try_from(count).map_err(|_| {
            TerrainError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} facets exceed the binary STL limit", count),
            ))
        })?;

        writer.write_all(&self.header)?;
        writer.write_all(&count_field.to_le_bytes())?;

        for face in mesh {
            for triangle in fan(face) {
                write_vector(&mut writer, DVec3::ZERO)?;
                for vertex in triangle {
                    write_vector(&mut writer, vertex)?;
                }
                writer.write_all(&0u16.to_le_bytes())?;
            }
        }
        Ok(count)
    }

    /// Writes `mesh` as binary STL to `path`, returning the facet count.
    pub fn save(&self, mesh: &Mesh3, path: impl AsRef<Path>) -> TerrainResult<usize> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        let count = self.export(mesh, &mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), facets = count, "Wrote STL");
        Ok(count)
    }
}

/// Writes `mesh` as binary STL with the default header.
pub fn write_stl<W: Write>(mesh: &Mesh3, writer: W) -> TerrainResult<usize> {
    MeshExporter::new().export(mesh, writer)
}

/// Writes `mesh` as binary STL to `path` with the default header.
pub fn save_stl(mesh: &Mesh3, path: impl AsRef<Path>) -> TerrainResult<usize> {
    MeshExporter::new().save(mesh, path)
}

fn padded_header(text: &[u8]) -> [u8; STL_HEADER_SIZE] {
    let mut header = [b' '; STL_HEADER_SIZE];
    let len = text.len().min(STL_HEADER_SIZE);
    header[..len].copy_from_slice(&text[..len]);
    header
}

fn write_vector<W: Write>(writer: &mut W, v: DVec3) -> TerrainResult<()> {
    // STL stores single precision
    #[allow(clippy::cast_possible_truncation)]
    for value in [v.x as f32, v.y as f32, v.z as f32] {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}
