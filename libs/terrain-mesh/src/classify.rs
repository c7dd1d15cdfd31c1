//! # Surface Classifier
//!
//! Tags every tessellation vertex as inside or outside the boundary.
//!
//! Faces are filtered ring by ring. A vertex outside the boundary survives
//! only when exterior geometry is requested. A ring left with fewer than
//! three vertices is dropped: an exterior ring takes its face with it, a hole
//! just disappears. Surviving rings are re-closed.
//!
//! Containment excludes the boundary itself, so a vertex lying exactly on the
//! boundary is exterior.

use std::collections::HashMap;

use config::constants::{approx_equal, EXTERIOR_PLACEHOLDER, INTERIOR_PLACEHOLDER};
use geo::Contains;
use glam::{DVec2, DVec3};
use terrain_geometry::{Mesh, Mesh2, Mesh3, Polygon, RingPoint};
use tracing::debug;

use crate::key::VertexKey;

// =============================================================================
// TAGGED VERTICES
// =============================================================================

/// Position of a vertex relative to the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexTag {
    /// Strictly inside the boundary
    Interior,
    /// Outside or on the boundary
    Exterior,
}

impl VertexTag {
    /// Elevation placeholder stored before real elevations are resolved.
    pub fn placeholder(self) -> f64 {
        match self {
            VertexTag::Interior => INTERIOR_PLACEHOLDER,
            VertexTag::Exterior => EXTERIOR_PLACEHOLDER,
        }
    }
}

/// A planar vertex with its classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaggedVertex {
    /// Position in region coordinates (x = longitude, y = latitude)
    pub position: DVec2,
    /// Classification
    pub tag: VertexTag,
}

impl RingPoint for TaggedVertex {
    #[inline]
    fn xy(&self) -> DVec2 {
        self.position
    }
}

/// A classified surface.
pub type TaggedMesh = Mesh<TaggedVertex>;

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Classifies tessellation vertices against one boundary polygon.
///
/// Containment results are memoized per vertex, since adjacent faces share
/// most of their vertices.
#[derive(Debug)]
pub struct SurfaceClassifier {
    boundary: geo::Polygon<f64>,
    include_exterior: bool,
    memo: HashMap<VertexKey, VertexTag>,
}

impl SurfaceClassifier {
    /// Creates a classifier for `boundary`.
    pub fn new(boundary: &Polygon, include_exterior: bool) -> Self {
        Self {
            boundary: boundary.to_geo(),
            include_exterior,
            memo: HashMap::new(),
        }
    }

    /// Tag for a single point.
    pub fn tag(&mut self, p: DVec2) -> VertexTag {
        let boundary = &self.boundary;
        *self.memo.entry(VertexKey::new(p)).or_insert_with(|| {
            if boundary.contains(&geo::Point::new(p.x, p.y)) {
                VertexTag::Interior
            } else {
                VertexTag::Exterior
            }
        })
    }

    /// Classifies every face of `grid`, dropping faces that thin out.
    pub fn classify(&mut self, grid: &Mesh2) -> TaggedMesh {
        let mut dropped = 0usize;
        let mut mesh = Mesh::with_capacity(grid.len());
        for face in grid {
            match self.classify_face(face) {
                Some(tagged) => mesh.push(tagged),
                None => dropped += 1,
            }
        }
        debug!(
            kept = mesh.len(),
            dropped,
            include_exterior = self.include_exterior,
            "classified surface"
        );
        mesh
    }

    fn classify_face(&mut self, face: &Polygon) -> Option<Polygon<TaggedVertex>> {
        let exterior = self.filter_ring(face.exterior())?;
        let holes: Vec<Vec<TaggedVertex>> = face
            .interiors()
            .iter()
            .filter_map(|ring| self.filter_ring(ring))
            .collect();
        Polygon::new(exterior, holes).ok()
    }

    /// Filters a closed ring down to kept vertices, `None` if fewer than three
    /// remain. The returned ring is open; `Polygon::new` re-closes it.
    fn filter_ring(&mut self, ring: &[DVec2]) -> Option<Vec<TaggedVertex>> {
        let include_exterior = self.include_exterior;
        let open = &ring[..ring.len().saturating_sub(1)];
        let kept: Vec<TaggedVertex> = open
            .iter()
            .map(|&position| TaggedVertex {
                position,
                tag: self.tag(position),
            })
            .filter(|v| include_exterior || v.tag == VertexTag::Interior)
            .collect();
        (kept.len() >= 3).then_some(kept)
    }
}

/// Classifies `grid` against `boundary` in one call.
///
/// # Example
///
/// ```rust
/// use terrain_geometry::{grid::generate_triangle_mesh, wkt::parse_boundary};
/// use terrain_mesh::classify::classify;
///
/// let boundary = parse_boundary("POLYGON((0 0,10 0,10 10,0 10,0 0))").unwrap();
/// let grid = generate_triangle_mesh(-2.0, -2.0, 12.0, 12.0, 1.0).unwrap();
///
/// let with_exterior = classify(&boundary, &grid, true);
/// let interior_only = classify(&boundary, &grid, false);
/// assert_eq!(with_exterior.len(), grid.len());
/// assert!(interior_only.len() < grid.len());
/// ```
pub fn classify(boundary: &Polygon, grid: &Mesh2, include_exterior: bool) -> TaggedMesh {
    SurfaceClassifier::new(boundary, include_exterior).classify(grid)
}

/// Lifts a classified surface to 3D using the tag placeholders as z.
pub fn flatten(mesh: &TaggedMesh) -> Mesh3 {
    mesh.map_points(|v| v.position.extend(v.tag.placeholder()))
}

/// Reads tags back from a flattened surface (z = 1 interior, anything else exterior).
pub fn unflatten(mesh: &Mesh3) -> TaggedMesh {
    mesh.map_points(|p: &DVec3| TaggedVertex {
        position: p.truncate(),
        tag: if approx_equal(p.z, INTERIOR_PLACEHOLDER) {
            VertexTag::Interior
        } else {
            VertexTag::Exterior
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 0.0),
                DVec2::new(10.0, 10.0),
                DVec2::new(0.0, 10.0),
            ],
            Vec::new(),
        )
        .unwrap()
    }

    fn tri(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Polygon {
        Polygon::triangle(
            DVec2::new(a.0, a.1),
            DVec2::new(b.0, b.1),
            DVec2::new(c.0, c.1),
        )
        .unwrap()
    }

    #[test]
    fn test_interior_and_exterior_tags() {
        let mut classifier = SurfaceClassifier::new(&square(), true);
        assert_eq!(classifier.tag(DVec2::new(5.0, 5.0)), VertexTag::Interior);
        assert_eq!(classifier.tag(DVec2::new(-1.0, -1.0)), VertexTag::Exterior);
        // On the boundary counts as outside
        assert_eq!(classifier.tag(DVec2::new(0.0, 5.0)), VertexTag::Exterior);
    }

    #[test]
    fn test_exterior_vertex_only_kept_when_requested() {
        let grid: Mesh2 = vec![tri((5.0, 5.0), (-1.0, -1.0), (6.0, 4.0))]
            .into_iter()
            .collect();

        let with = classify(&square(), &grid, true);
        assert_eq!(with.len(), 1);
        let tags: Vec<VertexTag> = with.faces()[0].open_exterior().iter().map(|v| v.tag).collect();
        assert_eq!(
            tags,
            vec![VertexTag::Interior, VertexTag::Exterior, VertexTag::Interior]
        );

        // Two interior vertices are not enough for a face
        let without = classify(&square(), &grid, false);
        assert!(without.is_empty());
    }

    #[test]
    fn test_outside_faces() {
        let grid: Mesh2 = vec![
            tri((4.0, 4.0), (5.0, 5.0), (6.0, 4.0)),
            tri((-3.0, -3.0), (-2.0, -3.0), (-1.0, -1.0)),
        ]
        .into_iter()
        .collect();

        let without = classify(&square(), &grid, false);
        assert_eq!(without.len(), 1);
        assert_eq!(without.faces()[0].exterior().len(), 4);

        let with = classify(&square(), &grid, true);
        assert_eq!(with.len(), 2);
        assert!(with.faces()[1]
            .open_exterior()
            .iter()
            .all(|v| v.tag == VertexTag::Exterior));
    }

    #[test]
    fn test_holes_filtered_independently() {
        let face = Polygon::new(
            vec![
                DVec2::new(1.0, 1.0),
                DVec2::new(9.0, 1.0),
                DVec2::new(9.0, 9.0),
                DVec2::new(1.0, 9.0),
            ],
            vec![
                vec![DVec2::new(2.0, 2.0), DVec2::new(3.0, 2.0), DVec2::new(3.0, 3.0)],
                vec![DVec2::new(8.0, 8.0), DVec2::new(12.0, 8.0), DVec2::new(12.0, 12.0)],
            ],
        )
        .unwrap();
        let grid: Mesh2 = vec![face].into_iter().collect();

        let without = classify(&square(), &grid, false);
        assert_eq!(without.len(), 1);
        assert_eq!(without.faces()[0].interiors().len(), 1);

        let with = classify(&square(), &grid, true);
        assert_eq!(with.faces()[0].interiors().len(), 2);
    }

    #[test]
    fn test_flatten_placeholders() {
        let grid: Mesh2 = vec![tri((5.0, 5.0), (-1.0, -1.0), (6.0, 4.0))]
            .into_iter()
            .collect();
        let tagged = classify(&square(), &grid, true);
        let flat = flatten(&tagged);
        let z: Vec<f64> = flat.faces()[0].exterior().iter().map(|p| p.z).collect();
        assert_eq!(z, vec![1.0, 0.0, 1.0, 1.0]);
        assert_eq!(unflatten(&flat), tagged);
    }
}
