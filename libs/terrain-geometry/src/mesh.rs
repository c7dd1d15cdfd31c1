//! # Mesh Data Structure
//!
//! Ordered collection of ring-based polygon faces. Faces keep their insertion
//! order so serialization is reproducible.

use glam::{DVec2, DVec3};

use crate::polygon::{Bounds, Polygon, RingPoint};

/// An ordered list of polygon faces.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use terrain_geometry::{Mesh, Polygon};
///
/// let mut mesh = Mesh::new();
/// mesh.push(Polygon::triangle(DVec2::ZERO, DVec2::X, DVec2::Y).unwrap());
/// assert_eq!(mesh.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<P = DVec2> {
    faces: Vec<Polygon<P>>,
}

/// Planar mesh (tessellation in frame or region coordinates).
pub type Mesh2 = Mesh<DVec2>;

/// Elevated mesh.
pub type Mesh3 = Mesh<DVec3>;

impl<P> Default for Mesh<P> {
    fn default() -> Self {
        Self { faces: Vec::new() }
    }
}

impl<P: RingPoint> Mesh<P> {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated face capacity.
    pub fn with_capacity(face_count: usize) -> Self {
        Self {
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Appends a face.
    pub fn push(&mut self, face: Polygon<P>) {
        self.faces.push(face);
    }

    /// Number of faces.
    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The faces in insertion order.
    #[inline]
    pub fn faces(&self) -> &[Polygon<P>] {
        &self.faces
    }

    /// Iterates the faces.
    pub fn iter(&self) -> std::slice::Iter<'_, Polygon<P>> {
        self.faces.iter()
    }

    /// Consumes the mesh, returning its faces.
    pub fn into_faces(self) -> Vec<Polygon<P>> {
        self.faces
    }

    /// Iterates every stored ring point, closing duplicates included.
    pub fn points(&self) -> impl Iterator<Item = &P> {
        self.faces
            .iter()
            .flat_map(|face| face.rings().flat_map(|ring| ring.iter()))
    }

    /// Planar bounds over all faces, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points().map(RingPoint::xy))
    }

    /// Maps every point, keeping face order and ring structure.
    pub fn map_points<Q, F>(&self, mut f: F) -> Mesh<Q>
    where
        Q: RingPoint,
        F: FnMut(&P) -> Q,
    {
        Mesh {
            faces: self.faces.iter().map(|face| face.map(&mut f)).collect(),
        }
    }

    /// Fallible variant of [`Mesh::map_points`].
    pub fn try_map_points<Q, E, F>(&self, mut f: F) -> Result<Mesh<Q>, E>
    where
        Q: RingPoint,
        F: FnMut(&P) -> Result<Q, E>,
    {
        let faces = self
            .faces
            .iter()
            .map(|face| face.try_map(&mut f))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Mesh { faces })
    }
}

impl Mesh<DVec2> {
    /// Sum of face areas.
    pub fn area(&self) -> f64 {
        self.faces.iter().map(Polygon::area).sum()
    }
}

impl Mesh<DVec3> {
    /// Computes the axis-aligned bounding box over every vertex.
    ///
    /// Returns (min, max) corners, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let mut points = self.points();
        let first = *points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))))
    }
}

impl<P: RingPoint> FromIterator<Polygon<P>> for Mesh<P> {
    fn from_iter<I: IntoIterator<Item = Polygon<P>>>(iter: I) -> Self {
        Self {
            faces: iter.into_iter().collect(),
        }
    }
}

impl<'a, P> IntoIterator for &'a Mesh<P> {
    type Item = &'a Polygon<P>;
    type IntoIter = std::slice::Iter<'a, Polygon<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter()
    }
}
