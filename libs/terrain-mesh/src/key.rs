//! Structured vertex key used to deduplicate shared tessellation vertices.

use config::constants::VERTEX_KEY_SCALE;
use glam::DVec2;

/// A planar coordinate quantized to a fixed integer grid.
///
/// Two points map to the same key only if both ordinates round to the same
/// multiple of `1 / VERTEX_KEY_SCALE`. Keys order by x, then y.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use terrain_mesh::VertexKey;
///
/// // A naive text key would join "12" + "3" and "1" + "23" to the same string.
/// assert_ne!(VertexKey::new(DVec2::new(12.0, 3.0)), VertexKey::new(DVec2::new(1.0, 23.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey {
    x: i64,
    y: i64,
}

impl VertexKey {
    /// Quantizes a planar point.
    pub fn new(p: DVec2) -> Self {
        Self {
            x: quantize(p.x),
            y: quantize(p.y),
        }
    }
}

#[inline]
fn quantize(value: f64) -> i64 {
    (value * VERTEX_KEY_SCALE).round() as i64
}
