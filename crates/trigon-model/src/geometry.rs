use crate::config::NormalSource;
use crate::scene::Triangle;

pub const POSITION_FLOATS_PER_TRIANGLE: usize = 9;
pub const NORMAL_FLOATS_PER_TRIANGLE: usize = 9;
pub const COLOR_FLOATS_PER_TRIANGLE: usize = 12;

/// Flattened, GPU-ready scene buffers.
///
/// The three sequences are index-aligned per vertex: vertex `i` owns
/// `positions[3i..3i+3]`, `normals[3i..3i+3]` and `colors[4i..4i+4]`.
///
/// Invariant: for `n = triangle_count()`, the buffers hold exactly `9n`, `9n`
/// and `12n` floats. Fields are private so the invariant holds for every
/// value callers can observe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGeometry {
    positions: Vec<f32>,
    normals: Vec<f32>,
    colors: Vec<f32>,
    triangle_count: usize,
}

impl SceneGeometry {
    pub(crate) fn with_capacity(triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangles * POSITION_FLOATS_PER_TRIANGLE),
            normals: Vec::with_capacity(triangles * NORMAL_FLOATS_PER_TRIANGLE),
            colors: Vec::with_capacity(triangles * COLOR_FLOATS_PER_TRIANGLE),
            triangle_count: 0,
        }
    }

    /// Appends one triangle. `colors[k]` is the resolved color of vertex `k`.
    pub(crate) fn push_triangle(
        &mut self,
        triangle: &Triangle,
        colors: [[f32; 4]; 3],
        normals: NormalSource,
    ) {
        for k in 0..3 {
            self.positions.extend_from_slice(&triangle.vertices[k]);
            let normal = match normals {
                NormalSource::PerVertex => triangle.normals[k],
                NormalSource::Face => triangle.face_normal,
            };
            self.normals.extend_from_slice(&normal);
            self.colors.extend_from_slice(&colors[k]);
        }
        self.triangle_count += 1;
    }

    /// Vertex positions, `xyz` per vertex.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Vertex normals, `xyz` per vertex.
    #[inline]
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Vertex colors, normalized `rgba` per vertex.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Number of vertices a draw call covers: `3 * triangle_count`.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.triangle_count * 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> Triangle {
        Triangle {
            vertices: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
            face_normal: [0.0, 0.0, -1.0],
            material: [0, 0, 0],
        }
    }

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

    #[test]
    fn push_keeps_buffers_aligned() {
        let mut g = SceneGeometry::with_capacity(2);
        g.push_triangle(&tri(), [RED; 3], NormalSource::PerVertex);
        g.push_triangle(&tri(), [BLUE; 3], NormalSource::PerVertex);
        assert_eq!(g.triangle_count(), 2);
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.positions().len(), 18);
        assert_eq!(g.normals().len(), 18);
        assert_eq!(g.colors().len(), 24);
    }

    #[test]
    fn per_vertex_normals_follow_vertex_order() {
        let mut g = SceneGeometry::with_capacity(1);
        g.push_triangle(&tri(), [RED; 3], NormalSource::PerVertex);
        assert_eq!(g.normals(), &[0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn face_normals_repeat_for_each_vertex() {
        let mut g = SceneGeometry::with_capacity(1);
        g.push_triangle(&tri(), [RED; 3], NormalSource::Face);
        assert_eq!(g.normals(), &[0.0, 0.0, -1.0, 0.0, 0.0, -1.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn colors_land_in_vertex_slots() {
        let mut g = SceneGeometry::with_capacity(1);
        g.push_triangle(&tri(), [RED, BLUE, RED], NormalSource::PerVertex);
        assert_eq!(&g.colors()[4..8], &BLUE);
        assert_eq!(&g.colors()[8..12], &RED);
    }

    #[test]
    fn default_is_empty() {
        let g = SceneGeometry::default();
        assert!(g.is_empty());
        assert_eq!(g.vertex_count(), 0);
    }
}
