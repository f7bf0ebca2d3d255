//! In-memory records read from a scene file.

/// `[x, y, z]`, also used for RGB colors.
pub type Vec3 = [f32; 3];

/// Alpha written for every vertex color. Colors are normalized floats, so full
/// opacity is `1.0`.
pub const OPAQUE: f32 = 1.0;

/// Reflectance properties referenced by index from triangle vertices.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Material {
    /// RGBA color written into the vertex color buffer: diffuse RGB, opaque alpha.
    #[inline]
    pub fn vertex_color(&self) -> [f32; 4] {
        let [r, g, b] = self.diffuse;
        [r, g, b, OPAQUE]
    }
}

/// One triangle block.
///
/// Invariant (enforced by the parser): every entry of `material` is a valid
/// index into the material table the triangle was read against.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub normals: [Vec3; 3],
    pub face_normal: Vec3,
    pub material: [usize; 3],
}
