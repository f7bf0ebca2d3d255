//! WGSL sources shared by the shader tests.

pub(crate) const VERTEX: &str = r#"
struct VertexOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec4<f32>,
}

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
) -> VertexOut {
    var result: VertexOut;
    result.clip = vec4<f32>(position, 1.0);
    result.normal = normal;
    result.color = color;
    return result;
}
"#;

pub(crate) const FRAGMENT: &str = r#"
struct FragmentIn {
    @location(0) normal: vec3<f32>,
    @location(1) color: vec4<f32>,
}

@fragment
fn fs_main(frag: FragmentIn) -> @location(0) vec4<f32> {
    let shade = 0.5 + 0.5 * max(normalize(frag.normal).z, 0.0);
    return vec4<f32>(frag.color.rgb * shade, frag.color.a);
}
"#;

/// Missing `;` after the return expression.
pub(crate) const FRAGMENT_SYNTAX_ERROR: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0)
}
"#;

/// Reads `@location(3)`, which the vertex stage never writes.
pub(crate) const FRAGMENT_UNMATCHED_INPUT: &str = r#"
@fragment
fn fs_main(@location(3) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(uv, 0.0, 1.0);
}
"#;

/// Writes `@location(0)` as `vec3<f32>`; pairs with [`FRAGMENT_FLAT_UINT`].
pub(crate) const VERTEX_VEC3_OUT: &str = r#"
struct VertexOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) c: vec3<f32>,
}

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOut {
    var result: VertexOut;
    result.clip = vec4<f32>(position, 1.0);
    result.c = position;
    return result;
}
"#;

/// Reads `@location(0)` as a flat `vec4<u32>`.
pub(crate) const FRAGMENT_FLAT_UINT: &str = r#"
@fragment
fn fs_main(@location(0) @interpolate(flat) c: vec4<u32>) -> @location(0) vec4<f32> {
    return vec4<f32>(c) / 255.0;
}
"#;

/// Same type as the vertex output but with flat interpolation.
pub(crate) const FRAGMENT_FLAT_VEC3: &str = r#"
@fragment
fn fs_main(@location(0) @interpolate(flat) c: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(c, 1.0);
}
"#;

/// Declares the position attribute as integers.
pub(crate) const VERTEX_INT_POSITION: &str = r#"
@vertex
fn vs_main(@location(0) position: vec3<i32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(vec3<f32>(position), 1.0);
}
"#;

/// Writes an integer color target.
pub(crate) const FRAGMENT_UINT_TARGET: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<u32> {
    return vec4<u32>(255u, 0u, 0u, 255u);
}
"#;

/// Uses `f64`, which needs a device feature.
pub(crate) const FRAGMENT_F64: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    let x: f64 = f64(0.5);
    return vec4<f32>(f32(x), 0.0, 0.0, 1.0);
}
"#;
