use anyhow::Result;
use wgpu::util::DeviceExt;

use trigon_model::SceneGeometry;

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const NORMAL_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x4];

/// Attributes fed by the scene buffers, in slot order: position (0),
/// normal (1), color (2).
pub const SCENE_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    [POSITION_ATTRS[0], NORMAL_ATTRS[0], COLOR_ATTRS[0]];

/// Scene geometry resident on the GPU: one vertex buffer per attribute.
pub struct SceneBuffers {
    positions: wgpu::Buffer,
    normals: wgpu::Buffer,
    colors: wgpu::Buffer,
    vertex_count: u32,
}

impl SceneBuffers {
    /// Uploads the three flat sequences of `geometry`.
    ///
    /// Fails without touching the device if one draw call cannot cover the
    /// whole scene.
    pub fn upload(device: &wgpu::Device, geometry: &SceneGeometry) -> Result<Self> {
        let vertex_count = draw_vertex_count(geometry.vertex_count())?;

        let buffer = |label: &str, data: &[f32]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX,
            })
        };

        let positions = buffer("trigon scene positions", geometry.positions());
        let normals = buffer("trigon scene normals", geometry.normals());
        let colors = buffer("trigon scene colors", geometry.colors());

        log::debug!(
            "uploaded {} triangle(s) ({} bytes)",
            geometry.triangle_count(),
            4 * (geometry.positions().len() + geometry.normals().len() + geometry.colors().len())
        );

        Ok(Self {
            positions,
            normals,
            colors,
            vertex_count,
        })
    }

    /// Vertex buffer layouts in slot order (0 positions, 1 normals, 2 colors).
    pub fn layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
        let layout = |stride: usize, attributes: &'static [wgpu::VertexAttribute]| {
            wgpu::VertexBufferLayout {
                array_stride: (stride * std::mem::size_of::<f32>()) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes,
            }
        };
        [
            layout(3, &POSITION_ATTRS),
            layout(3, &NORMAL_ATTRS),
            layout(4, &COLOR_ATTRS),
        ]
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub(crate) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.positions.slice(..));
        rpass.set_vertex_buffer(1, self.normals.slice(..));
        rpass.set_vertex_buffer(2, self.colors.slice(..));
    }
}

/// The draw call takes a `u32` vertex range.
fn draw_vertex_count(vertex_count: usize) -> Result<u32> {
    u32::try_from(vertex_count).map_err(|_| {
        anyhow::anyhow!("scene has {vertex_count} vertices, more than one draw call can cover")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_attribute_locations() {
        let layouts = SceneBuffers::layouts();
        for (slot, (layout, attr)) in layouts.iter().zip(SCENE_ATTRIBUTES).enumerate() {
            assert_eq!(layout.attributes, &[attr]);
            assert_eq!(attr.shader_location, slot as u32);
            assert_eq!(attr.offset, 0);
        }
    }

    #[test]
    fn vertex_count_fits_a_draw() {
        assert_eq!(draw_vertex_count(36).unwrap(), 36);
        assert_eq!(draw_vertex_count(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_scene_is_rejected() {
        let err = draw_vertex_count(u32::MAX as usize + 1).unwrap_err();
        assert!(err.to_string().contains("more than one draw call"));
    }

    #[test]
    fn strides_match_flat_buffers() {
        let [p, n, c] = SceneBuffers::layouts();
        assert_eq!(p.array_stride, 12);
        assert_eq!(n.array_stride, 12);
        assert_eq!(c.array_stride, 16);
    }
}
