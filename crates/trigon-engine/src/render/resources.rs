use super::{RenderTarget, SceneBuffers};

/// Everything the draw loop needs: the linked pipeline and the scene buffers.
///
/// Built once at startup, then only read by each frame.
pub struct RenderResources {
    pipeline: wgpu::RenderPipeline,
    buffers: SceneBuffers,
}

impl RenderResources {
    pub fn new(pipeline: wgpu::RenderPipeline, buffers: SceneBuffers) -> Self {
        Self { pipeline, buffers }
    }

    /// Records one pass drawing the whole scene into `target`.
    ///
    /// The target is loaded, not cleared. Empty scenes record nothing.
    pub fn draw(&self, target: &mut RenderTarget<'_>) {
        let vertex_count = self.buffers.vertex_count();
        if vertex_count == 0 {
            return;
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trigon scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        self.buffers.bind(&mut rpass);
        rpass.draw(0..vertex_count, 0..1);
    }
}
