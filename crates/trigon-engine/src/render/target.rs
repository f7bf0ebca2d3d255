/// Where a frame's draw calls go: the frame encoder and the surface view.
///
/// Handed to the draw closure of `FrameCtx::render` after the clear pass.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}
