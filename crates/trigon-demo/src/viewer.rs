use anyhow::{Context, Result};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use trigon_engine::core::{App, AppControl, FrameCtx};
use trigon_engine::device::Gpu;
use trigon_engine::render::{RenderResources, SceneBuffers};
use trigon_engine::shader::{StageSource, WgpuShaderBackend, build_program};
use trigon_model::SceneGeometry;

use crate::config::DemoConfig;

const CLEAR: wgpu::Color = wgpu::Color::BLACK;

/// Draws one loaded scene every frame.
pub struct Viewer {
    stages: [StageSource; 2],
    cull_mode: Option<wgpu::Face>,
    keep_running: bool,
    /// Held until the device exists, then uploaded and dropped.
    geometry: Option<SceneGeometry>,
    resources: Option<RenderResources>,
}

impl Viewer {
    pub fn new(stages: [StageSource; 2], geometry: SceneGeometry, config: &DemoConfig) -> Self {
        Self {
            stages,
            cull_mode: config.cull_back_faces.then_some(wgpu::Face::Back),
            keep_running: config.keep_running,
            geometry: Some(geometry),
            resources: None,
        }
    }
}

impl App for Viewer {
    fn on_init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let mut backend = WgpuShaderBackend::new(gpu.device(), gpu.surface_format())
            .with_cull_mode(self.cull_mode);

        let pipeline = match build_program(&mut backend, &self.stages) {
            Ok(pipeline) => pipeline,
            Err(err) if self.keep_running => {
                log::warn!("{err}; running without drawing");
                return Ok(());
            }
            Err(err) => return Err(err).context("failed to build the shader program"),
        };

        let Some(geometry) = self.geometry.take() else {
            return Ok(());
        };
        let buffers = SceneBuffers::upload(gpu.device(), &geometry)?;
        log::info!(
            "scene uploaded: {} triangle(s), {} vertices",
            geometry.triangle_count(),
            buffers.vertex_count()
        );

        self.resources = Some(RenderResources::new(pipeline, buffers));
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let resources = self.resources.as_ref();
        ctx.render(CLEAR, |target| {
            if let Some(resources) = resources {
                resources.draw(target);
            }
        })
    }
}
