use naga::valid::Capabilities;

use crate::render::{SCENE_ATTRIBUTES, SceneBuffers};

use super::ShaderStage;
use super::wgsl::{self, StageInterface};

/// GPU-side shader operations used by [`build_program`](super::build_program).
///
/// Contract:
/// - `compile` creates one shader object. If compilation fails the backend
///   releases that object itself and returns the compiler log.
/// - `link` combines compiled shaders into a program, or returns the link log.
///   It never consumes or releases the shaders.
/// - `release` destroys one shader object.
pub trait ShaderBackend {
    type Shader;
    type Program;

    fn compile(
        &mut self,
        stage: ShaderStage,
        label: &str,
        source: &str,
    ) -> Result<Self::Shader, String>;

    fn link(&mut self, shaders: &[Self::Shader]) -> Result<Self::Program, String>;

    fn release(&mut self, shader: Self::Shader);
}

/// A compiled stage on the wgpu device.
pub struct WgpuShader {
    interface: StageInterface,
    module: wgpu::ShaderModule,
}

/// [`ShaderBackend`] over a wgpu device. Programs are render pipelines that
/// draw [`SceneBuffers`] into a color target of `color_format`.
///
/// Front faces wind counter-clockwise; back faces are culled unless
/// [`with_cull_mode`](Self::with_cull_mode) says otherwise.
///
/// Device-side validation runs inside an error scope, so whatever naga's
/// checks miss still comes back as a compile or link log.
pub struct WgpuShaderBackend<'a> {
    device: &'a wgpu::Device,
    color_format: wgpu::TextureFormat,
    cull_mode: Option<wgpu::Face>,
    capabilities: Capabilities,
}

impl<'a> WgpuShaderBackend<'a> {
    pub fn new(device: &'a wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        Self {
            device,
            color_format,
            cull_mode: Some(wgpu::Face::Back),
            capabilities: shader_capabilities(device.features()),
        }
    }

    pub fn with_cull_mode(mut self, cull_mode: Option<wgpu::Face>) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    /// Runs `create` inside a validation error scope.
    fn validated<T>(&self, create: impl FnOnce(&wgpu::Device) -> T) -> Result<T, String> {
        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let value = create(self.device);
        match pollster::block_on(scope.pop()) {
            None => Ok(value),
            Some(err) => Err(err.to_string()),
        }
    }
}

/// Shader capabilities granted by the enabled device features.
fn shader_capabilities(features: wgpu::Features) -> Capabilities {
    let mut caps = wgsl::BASELINE_CAPABILITIES;
    caps.set(Capabilities::FLOAT64, features.contains(wgpu::Features::SHADER_F64));
    caps.set(Capabilities::SHADER_INT64, features.contains(wgpu::Features::SHADER_INT64));
    caps.set(
        Capabilities::PRIMITIVE_INDEX,
        features.contains(wgpu::Features::SHADER_PRIMITIVE_INDEX),
    );
    caps
}

impl ShaderBackend for WgpuShaderBackend<'_> {
    type Shader = WgpuShader;
    type Program = wgpu::RenderPipeline;

    fn compile(
        &mut self,
        stage: ShaderStage,
        label: &str,
        source: &str,
    ) -> Result<WgpuShader, String> {
        let interface = wgsl::compile_stage_with(stage, source, self.capabilities)?;

        let module = self.validated(|device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            })
        })?;

        Ok(WgpuShader { interface, module })
    }

    fn link(&mut self, shaders: &[WgpuShader]) -> Result<wgpu::RenderPipeline, String> {
        let (vs, fs) = wgsl::pair_stages(shaders, |s| s.interface.stage)?;
        wgsl::check_link(&vs.interface, &fs.interface, &SCENE_ATTRIBUTES)?;

        let color_format = self.color_format;
        let cull_mode = self.cull_mode;

        let pipeline = self.validated(|device| {
            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("trigon scene pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

            let buffers = SceneBuffers::layouts();

            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("trigon scene pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &vs.module,
                    entry_point: Some(&vs.interface.entry_point),
                    compilation_options: Default::default(),
                    buffers: &buffers,
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fs.module,
                    entry_point: Some(&fs.interface.entry_point),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        })?;

        log::debug!(
            "linked '{}' + '{}' for {:?}",
            vs.interface.entry_point,
            fs.interface.entry_point,
            self.color_format
        );
        Ok(pipeline)
    }

    fn release(&mut self, shader: WgpuShader) {
        log::trace!("releasing {} shader '{}'", shader.interface.stage, shader.interface.entry_point);
        drop(shader.module);
    }
}
