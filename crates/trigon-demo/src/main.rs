//! Trigon demo.
//!
//! Loads a triangle scene, builds the WGSL program and draws the scene every
//! frame until Escape is pressed or the window is closed.

mod config;
mod viewer;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use trigon_engine::device::GpuInit;
use trigon_engine::logging::{LoggingConfig, init_logging};
use trigon_engine::shader::StageSource;
use trigon_engine::window::{Runtime, RuntimeConfig};

use config::Command;
use viewer::Viewer;

fn main() -> Result<()> {
    let config = match config::parse_args(std::env::args_os().skip(1).collect())? {
        Command::Run(config) => config,
        Command::Help => {
            print!("{}", config::HELP);
            return Ok(());
        }
    };

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });

    let geometry = trigon_model::load_model_with(&config.scene, &config.loader)
        .with_context(|| format!("failed to load scene {}", config.scene.display()))?;

    let stages = [
        StageSource::vertex(config.vertex_shader.clone()),
        StageSource::fragment(config.fragment_shader.clone()),
    ];
    let app = Viewer::new(stages, geometry, &config);

    Runtime::run(
        RuntimeConfig {
            title: "trigon".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        },
        GpuInit::default(),
        app,
    )
}

#[cfg(test)]
mod tests {
    use trigon_engine::render::SCENE_ATTRIBUTES;
    use trigon_engine::shader::ShaderStage;
    use trigon_engine::shader::wgsl::{check_link, compile_stage};

    use super::config::{DEFAULT_FRAGMENT_SHADER, DEFAULT_SCENE, DEFAULT_VERTEX_SHADER};

    // ── shipped assets ────────────────────────────────────────────────────

    #[test]
    fn shipped_scene_loads() {
        let geometry = trigon_model::load_model(DEFAULT_SCENE).unwrap();
        assert_eq!(geometry.triangle_count(), 12);
        assert_eq!(geometry.vertex_count(), 36);
        assert!(geometry.colors().chunks(4).all(|c| c[3] == 1.0));
    }

    #[test]
    fn shipped_shaders_compile_and_link() {
        let vs_src = std::fs::read_to_string(DEFAULT_VERTEX_SHADER).unwrap();
        let fs_src = std::fs::read_to_string(DEFAULT_FRAGMENT_SHADER).unwrap();

        let vs = compile_stage(ShaderStage::Vertex, &vs_src).unwrap();
        let fs = compile_stage(ShaderStage::Fragment, &fs_src).unwrap();

        assert_eq!(vs.input_locations(), vec![0, 1, 2]);
        check_link(&vs, &fs, &SCENE_ATTRIBUTES).unwrap();
    }
}
