use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use trigon_model::{LoaderConfig, NormalSource};

pub const DEFAULT_SCENE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/cube.in");
pub const DEFAULT_VERTEX_SHADER: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/triangles.vert.wgsl");
pub const DEFAULT_FRAGMENT_SHADER: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/triangles.frag.wgsl");

pub const HELP: &str = "\
trigon-demo: render a triangle scene file

USAGE:
  trigon-demo [OPTIONS]

OPTIONS:
  --scene <path>         scene file to load (default: assets/cube.in)
  --vert <path>          WGSL vertex stage
  --frag <path>          WGSL fragment stage
  --max-materials <n>    largest accepted material table (default: 32)
  --flat                 use face normals instead of per-vertex normals
  --no-cull              draw back faces too
  --keep-running         keep the window open if the shader program fails to build
  --log <filter>         env_logger filter, overrides RUST_LOG
  -h, --help             print this help
";

/// Settings for one demo run.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub scene: PathBuf,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub loader: LoaderConfig,
    pub cull_back_faces: bool,
    /// Run without drawing instead of exiting when the program cannot be built.
    pub keep_running: bool,
    pub log_filter: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            scene: PathBuf::from(DEFAULT_SCENE),
            vertex_shader: PathBuf::from(DEFAULT_VERTEX_SHADER),
            fragment_shader: PathBuf::from(DEFAULT_FRAGMENT_SHADER),
            loader: LoaderConfig::default(),
            cull_back_faces: true,
            keep_running: false,
            log_filter: None,
        }
    }
}

#[derive(Debug)]
pub enum Command {
    Run(DemoConfig),
    Help,
}

/// Parses command-line arguments (without the program name).
pub fn parse_args(args: Vec<OsString>) -> Result<Command> {
    let mut args = pico_args::Arguments::from_vec(args);

    if args.contains(["-h", "--help"]) {
        return Ok(Command::Help);
    }

    let mut config = DemoConfig::default();

    if let Some(path) = args.opt_value_from_str::<_, PathBuf>("--scene")? {
        config.scene = path;
    }
    if let Some(path) = args.opt_value_from_str::<_, PathBuf>("--vert")? {
        config.vertex_shader = path;
    }
    if let Some(path) = args.opt_value_from_str::<_, PathBuf>("--frag")? {
        config.fragment_shader = path;
    }
    if let Some(max) = args
        .opt_value_from_str::<_, usize>("--max-materials")
        .context("--max-materials expects a non-negative integer")?
    {
        config.loader.max_materials = max;
    }
    if args.contains("--flat") {
        config.loader.normals = NormalSource::Face;
    }
    config.cull_back_faces = !args.contains("--no-cull");
    config.keep_running = args.contains("--keep-running");
    config.log_filter = args.opt_value_from_str("--log")?;

    let rest = args.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {rest:?} (see --help)");
    }

    Ok(Command::Run(config))
}
