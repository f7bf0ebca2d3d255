use std::fmt;
use std::path::PathBuf;

/// A compilable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// One entry of a build request: which stage, and where its source lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSource {
    pub stage: ShaderStage,
    pub path: PathBuf,
}

impl StageSource {
    pub fn new(stage: ShaderStage, path: impl Into<PathBuf>) -> Self {
        Self { stage, path: path.into() }
    }

    pub fn vertex(path: impl Into<PathBuf>) -> Self {
        Self::new(ShaderStage::Vertex, path)
    }

    pub fn fragment(path: impl Into<PathBuf>) -> Self {
        Self::new(ShaderStage::Fragment, path)
    }
}
