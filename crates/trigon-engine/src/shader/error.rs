use std::fmt;
use std::path::PathBuf;

use super::ShaderStage;

/// Failure of [`build_program`](super::build_program).
///
/// Compiler and linker diagnostics are kept verbatim.
#[derive(Debug)]
pub enum ShaderError {
    /// The request named no stages.
    NoStages,
    /// A stage's source file could not be read.
    Io {
        stage: ShaderStage,
        path: PathBuf,
        source: std::io::Error,
    },
    /// A stage failed to compile.
    Compile {
        stage: ShaderStage,
        path: PathBuf,
        diagnostic: String,
    },
    /// All stages compiled but the program failed to link.
    Link { diagnostic: String },
}

impl ShaderError {
    /// The stage that failed, if the failure belongs to a single stage.
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            ShaderError::Io { stage, .. } | ShaderError::Compile { stage, .. } => Some(*stage),
            ShaderError::NoStages | ShaderError::Link { .. } => None,
        }
    }

    /// Compiler or linker output, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            ShaderError::Compile { diagnostic, .. } | ShaderError::Link { diagnostic } => {
                Some(diagnostic.as_str())
            }
            ShaderError::NoStages | ShaderError::Io { .. } => None,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::NoStages => f.write_str("shader build request names no stages"),
            ShaderError::Io { stage, path, source } => write!(
                f,
                "failed to read {stage} shader source '{}': {source}",
                path.display()
            ),
            ShaderError::Compile { stage, path, diagnostic } => write!(
                f,
                "{stage} shader '{}' failed to compile:\n{diagnostic}",
                path.display()
            ),
            ShaderError::Link { diagnostic } => {
                write!(f, "shader program failed to link:\n{diagnostic}")
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
