use std::fmt;
use std::path::PathBuf;

/// A structural error in a scene file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    /// 1-based source line number where the error occurred.
    pub line: usize,
}

impl ParseError {
    pub(crate) fn new(msg: impl Into<String>, line: usize) -> Self {
        Self { message: msg.into(), line }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene parse error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Failure of [`load_model`](crate::load_model).
#[derive(Debug)]
pub enum LoadError {
    /// The scene file could not be opened or read.
    Io { path: PathBuf, source: std::io::Error },
    /// The file was read but does not match the scene grammar.
    Parse { path: PathBuf, source: ParseError },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read scene file '{}': {source}", path.display())
            }
            LoadError::Parse { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
        }
    }
}
