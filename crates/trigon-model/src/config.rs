/// Which normal is written into the normal buffer for each vertex.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum NormalSource {
    /// The normal given on each `v0`/`v1`/`v2` line (smooth shading).
    #[default]
    PerVertex,
    /// The triangle's `face normal`, repeated for all three vertices (flat shading).
    Face,
}

/// Loader options.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Upper bound on the declared material count. Larger tables are rejected.
    pub max_materials: usize,
    pub normals: NormalSource,
}

impl LoaderConfig {
    pub const DEFAULT_MAX_MATERIALS: usize = 32;
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_materials: Self::DEFAULT_MAX_MATERIALS,
            normals: NormalSource::PerVertex,
        }
    }
}
