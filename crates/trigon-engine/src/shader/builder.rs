use super::{ShaderBackend, ShaderError, StageSource};

/// Builds a program from `sources`, in order.
///
/// 1. read each stage's source file and compile it
/// 2. link all compiled stages into a program
///
/// Every shader object created along the way is released before this
/// returns, on success and on failure. No retries: a failed build is final.
pub fn build_program<B: ShaderBackend>(
    backend: &mut B,
    sources: &[StageSource],
) -> Result<B::Program, ShaderError> {
    if sources.is_empty() {
        return Err(ShaderError::NoStages);
    }

    let mut shaders = Vec::with_capacity(sources.len());

    let result = compile_stages(backend, sources, &mut shaders).and_then(|()| {
        backend.link(&shaders).map_err(|diagnostic| {
            log::error!("shader program failed to link:\n{diagnostic}");
            ShaderError::Link { diagnostic }
        })
    });

    let count = shaders.len();
    for shader in shaders {
        backend.release(shader);
    }
    log::trace!("released {count} shader object(s)");

    if result.is_ok() {
        log::debug!("built program from {} stage(s)", sources.len());
    }
    result
}

/// Compiles each stage into `shaders`, stopping at the first failure.
/// Whatever was compiled before the failure stays in `shaders`.
fn compile_stages<B: ShaderBackend>(
    backend: &mut B,
    sources: &[StageSource],
    shaders: &mut Vec<B::Shader>,
) -> Result<(), ShaderError> {
    for StageSource { stage, path } in sources {
        let text = std::fs::read_to_string(path).map_err(|source| {
            log::error!("failed to read {stage} shader '{}': {source}", path.display());
            ShaderError::Io {
                stage: *stage,
                path: path.clone(),
                source,
            }
        })?;

        let label = path.display().to_string();
        log::debug!("compiling {stage} shader '{label}'");

        let shader = backend.compile(*stage, &label, &text).map_err(|diagnostic| {
            log::error!("{stage} shader '{label}' failed to compile:\n{diagnostic}");
            ShaderError::Compile {
                stage: *stage,
                path: path.clone(),
                diagnostic,
            }
        })?;
        shaders.push(shader);
    }
    Ok(())
}
