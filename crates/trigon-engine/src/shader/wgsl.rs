//! WGSL front end: compile-time checks and stage-interface reflection.
//!
//! "Compile" parses and validates one stage with naga and records the
//! `@location` slots its entry point reads and writes, with their types and
//! interpolation. "Link" matches those interfaces across stages and against
//! the vertex buffers, the checks a GL linker performs before it hands out a
//! program.

use std::fmt;

use naga::valid::Capabilities;
use naga::{Binding, Handle, Interpolation, Module, Sampling, Scalar, ScalarKind, Type, TypeInner};

use super::ShaderStage;

/// What every wgpu device supports without optional features.
pub const BASELINE_CAPABILITIES: Capabilities =
    Capabilities::MULTISAMPLED_SHADING.union(Capabilities::CUBE_ARRAY_TEXTURES);

/// Scalar or vector type of one `@location` slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SlotType {
    pub scalar: Scalar,
    /// 1 for a scalar.
    pub components: u8,
}

impl SlotType {
    fn from_inner(inner: &TypeInner) -> Option<Self> {
        match *inner {
            TypeInner::Scalar(scalar) => Some(Self { scalar, components: 1 }),
            TypeInner::Vector { size, scalar } => Some(Self {
                scalar,
                components: size as u8,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Scalar { kind, width } = self.scalar;
        let scalar = match kind {
            ScalarKind::Float => format!("f{}", 8 * u32::from(width)),
            ScalarKind::Sint => format!("i{}", 8 * u32::from(width)),
            ScalarKind::Uint => format!("u{}", 8 * u32::from(width)),
            ScalarKind::Bool => "bool".to_string(),
            other => format!("{other:?}"),
        };
        match self.components {
            1 => f.write_str(&scalar),
            n => write!(f, "vec{n}<{scalar}>"),
        }
    }
}

/// One `@location` input or output of an entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IoSlot {
    pub location: u32,
    pub ty: SlotType,
    pub interpolation: Option<Interpolation>,
    pub sampling: Option<Sampling>,
}

/// The `@location` interface of one compiled stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageInterface {
    pub stage: ShaderStage,
    pub entry_point: String,
    /// Inputs, sorted by location.
    pub inputs: Vec<IoSlot>,
    /// Outputs, sorted by location.
    pub outputs: Vec<IoSlot>,
}

impl StageInterface {
    pub fn input_locations(&self) -> Vec<u32> {
        self.inputs.iter().map(|s| s.location).collect()
    }

    pub fn output_locations(&self) -> Vec<u32> {
        self.outputs.iter().map(|s| s.location).collect()
    }

    fn output(&self, location: u32) -> Option<&IoSlot> {
        self.outputs.iter().find(|s| s.location == location)
    }
}

// ── compile ───────────────────────────────────────────────────────────────

/// [`compile_stage_with`] against [`BASELINE_CAPABILITIES`].
pub fn compile_stage(stage: ShaderStage, source: &str) -> Result<StageInterface, String> {
    compile_stage_with(stage, source, BASELINE_CAPABILITIES)
}

/// Parses and validates `source` as a single `stage` and reflects its interface.
///
/// Validation only admits what `capabilities` allows, so a stage that needs a
/// missing device feature fails here. The source must hold exactly one entry
/// point for `stage`. On failure the returned text is naga's rendered
/// diagnostic.
pub fn compile_stage_with(
    stage: ShaderStage,
    source: &str,
    capabilities: Capabilities,
) -> Result<StageInterface, String> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;

    let mut validator =
        naga::valid::Validator::new(naga::valid::ValidationFlags::all(), capabilities);
    validator
        .validate(&module)
        .map_err(|e| e.emit_to_string(source))?;

    let target = stage.naga_stage();
    let mut entries = module.entry_points.iter().filter(|ep| ep.stage == target);
    let entry = match (entries.next(), entries.next()) {
        (Some(ep), None) => ep,
        (None, _) => return Err(format!("no @{stage} entry point found")),
        (Some(a), Some(b)) => {
            return Err(format!(
                "more than one @{stage} entry point ('{}', '{}')",
                a.name, b.name
            ));
        }
    };

    let mut inputs = Vec::new();
    for arg in &entry.function.arguments {
        collect_slots(&module, arg.binding.as_ref(), arg.ty, &mut inputs)?;
    }

    let mut outputs = Vec::new();
    if let Some(result) = &entry.function.result {
        collect_slots(&module, result.binding.as_ref(), result.ty, &mut outputs)?;
    }

    inputs.sort_unstable_by_key(|s| s.location);
    outputs.sort_unstable_by_key(|s| s.location);

    Ok(StageInterface {
        stage,
        entry_point: entry.name.clone(),
        inputs,
        outputs,
    })
}

/// Unbound arguments/results are structs whose members carry the bindings.
fn collect_slots(
    module: &Module,
    binding: Option<&Binding>,
    ty: Handle<Type>,
    out: &mut Vec<IoSlot>,
) -> Result<(), String> {
    let inner = &module.types[ty].inner;
    match binding {
        Some(&Binding::Location {
            location,
            interpolation,
            sampling,
            ..
        }) => {
            let ty = SlotType::from_inner(inner).ok_or_else(|| {
                format!("@location({location}) must be a scalar or vector, found {inner:?}")
            })?;
            out.push(IoSlot {
                location,
                ty,
                interpolation,
                sampling,
            });
        }
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = inner {
                for m in members {
                    collect_slots(module, m.binding.as_ref(), m.ty, out)?;
                }
            }
        }
    }
    Ok(())
}

// ── link ──────────────────────────────────────────────────────────────────

/// Picks the vertex and fragment stage out of a compiled set.
///
/// A render program needs exactly one of each.
pub fn pair_stages<T>(
    shaders: &[T],
    stage_of: impl Fn(&T) -> ShaderStage,
) -> Result<(&T, &T), String> {
    let vertex = single_stage(shaders, ShaderStage::Vertex, &stage_of)?;
    let fragment = single_stage(shaders, ShaderStage::Fragment, &stage_of)?;
    Ok((vertex, fragment))
}

fn single_stage<'a, T>(
    shaders: &'a [T],
    stage: ShaderStage,
    stage_of: &impl Fn(&T) -> ShaderStage,
) -> Result<&'a T, String> {
    let mut found = shaders.iter().filter(|s| stage_of(*s) == stage);
    match (found.next(), found.next()) {
        (Some(s), None) => Ok(s),
        (None, _) => Err(format!("program has no {stage} stage")),
        (Some(_), Some(_)) => Err(format!("program has more than one {stage} stage")),
    }
}

/// Numeric kind a vertex format delivers to the shader. Normalized and float
/// formats arrive as floats.
fn attribute_kind(format: wgpu::VertexFormat) -> ScalarKind {
    use wgpu::VertexFormat as F;
    match format {
        F::Uint8 | F::Uint8x2 | F::Uint8x4 | F::Uint16 | F::Uint16x2 | F::Uint16x4 | F::Uint32
        | F::Uint32x2 | F::Uint32x3 | F::Uint32x4 => ScalarKind::Uint,
        F::Sint8 | F::Sint8x2 | F::Sint8x4 | F::Sint16 | F::Sint16x2 | F::Sint16x4 | F::Sint32
        | F::Sint32x2 | F::Sint32x3 | F::Sint32x4 => ScalarKind::Sint,
        _ => ScalarKind::Float,
    }
}

/// Matches the stage interfaces against each other and against the vertex
/// attributes the geometry provides.
///
/// - each vertex input needs an attribute at its location of the same numeric
///   kind (the component count may differ)
/// - each fragment input needs a vertex output at its location with the same
///   type, interpolation and sampling
/// - the fragment stage writes a floating-point `@location(0)` color
///
/// Every problem found is reported, one per line.
pub fn check_link(
    vertex: &StageInterface,
    fragment: &StageInterface,
    attributes: &[wgpu::VertexAttribute],
) -> Result<(), String> {
    let mut problems = Vec::new();
    let vs_name = &vertex.entry_point;
    let fs_name = &fragment.entry_point;

    for input in &vertex.inputs {
        let loc = input.location;
        match attributes.iter().find(|a| a.shader_location == loc) {
            None => problems.push(format!(
                "vertex input @location({loc}) of '{vs_name}' has no matching vertex attribute"
            )),
            Some(attr) if attribute_kind(attr.format) != input.ty.scalar.kind => {
                problems.push(format!(
                    "vertex input @location({loc}) of '{vs_name}' is {} but the attribute is {:?}",
                    input.ty, attr.format
                ))
            }
            Some(_) => {}
        }
    }

    for input in &fragment.inputs {
        let loc = input.location;
        let Some(output) = vertex.output(loc) else {
            problems.push(format!(
                "fragment input @location({loc}) of '{fs_name}' is not written by '{vs_name}'"
            ));
            continue;
        };
        if output.ty != input.ty {
            problems.push(format!(
                "@location({loc}) type mismatch: '{vs_name}' writes {}, '{fs_name}' reads {}",
                output.ty, input.ty
            ));
        } else if output.interpolation != input.interpolation || output.sampling != input.sampling
        {
            problems.push(format!(
                "@location({loc}) interpolation mismatch: '{vs_name}' uses {:?}/{:?}, '{fs_name}' uses {:?}/{:?}",
                output.interpolation, output.sampling, input.interpolation, input.sampling
            ));
        }
    }

    match fragment.outputs.iter().find(|s| s.location == 0) {
        None => problems.push(format!(
            "fragment entry point '{fs_name}' does not write @location(0)"
        )),
        Some(color) if color.ty.scalar.kind != ScalarKind::Float => problems.push(format!(
            "fragment @location(0) of '{fs_name}' is {}, the color target needs floats",
            color.ty
        )),
        Some(_) => {}
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("\n"))
    }
}
