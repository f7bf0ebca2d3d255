//! Shader pipeline builder.
//!
//! Reads one WGSL source file per stage, compiles every stage, then links them
//! into a program. The build is all-or-nothing: any failure releases every
//! shader object created so far and no program is returned.
//!
//! Shader objects never outlive a build. Once linking has finished they are
//! released, whether it succeeded or not; the program keeps what it needs.
//!
//! The GPU side sits behind [`ShaderBackend`]; [`WgpuShaderBackend`] is the
//! wgpu implementation.

mod backend;
mod builder;
mod error;
mod stage;
pub mod wgsl;

#[cfg(test)]
mod test_sources;

pub use backend::{ShaderBackend, WgpuShader, WgpuShaderBackend};
pub use builder::build_program;
pub use error::ShaderError;
pub use stage::{ShaderStage, StageSource};
