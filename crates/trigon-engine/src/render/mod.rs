//! Scene rendering.
//!
//! `SceneBuffers` uploads flattened scene geometry once; `RenderResources`
//! pairs those buffers with the linked pipeline and records the per-frame draw.

mod resources;
mod scene;
mod target;

pub use resources::RenderResources;
pub use scene::{SCENE_ATTRIBUTES, SceneBuffers};
pub use target::RenderTarget;
