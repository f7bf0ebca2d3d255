//! Trigon engine crate.
//!
//! Owns the platform and GPU runtime pieces used by the demo: device setup,
//! the window loop, logging, the shader pipeline builder and scene buffers.

pub mod core;
pub mod device;
pub mod window;

pub mod logging;
pub mod render;
pub mod shader;
