//! wgpu render back end for the pyramid viewer.
//!
//! Uploads the configured mesh once, then each frame writes the uniform map
//! into a single uniform buffer and issues one triangle-list draw.
//!
//! # Invariants
//! - The renderer never sees transform state, only composed matrices.
//! - Uniform buffer layout matches the shader chosen for the uniform layout.

mod gpu;
mod shaders;

pub use gpu::{WgpuFrame, WgpuRenderer};
