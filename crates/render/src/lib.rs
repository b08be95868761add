//! Rendering adapter: composes the frame's matrices and hands them to a
//! renderer-agnostic back end.
//!
//! # Invariants
//! - Renderers read uniforms; they never mutate transform state.
//! - Matrices are recomposed every frame and never cached.
//! - Final transform = projection · view · model.

mod composer;
mod frame;
mod renderer;
mod uniforms;

pub use composer::{Mvp, compose, model_matrix};
pub use frame::{FrameReport, Session};
pub use renderer::{DebugTextRenderer, Draw, RenderError, Renderer};
pub use uniforms::UniformSet;

pub fn crate_info() -> &'static str {
    "pyramid-render v0.1.0"
}
