//! Transform kernel: the single object's transform state and the per-frame
//! update that applies held keys to it.
//!
//! # Invariants
//! - State mutates only through [`update`], once per frame.
//! - `scale` lies in `[scale_min, scale_max]` after every update.
//! - A held discrete-rotation key turns the object exactly once.

pub mod state;
pub mod update;

pub use state::TransformState;
pub use update::{FrameSignal, update};
