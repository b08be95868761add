//! Keyboard input for the pyramid viewer, independent of any windowing crate.
//!
//! Platform code maps its own key codes onto [`Key`] and exposes them through
//! [`KeyInput`]. The state update only ever asks "is this key held right now?".
//!
//! # Invariants
//! - The set of keys is fixed; there is no free-form key mapping in the core.
//! - [`RotationLatch`] fires at most once per press of the rotation key pair.

pub mod key;
pub mod latch;
pub mod script;

pub use key::{HeldKeys, Key, KeyInput};
pub use latch::{RotationDirection, RotationLatch};
pub use script::{KeyScript, ScriptError, ScriptSegment};

pub fn crate_info() -> &'static str {
    "pyramid-input v0.1.0"
}
