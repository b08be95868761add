//! Developer tooling: read-only views of the transform state for the desktop
//! overlay and the CLI.

mod inspector;

pub use inspector::{StateInspector, StateSummary};

pub fn crate_info() -> &'static str {
    "pyramid-tools v0.1.0"
}
