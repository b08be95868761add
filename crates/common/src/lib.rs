//! Shared configuration for the pyramid viewer.
//!
//! Every tunable number has a compile-time default in [`defaults`]. The two
//! [`Preset`]s bundle those numbers into complete [`AppConfig`]s, and a YAML
//! file may override any field of a preset.
//!
//! # Invariants
//! - A config returned by [`AppConfig::load`] has passed [`AppConfig::validate`].
//! - Scale bounds are strictly positive and ordered, so no degenerate scale
//!   ever reaches the transform composer.

pub mod config;
pub mod defaults;
mod types;

pub use config::{
    AppConfig, CameraParameters, ConfigError, ControlConfig, ModelConfig, Preset, WindowConfig,
};
pub use types::{MeshKind, RotationMode, ScaleAxes, UniformLayout};

pub fn crate_info() -> &'static str {
    "pyramid-common v0.1.0"
}
