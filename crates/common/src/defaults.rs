//! Compile-time defaults. These are the values of the default (Z-up) preset.

/// Position delta per frame (or per second with delta-time integration).
pub const MOVE_SPEED: f32 = 0.001;
/// Angle applied by one discrete rotation press.
pub const ROTATION_STEP_DEGREES: f32 = 30.0;
/// Scale delta per frame (or per second with delta-time integration).
pub const SCALE_STEP: f32 = 0.001;
pub const SCALE_MIN: f32 = 0.1;
pub const SCALE_MAX: f32 = 5.0;

pub const FOV_DEGREES: f32 = 45.0;
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const ASPECT_RATIO: f32 = WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;
