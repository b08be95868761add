use crate::defaults;
use crate::types::{MeshKind, RotationMode, ScaleAxes, UniformLayout};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("unknown preset `{0}` (expected `z-up` or `y-up`)")]
    UnknownPreset(String),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Keyboard response tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlConfig {
    pub move_speed: f32,
    pub rotation_step_degrees: f32,
    pub rotation_mode: RotationMode,
    pub scale_step: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// Multiply continuous increments by the frame's delta time.
    pub use_delta_time: bool,
    /// Direction added by "forward" (and subtracted by "back").
    pub forward_axis: Vec3,
    /// Direction added by "right" (and subtracted by "left").
    pub right_axis: Vec3,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            move_speed: defaults::MOVE_SPEED,
            rotation_step_degrees: defaults::ROTATION_STEP_DEGREES,
            rotation_mode: RotationMode::Discrete,
            scale_step: defaults::SCALE_STEP,
            scale_min: defaults::SCALE_MIN,
            scale_max: defaults::SCALE_MAX,
            use_delta_time: false,
            forward_axis: Vec3::Z,
            right_axis: Vec3::new(-1.0, 1.0, 0.0),
        }
    }
}

/// Fixed camera used for view and projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraParameters {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_degrees: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            eye: Vec3::splat(2.0),
            target: Vec3::ZERO,
            up: Vec3::Z,
            fov_degrees: defaults::FOV_DEGREES,
            aspect_ratio: defaults::ASPECT_RATIO,
            near: defaults::NEAR_PLANE,
            far: defaults::FAR_PLANE,
        }
    }
}

impl CameraParameters {
    /// Copy of these parameters with the aspect ratio of a `width` x `height`
    /// surface. Zero extents are treated as one pixel.
    pub fn with_aspect(self, width: u32, height: u32) -> Self {
        Self {
            aspect_ratio: width.max(1) as f32 / height.max(1) as f32,
            ..self
        }
    }

    /// Right-handed look-at from `eye` toward `target`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Right-handed perspective with a `[0, 1]` depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// How the single object is placed and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Point (in object space) the rotation turns around.
    pub pivot: Vec3,
    pub rotation_axis: Vec3,
    pub scale_axes: ScaleAxes,
    pub mesh: MeshKind,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            pivot: Vec3::ZERO,
            rotation_axis: Vec3::Z,
            scale_axes: ScaleAxes::ZOnly,
            mesh: MeshKind::IndexedSquarePyramid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Pyramid Viewer".into(),
            width: defaults::WINDOW_WIDTH,
            height: defaults::WINDOW_HEIGHT,
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub controls: ControlConfig,
    pub camera: CameraParameters,
    pub model: ModelConfig,
    pub uniforms: UniformLayout,
    pub window: WindowConfig,
}

/// Named starting configurations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    /// Z-up scene seen from (2, 2, 2): latched 30° turns, Z-only scaling.
    #[default]
    ZUp,
    /// Y-up scene seen from (0, 0, 3): continuous turns about the apex,
    /// uniform scaling, flat-shaded faces.
    YUp,
}

impl Preset {
    pub fn config(self) -> AppConfig {
        match self {
            Self::ZUp => AppConfig::default(),
            Self::YUp => AppConfig {
                controls: ControlConfig {
                    move_speed: 0.1,
                    rotation_step_degrees: 5.0,
                    rotation_mode: RotationMode::Continuous,
                    scale_step: 0.05,
                    scale_min: 0.05,
                    scale_max: 100.0,
                    use_delta_time: false,
                    forward_axis: Vec3::Y,
                    right_axis: Vec3::X,
                },
                camera: CameraParameters {
                    eye: Vec3::new(0.0, 0.0, 3.0),
                    up: Vec3::Y,
                    ..CameraParameters::default()
                },
                model: ModelConfig {
                    pivot: Vec3::new(0.0, 0.4, 0.0),
                    rotation_axis: Vec3::Y,
                    scale_axes: ScaleAxes::Uniform,
                    mesh: MeshKind::FlatShadedPyramid,
                },
                uniforms: UniformLayout::Separate,
                window: WindowConfig {
                    title: "Pyramid Viewer (Y-up)".into(),
                    clear_color: [0.0, 0.0, 0.0, 1.0],
                    ..WindowConfig::default()
                },
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZUp => f.write_str("z-up"),
            Self::YUp => f.write_str("y-up"),
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "z-up" | "zup" => Ok(Self::ZUp),
            "y-up" | "yup" => Ok(Self::YUp),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl AppConfig {
    /// Load a YAML file on top of `base`. Fields the file leaves out keep the
    /// preset's values.
    pub fn load(path: impl AsRef<Path>, base: Preset) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text, base)?;
        tracing::info!("loaded config from {} (base preset {base})", path.display());
        Ok(config)
    }

    /// Parse YAML text on top of `base` and validate the result.
    pub fn from_yaml_str(text: &str, base: Preset) -> Result<Self, ConfigError> {
        let mut merged = serde_yaml::to_value(base.config())?;
        let overlay: Value = serde_yaml::from_str(text)?;
        merge_yaml(&mut merged, overlay);
        let config: Self = serde_yaml::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the update and compose steps cannot handle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.controls;
        if !c.move_speed.is_finite() || c.move_speed < 0.0 {
            return Err(invalid("controls.move_speed", "must be finite and >= 0"));
        }
        if !c.rotation_step_degrees.is_finite() {
            return Err(invalid("controls.rotation_step_degrees", "must be finite"));
        }
        if !c.scale_step.is_finite() || c.scale_step < 0.0 {
            return Err(invalid("controls.scale_step", "must be finite and >= 0"));
        }
        if !c.scale_min.is_finite() || c.scale_min <= 0.0 {
            return Err(invalid("controls.scale_min", "must be finite and > 0"));
        }
        if !c.scale_max.is_finite() || c.scale_max < c.scale_min {
            return Err(invalid(
                "controls.scale_max",
                format!("must be finite and >= scale_min ({})", c.scale_min),
            ));
        }
        if !c.forward_axis.is_finite() {
            return Err(invalid("controls.forward_axis", "must be finite"));
        }
        if !c.right_axis.is_finite() {
            return Err(invalid("controls.right_axis", "must be finite"));
        }

        let m = &self.model;
        if !m.pivot.is_finite() {
            return Err(invalid("model.pivot", "must be finite"));
        }
        if !m.rotation_axis.is_finite() || m.rotation_axis.length_squared() <= f32::EPSILON {
            return Err(invalid("model.rotation_axis", "must be a non-zero vector"));
        }

        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(invalid("camera.fov_degrees", "must be in (0, 180)"));
        }
        if !cam.aspect_ratio.is_finite() || cam.aspect_ratio <= 0.0 {
            return Err(invalid("camera.aspect_ratio", "must be finite and > 0"));
        }
        if !cam.near.is_finite() || cam.near <= 0.0 {
            return Err(invalid("camera.near", "must be finite and > 0"));
        }
        if !cam.far.is_finite() || cam.far <= cam.near {
            return Err(invalid("camera.far", "must be finite and > near"));
        }
        let look = cam.target - cam.eye;
        if !look.is_finite() || look.length_squared() <= f32::EPSILON {
            return Err(invalid("camera.target", "must differ from camera.eye"));
        }
        if !cam.up.is_finite() || look.cross(cam.up).length_squared() <= f32::EPSILON {
            return Err(invalid(
                "camera.up",
                "must be non-zero and not parallel to the view direction",
            ));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window", "width and height must be > 0"));
        }
        Ok(())
    }
}

/// Deep-merge `overlay` into `base`: mappings merge key by key, anything else
/// replaces. A null overlay (an empty document) leaves `base` untouched.
fn merge_yaml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_yaml(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
