use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How the two rotation keys change the rotation angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// One step per physical press. Holding the key does not repeat.
    Discrete,
    /// One step per frame for as long as the key is held.
    Continuous,
}

/// Which model axes the scale factor stretches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleAxes {
    Uniform,
    XOnly,
    YOnly,
    ZOnly,
}

impl ScaleAxes {
    /// Expand a scalar factor into the per-axis scale vector.
    pub fn apply(self, factor: f32) -> Vec3 {
        match self {
            Self::Uniform => Vec3::splat(factor),
            Self::XOnly => Vec3::new(factor, 1.0, 1.0),
            Self::YOnly => Vec3::new(1.0, factor, 1.0),
            Self::ZOnly => Vec3::new(1.0, 1.0, factor),
        }
    }
}

/// Shape of the uniform map handed to the render back end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniformLayout {
    /// A single pre-multiplied `transform` matrix.
    #[default]
    Combined,
    /// Separate `model`, `view` and `projection` matrices.
    Separate,
}

impl UniformLayout {
    pub const TRANSFORM: &'static str = "transform";
    pub const MODEL: &'static str = "model";
    pub const VIEW: &'static str = "view";
    pub const PROJECTION: &'static str = "projection";

    /// Uniform names in the order the shader declares them.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Self::Combined => &[Self::TRANSFORM],
            Self::Separate => &[Self::MODEL, Self::VIEW, Self::PROJECTION],
        }
    }
}

/// Built-in pyramid meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    /// Five shared vertices drawn through an index buffer, apex on +Z.
    IndexedSquarePyramid,
    /// Eighteen vertices, one flat color per face, apex on +Y.
    FlatShadedPyramid,
}
