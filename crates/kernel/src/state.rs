use glam::Vec3;
use pyramid_input::RotationLatch;

/// Mutable transform of the single rendered object.
///
/// Owned by the frame loop, mutated by [`crate::update`] and read by the
/// transform composer. Holds no resources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// Translation applied last, in world units.
    pub position: Vec3,
    /// Accumulated rotation about the configured axis. Not wrapped.
    pub rotation_angle_degrees: f32,
    /// Scale factor, spread over the configured scale axes.
    pub scale: f32,
    /// Edge-trigger guard for discrete rotation.
    pub latch: RotationLatch,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_angle_degrees: 0.0,
            scale: 1.0,
            latch: RotationLatch::Idle,
        }
    }
}

impl TransformState {
    /// Identity state: origin, no rotation, unit scale, latch idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a discrete rotation has fired and its keys are still down.
    pub fn rotation_pending(&self) -> bool {
        self.latch.is_pending()
    }

    pub fn is_identity(&self) -> bool {
        self.position == Vec3::ZERO && self.rotation_angle_degrees == 0.0 && self.scale == 1.0
    }
}
