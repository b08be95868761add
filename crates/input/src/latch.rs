/// Direction of a discrete rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Left,
    Right,
}

impl RotationDirection {
    /// Left turns by a negative angle, right by a positive one.
    pub fn sign(self) -> f32 {
        match self {
            RotationDirection::Left => -1.0,
            RotationDirection::Right => 1.0,
        }
    }
}

/// Edge-trigger guard over the pair of rotation keys.
///
/// A step fires on the first frame either key is held while `Idle`, then the
/// latch stays `Pending` until both keys read as released. Releasing only one
/// key of a held pair does not re-arm it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RotationLatch {
    #[default]
    Idle,
    Pending,
}

impl RotationLatch {
    /// Advance the latch by one frame. Returns the direction to rotate, if a
    /// step fires this frame. Left wins when both keys go down together.
    pub fn poll(&mut self, left_held: bool, right_held: bool) -> Option<RotationDirection> {
        match self {
            RotationLatch::Idle => {
                let fired = if left_held {
                    Some(RotationDirection::Left)
                } else if right_held {
                    Some(RotationDirection::Right)
                } else {
                    None
                };
                if fired.is_some() {
                    *self = RotationLatch::Pending;
                }
                fired
            }
            RotationLatch::Pending => {
                if !left_held && !right_held {
                    *self = RotationLatch::Idle;
                }
                None
            }
        }
    }

    pub fn is_pending(self) -> bool {
        self == RotationLatch::Pending
    }
}
