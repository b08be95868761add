use pyramid_kernel::TransformState;
use serde::Serialize;

/// Transform state inspector.
///
/// Read-only queries for debugging overlays and command-line output.
pub struct StateInspector;

impl StateInspector {
    /// Snapshot of the state after `frame` frames.
    pub fn summary(state: &TransformState, frame: u64) -> StateSummary {
        let p = state.position;
        StateSummary {
            frame,
            position: [p.x, p.y, p.z],
            rotation_angle_degrees: state.rotation_angle_degrees,
            scale: state.scale,
            rotation_pending: state.rotation_pending(),
        }
    }
}

/// Plain-data snapshot of the transform state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    pub frame: u64,
    pub position: [f32; 3],
    pub rotation_angle_degrees: f32,
    pub scale: f32,
    pub rotation_pending: bool,
}

impl std::fmt::Display for StateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frame={} pos=({:.3}, {:.3}, {:.3}) angle={:.1} scale={:.3} latch={}",
            self.frame,
            self.position[0],
            self.position[1],
            self.position[2],
            self.rotation_angle_degrees,
            self.scale,
            if self.rotation_pending {
                "pending"
            } else {
                "idle"
            },
        )
    }
}
