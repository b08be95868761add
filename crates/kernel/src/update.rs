use crate::state::TransformState;
use glam::Vec3;
use pyramid_common::{ControlConfig, RotationMode};
use pyramid_input::{Key, KeyInput};

/// What the frame loop should do after this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSignal {
    Continue,
    /// The exit key was held. The state was still updated for this frame.
    Exit,
}

impl FrameSignal {
    pub fn is_exit(self) -> bool {
        self == FrameSignal::Exit
    }
}

/// Apply one frame of held keys to `state`.
///
/// `dt` is the frame time in seconds. It is only used when
/// `controls.use_delta_time` is set; otherwise every continuous increment is a
/// fixed per-frame delta. A negative or non-finite `dt` counts as zero.
/// Discrete rotation steps never scale with `dt`.
pub fn update(
    state: &mut TransformState,
    keys: &impl KeyInput,
    controls: &ControlConfig,
    dt: f32,
) -> FrameSignal {
    let rate = if !controls.use_delta_time {
        1.0
    } else if dt.is_finite() {
        dt.max(0.0)
    } else {
        tracing::debug!("ignoring non-finite frame time {dt}");
        0.0
    };

    // Translation
    let mut direction = Vec3::ZERO;
    if keys.is_held(Key::Forward) {
        direction += controls.forward_axis;
    }
    if keys.is_held(Key::Back) {
        direction -= controls.forward_axis;
    }
    if keys.is_held(Key::Right) {
        direction += controls.right_axis;
    }
    if keys.is_held(Key::Left) {
        direction -= controls.right_axis;
    }
    if direction != Vec3::ZERO {
        state.position += direction * (controls.move_speed * rate);
    }

    // Rotation
    let left = keys.is_held(Key::RotateLeft);
    let right = keys.is_held(Key::RotateRight);
    match controls.rotation_mode {
        RotationMode::Discrete => {
            if let Some(dir) = state.latch.poll(left, right) {
                state.rotation_angle_degrees += dir.sign() * controls.rotation_step_degrees;
                tracing::debug!(
                    "rotation step {:?}: angle now {:.1} deg",
                    dir,
                    state.rotation_angle_degrees
                );
            }
        }
        RotationMode::Continuous => {
            let step = controls.rotation_step_degrees * rate;
            if left {
                state.rotation_angle_degrees -= step;
            }
            if right {
                state.rotation_angle_degrees += step;
            }
        }
    }

    // Scale
    let step = controls.scale_step * rate;
    if keys.is_held(Key::ScaleUp) {
        state.scale += step;
    }
    if keys.is_held(Key::ScaleDown) {
        state.scale -= step;
    }
    let clamped = state.scale.max(controls.scale_min).min(controls.scale_max);
    if clamped != state.scale {
        tracing::debug!(
            "scale {:.4} clamped to {:.4} (bounds [{}, {}])",
            state.scale,
            clamped,
            controls.scale_min,
            controls.scale_max
        );
        state.scale = clamped;
    }

    tracing::trace!(
        "state: pos=({:.3}, {:.3}, {:.3}) angle={:.1} scale={:.3}",
        state.position.x,
        state.position.y,
        state.position.z,
        state.rotation_angle_degrees,
        state.scale
    );

    if keys.is_held(Key::Exit) {
        tracing::info!("exit requested");
        FrameSignal::Exit
    } else {
        FrameSignal::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyramid_common::Preset;
    use pyramid_input::HeldKeys;

    fn held(keys: &[Key]) -> HeldKeys {
        keys.iter().copied().collect()
    }

    fn controls() -> ControlConfig {
        Preset::ZUp.config().controls
    }

    #[test]
    fn no_keys_leaves_state_alone() {
        let mut s = TransformState::new();
        let signal = update(&mut s, &HeldKeys::NONE, &controls(), 0.016);
        assert_eq!(signal, FrameSignal::Continue);
        assert_eq!(s, TransformState::new());
    }

    #[test]
    fn forward_moves_along_forward_axis_each_frame() {
        let c = controls();
        let mut s = TransformState::new();
        let keys = held(&[Key::Forward]);
        let mut last = s.position.z;
        for _ in 0..50 {
            update(&mut s, &keys, &c, 0.0);
            assert!(s.position.z > last);
            assert!((s.position.z - last - c.move_speed).abs() < 1e-6);
            last = s.position.z;
        }
    }

    #[test]
    fn forward_100_frames_reaches_one_tenth() {
        let c = controls();
        let mut s = TransformState::new();
        let keys = held(&[Key::Forward]);
        for _ in 0..100 {
            update(&mut s, &keys, &c, 0.0);
        }
        assert!((s.position.z - 0.100).abs() < 1e-5);
        assert_eq!(s.position.x, 0.0);
        assert_eq!(s.position.y, 0.0);
        assert_eq!(s.rotation_angle_degrees, 0.0);
        assert_eq!(s.scale, 1.0);
        assert!(!s.rotation_pending());
    }

    #[test]
    fn back_cancels_forward() {
        let mut s = TransformState::new();
        update(&mut s, &held(&[Key::Forward, Key::Back]), &controls(), 0.0);
        assert_eq!(s.position, Vec3::ZERO);
    }

    #[test]
    fn right_axis_can_couple_two_components() {
        let c = controls();
        let mut s = TransformState::new();
        update(&mut s, &held(&[Key::Right]), &c, 0.0);
        assert_eq!(s.position, Vec3::new(-c.move_speed, c.move_speed, 0.0));
        update(&mut s, &held(&[Key::Left]), &c, 0.0);
        update(&mut s, &held(&[Key::Left]), &c, 0.0);
        assert_eq!(s.position, Vec3::new(c.move_speed, -c.move_speed, 0.0));
    }

    #[test]
    fn held_rotate_left_fires_once() {
        let c = controls();
        let mut s = TransformState::new();
        let keys = held(&[Key::RotateLeft]);
        for _ in 0..5 {
            update(&mut s, &keys, &c, 0.0);
        }
        update(&mut s, &HeldKeys::NONE, &c, 0.0);
        assert_eq!(s.rotation_angle_degrees, -30.0);
        assert!(!s.rotation_pending());
    }

    #[test]
    fn re_press_fires_again() {
        let c = controls();
        let mut s = TransformState::new();
        let keys = held(&[Key::RotateRight]);
        update(&mut s, &keys, &c, 0.0);
        update(&mut s, &keys, &c, 0.0);
        update(&mut s, &HeldKeys::NONE, &c, 0.0);
        update(&mut s, &keys, &c, 0.0);
        assert_eq!(s.rotation_angle_degrees, 60.0);
    }

    #[test]
    fn continuous_rotation_repeats_every_frame() {
        let c = Preset::YUp.config().controls;
        let mut s = TransformState::new();
        let keys = held(&[Key::RotateRight]);
        for _ in 0..4 {
            update(&mut s, &keys, &c, 0.0);
        }
        assert_eq!(s.rotation_angle_degrees, 20.0);
        assert!(!s.rotation_pending());
    }

    #[test]
    fn scale_clamps_at_max() {
        let c = controls();
        let mut s = TransformState::new();
        let keys = held(&[Key::ScaleUp]);
        for _ in 0..10_000 {
            update(&mut s, &keys, &c, 0.0);
            assert!(s.scale <= c.scale_max);
        }
        assert_eq!(s.scale, 5.0);
    }

    #[test]
    fn scale_clamps_at_min() {
        let c = controls();
        let mut s = TransformState::new();
        let keys = held(&[Key::ScaleDown]);
        for _ in 0..10_000 {
            update(&mut s, &keys, &c, 0.0);
            assert!(s.scale >= c.scale_min);
        }
        assert_eq!(s.scale, c.scale_min);
    }

    #[test]
    fn out_of_range_scale_is_clamped_without_keys() {
        let c = controls();
        let mut s = TransformState {
            scale: 42.0,
            ..TransformState::default()
        };
        update(&mut s, &HeldKeys::NONE, &c, 0.0);
        assert_eq!(s.scale, c.scale_max);
    }

    #[test]
    fn delta_time_scales_continuous_increments() {
        let mut c = controls();
        c.use_delta_time = true;
        c.move_speed = 2.0;
        c.scale_step = 1.0;
        let mut s = TransformState::new();
        update(&mut s, &held(&[Key::Forward, Key::ScaleUp]), &c, 0.25);
        assert_eq!(s.position.z, 0.5);
        assert_eq!(s.scale, 1.25);
    }

    #[test]
    fn non_finite_delta_time_counts_as_zero() {
        let mut c = controls();
        c.use_delta_time = true;
        let keys = held(&[Key::Forward, Key::ScaleUp, Key::RotateRight]);
        let mut s = TransformState::new();
        for dt in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            update(&mut s, &keys, &c, dt);
            update(&mut s, &HeldKeys::NONE, &c, dt);
        }
        assert_eq!(s.position, Vec3::ZERO);
        assert_eq!(s.scale, 1.0);
        // Discrete steps still fire, once per press.
        assert_eq!(s.rotation_angle_degrees, 90.0);

        c.rotation_mode = RotationMode::Continuous;
        update(&mut s, &keys, &c, f32::NAN);
        assert_eq!(s.rotation_angle_degrees, 90.0);
        assert!(s.position.is_finite());
    }

    #[test]
    fn delta_time_does_not_scale_discrete_steps() {
        let mut c = controls();
        c.use_delta_time = true;
        let mut s = TransformState::new();
        update(&mut s, &held(&[Key::RotateLeft]), &c, 0.001);
        assert_eq!(s.rotation_angle_degrees, -30.0);
    }

    #[test]
    fn dt_ignored_without_delta_time() {
        let c = controls();
        let mut a = TransformState::new();
        let mut b = TransformState::new();
        update(&mut a, &held(&[Key::Forward]), &c, 0.001);
        update(&mut b, &held(&[Key::Forward]), &c, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn exit_key_signals_and_still_updates() {
        let c = controls();
        let mut s = TransformState::new();
        let signal = update(&mut s, &held(&[Key::Exit, Key::Forward]), &c, 0.0);
        assert!(signal.is_exit());
        assert_eq!(s.position.z, c.move_speed);
    }
}
