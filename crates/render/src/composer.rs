use crate::uniforms::UniformSet;
use glam::{Mat4, Vec3};
use pyramid_common::{CameraParameters, ModelConfig, UniformLayout};
use pyramid_kernel::TransformState;

/// Model, view and projection matrices for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mvp {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Mvp {
    /// projection · view · model
    pub fn combined(&self) -> Mat4 {
        self.projection * self.view * self.model
    }

    /// The uniform map a shader with the given layout expects.
    pub fn uniforms(&self, layout: UniformLayout) -> UniformSet {
        match layout {
            UniformLayout::Combined => {
                UniformSet::new(layout, vec![(UniformLayout::TRANSFORM, self.combined())])
            }
            UniformLayout::Separate => UniformSet::new(
                layout,
                vec![
                    (UniformLayout::MODEL, self.model),
                    (UniformLayout::VIEW, self.view),
                    (UniformLayout::PROJECTION, self.projection),
                ],
            ),
        }
    }
}

/// Object-to-world matrix: `T(position) · T(pivot) · R · T(-pivot) · S`.
///
/// Applied to a vertex this scales first, then rotates about `pivot`, then
/// translates. With a zero pivot it is plain `T · R · S`.
pub fn model_matrix(state: &TransformState, model: &ModelConfig) -> Mat4 {
    let axis = model.rotation_axis.normalize_or(Vec3::Z);
    let rotation = Mat4::from_axis_angle(axis, state.rotation_angle_degrees.to_radians());
    let scale = Mat4::from_scale(model.scale_axes.apply(state.scale));

    Mat4::from_translation(state.position)
        * Mat4::from_translation(model.pivot)
        * rotation
        * Mat4::from_translation(-model.pivot)
        * scale
}

/// Compose this frame's matrices from the current state and fixed camera.
pub fn compose(state: &TransformState, model: &ModelConfig, camera: &CameraParameters) -> Mvp {
    Mvp {
        model: model_matrix(state, model),
        view: camera.view_matrix(),
        projection: camera.projection_matrix(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyramid_common::{Preset, ScaleAxes};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_state_gives_view_projection() {
        for preset in [Preset::ZUp, Preset::YUp] {
            let cfg = preset.config();
            let mvp = compose(&TransformState::new(), &cfg.model, &cfg.camera);
            assert_eq!(mvp.model, Mat4::IDENTITY);
            assert!(
                mvp.combined()
                    .abs_diff_eq(cfg.camera.view_projection(), 1e-6)
            );
        }
    }

    #[test]
    fn scale_then_rotate_then_translate() {
        let model = ModelConfig {
            pivot: Vec3::ZERO,
            rotation_axis: Vec3::Z,
            scale_axes: ScaleAxes::Uniform,
            ..ModelConfig::default()
        };
        let state = TransformState {
            position: Vec3::new(10.0, 0.0, 0.0),
            rotation_angle_degrees: 90.0,
            scale: 2.0,
            ..TransformState::default()
        };
        let m = model_matrix(&state, &model);
        // (1,0,0) -> scale (2,0,0) -> rotate 90 about Z (0,2,0) -> translate (10,2,0)
        assert!(approx(
            m.transform_point3(Vec3::X),
            Vec3::new(10.0, 2.0, 0.0)
        ));
    }

    #[test]
    fn rotation_keeps_pivot_fixed() {
        let cfg = Preset::YUp.config();
        let state = TransformState {
            rotation_angle_degrees: 73.0,
            ..TransformState::default()
        };
        let m = model_matrix(&state, &cfg.model);
        assert!(approx(m.transform_point3(cfg.model.pivot), cfg.model.pivot));
        // A point off the pivot does move.
        assert!(!approx(m.transform_point3(Vec3::X), Vec3::X));
    }

    #[test]
    fn z_only_scale_leaves_base_alone() {
        let cfg = Preset::ZUp.config();
        let state = TransformState {
            scale: 3.0,
            ..TransformState::default()
        };
        let m = model_matrix(&state, &cfg.model);
        assert!(approx(
            m.transform_point3(Vec3::new(0.5, -0.5, 0.0)),
            Vec3::new(0.5, -0.5, 0.0)
        ));
        assert!(approx(
            m.transform_point3(Vec3::new(0.0, 0.0, 1.0)),
            Vec3::new(0.0, 0.0, 3.0)
        ));
    }

    #[test]
    fn negative_angle_turns_clockwise() {
        let cfg = Preset::ZUp.config();
        let state = TransformState {
            rotation_angle_degrees: -90.0,
            ..TransformState::default()
        };
        let m = model_matrix(&state, &cfg.model);
        assert!(approx(m.transform_point3(Vec3::X), Vec3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn unnormalized_axis_is_normalized() {
        let mut cfg = Preset::ZUp.config();
        cfg.model.rotation_axis = Vec3::new(0.0, 0.0, 5.0);
        let state = TransformState {
            rotation_angle_degrees: 90.0,
            ..TransformState::default()
        };
        let m = model_matrix(&state, &cfg.model);
        assert!(approx(m.transform_point3(Vec3::X), Vec3::Y));
    }

    #[test]
    fn combined_layout_has_single_transform() {
        let cfg = Preset::ZUp.config();
        let mvp = compose(&TransformState::new(), &cfg.model, &cfg.camera);
        let uniforms = mvp.uniforms(UniformLayout::Combined);
        assert_eq!(uniforms.len(), 1);
        assert_eq!(uniforms.get("transform"), Some(mvp.combined()));
        assert_eq!(uniforms.get("model"), None);
    }

    #[test]
    fn separate_layout_has_three_matrices() {
        let cfg = Preset::YUp.config();
        let state = TransformState {
            position: Vec3::new(0.3, 0.0, 0.0),
            ..TransformState::default()
        };
        let mvp = compose(&state, &cfg.model, &cfg.camera);
        let uniforms = mvp.uniforms(UniformLayout::Separate);
        assert_eq!(uniforms.get("model"), Some(mvp.model));
        assert_eq!(uniforms.get("view"), Some(mvp.view));
        assert_eq!(uniforms.get("projection"), Some(mvp.projection));
    }
}
