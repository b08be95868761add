//! End-to-end frame scenarios: scripted keys through update, compose and a
//! text renderer.

use glam::Mat4;
use pyramid_common::{AppConfig, Preset, UniformLayout};
use pyramid_input::{HeldKeys, Key, KeyScript};
use pyramid_render::{DebugTextRenderer, Session};

fn run(config: AppConfig, script: &str) -> Session {
    let script: KeyScript = script.parse().unwrap();
    let mut session = Session::new(config).unwrap();
    for keys in script.frames() {
        session.step(&keys, 1.0 / 60.0);
    }
    session
}

#[test]
fn forward_for_100_frames() {
    let session = run(Preset::ZUp.config(), "forward*100");
    let s = session.state();
    assert!((s.position.z - 0.100).abs() < 1e-5);
    assert_eq!(s.position.x, 0.0);
    assert_eq!(s.position.y, 0.0);
    assert_eq!(s.rotation_angle_degrees, 0.0);
    assert_eq!(s.scale, 1.0);
    assert_eq!(session.frame(), 100);
}

#[test]
fn held_rotation_is_one_step() {
    let session = run(Preset::ZUp.config(), "rotate-left*5, none");
    assert_eq!(session.state().rotation_angle_degrees, -30.0);

    let session = run(Preset::ZUp.config(), "rotate-left*5, none, rotate-left*5, none");
    assert_eq!(session.state().rotation_angle_degrees, -60.0);
}

#[test]
fn scale_up_clamps_at_five() {
    let session = run(Preset::ZUp.config(), "scale-up*10000");
    assert_eq!(session.state().scale, 5.0);
}

#[test]
fn identity_composes_to_view_projection() {
    let config = Preset::ZUp.config();
    let session = Session::new(config.clone()).unwrap();
    let transform = session
        .mvp()
        .uniforms(UniformLayout::Combined)
        .get("transform")
        .unwrap();
    assert!(transform.abs_diff_eq(config.camera.view_projection(), 1e-6));
}

#[test]
fn y_up_preset_moves_on_y_and_spins_continuously() {
    let session = run(Preset::YUp.config(), "forward*3, rotate-right*6");
    let s = session.state();
    assert!((s.position.y - 0.3).abs() < 1e-5);
    assert!((s.rotation_angle_degrees - 30.0).abs() < 1e-4);
}

#[test]
fn delta_time_from_yaml() {
    let config = AppConfig::from_yaml_str(
        "controls:\n  use_delta_time: true\n  move_speed: 1.2\n",
        Preset::ZUp,
    )
    .unwrap();
    let mut session = Session::new(config).unwrap();
    let keys: HeldKeys = [Key::Forward].into_iter().collect();
    for _ in 0..60 {
        session.step(&keys, 1.0 / 60.0);
    }
    assert!((session.state().position.z - 1.2).abs() < 1e-4);
}

#[test]
fn text_renderer_sees_separate_matrices() {
    let config = Preset::YUp.config();
    let mut renderer = DebugTextRenderer::new(config.uniforms);
    let mut session = Session::new(config).unwrap();
    let report = session
        .run_frame(&HeldKeys::NONE, 0.0, &mut renderer)
        .unwrap();
    for name in ["model:", "view:", "projection:"] {
        assert!(report.output.contains(name));
    }
    assert!(report.output.contains("draw(18)"));
    assert_eq!(session.mvp().model, Mat4::IDENTITY);
}
