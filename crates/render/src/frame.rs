use crate::composer::{Mvp, compose};
use crate::renderer::{Draw, RenderError, Renderer};
use crate::uniforms::UniformSet;
use pyramid_assets::Mesh;
use pyramid_common::AppConfig;
use pyramid_input::KeyInput;
use pyramid_kernel::{FrameSignal, TransformState, update};

/// Result of one frame through a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport<T> {
    /// 1-based index of the frame just rendered.
    pub frame: u64,
    pub signal: FrameSignal,
    pub output: T,
}

/// Owns the transform state and drives the per-frame pipeline:
/// poll input → update state → compose matrices → render.
#[derive(Debug, Clone)]
pub struct Session {
    state: TransformState,
    config: AppConfig,
    mesh: Mesh,
    draw: Draw,
    frame: u64,
}

impl Session {
    /// Start a session at the identity state. Fails if the configured mesh is
    /// malformed.
    pub fn new(config: AppConfig) -> Result<Self, RenderError> {
        let mesh = Mesh::builtin(config.model.mesh);
        mesh.validate()?;
        let draw = Draw::for_mesh(&mesh);
        tracing::info!(
            "session ready: mesh={} draw={:?} uniforms={:?}",
            mesh.name,
            draw,
            config.uniforms
        );
        Ok(Self {
            state: TransformState::new(),
            config,
            mesh,
            draw,
            frame: 0,
        })
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn draw(&self) -> Draw {
        self.draw
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Follow a surface resize. Only the aspect ratio changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.camera = self.config.camera.with_aspect(width, height);
    }

    /// Matrices for the current state, without advancing.
    pub fn mvp(&self) -> Mvp {
        compose(&self.state, &self.config.model, &self.config.camera)
    }

    /// Advance one frame: apply held keys, then compose the uniform map.
    pub fn step(&mut self, keys: &impl KeyInput, dt: f32) -> (FrameSignal, UniformSet) {
        let signal = update(&mut self.state, keys, &self.config.controls, dt);
        self.frame += 1;
        let uniforms = self.mvp().uniforms(self.config.uniforms);
        (signal, uniforms)
    }

    /// Advance one frame and hand the result to `renderer`.
    pub fn run_frame<R: Renderer>(
        &mut self,
        keys: &impl KeyInput,
        dt: f32,
        renderer: &mut R,
    ) -> Result<FrameReport<R::Output>, R::Error> {
        let (signal, uniforms) = self.step(keys, dt);
        let output = renderer.render(&uniforms, &self.draw)?;
        Ok(FrameReport {
            frame: self.frame,
            signal,
            output,
        })
    }
}
