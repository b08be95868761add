use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use pyramid_common::{AppConfig, Preset};
use pyramid_input::{HeldKeys, Key};
use pyramid_render::Session;
use pyramid_render_wgpu::WgpuRenderer;
use pyramid_tools::StateInspector;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "pyramid-desktop", about = "Pyramid viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Starting preset: z-up or y-up
    #[arg(long, default_value = "z-up")]
    preset: Preset,

    /// YAML file overriding fields of the preset
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Physical key to viewer control.
fn bind(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Key::Forward,
        KeyCode::KeyS | KeyCode::ArrowDown => Key::Back,
        KeyCode::KeyA | KeyCode::ArrowLeft => Key::Left,
        KeyCode::KeyD | KeyCode::ArrowRight => Key::Right,
        KeyCode::KeyQ => Key::RotateLeft,
        KeyCode::KeyE => Key::RotateRight,
        KeyCode::KeyR => Key::ScaleUp,
        KeyCode::KeyF => Key::ScaleDown,
        KeyCode::Escape => Key::Exit,
        _ => return None,
    };
    Some(key)
}

/// Application state.
struct AppState {
    session: Session,
    keys: HeldKeys,
    show_inspector: bool,
    last_frame: Instant,
}

impl AppState {
    fn new(session: Session) -> Self {
        Self {
            session,
            keys: HeldKeys::new(),
            show_inspector: true,
            last_frame: Instant::now(),
        }
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if let Some(key) = bind(code) {
            self.keys.set(key, pressed);
            return;
        }
        if pressed && code == KeyCode::F1 {
            self.show_inspector = !self.show_inspector;
        }
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_inspector {
            return;
        }

        let summary = StateInspector::summary(self.session.state(), self.session.frame());
        let controls = &self.session.config().controls;

        egui::SidePanel::left("inspector")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Pyramid");
                ui.separator();
                ui.label(format!("Frame: {}", summary.frame));
                ui.label(format!(
                    "Position: ({:.3}, {:.3}, {:.3})",
                    summary.position[0], summary.position[1], summary.position[2]
                ));
                ui.label(format!("Angle: {:.1}°", summary.rotation_angle_degrees));
                ui.label(format!(
                    "Scale: {:.3}  [{}, {}]",
                    summary.scale, controls.scale_min, controls.scale_max
                ));
                ui.label(format!(
                    "Rotation: {:?}  latch {}",
                    controls.rotation_mode,
                    if summary.rotation_pending {
                        "pending"
                    } else {
                        "idle"
                    }
                ));
                ui.label(format!("Held: {}", self.keys));

                ui.separator();
                ui.small("WASD/Arrows: Move | Q/E: Rotate | R/F: Scale");
                ui.small("F1: Toggle Inspector | Esc: Quit");
            });
    }
}

/// Window and GPU resources, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext, session: &Session) -> Result<Self> {
        let app = session.config();
        let attrs = Window::default_attributes()
            .with_title(app.window.title.clone())
            .with_inner_size(PhysicalSize::new(app.window.width, app.window.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("creating window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("pyramid_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("creating device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            session.mesh(),
            app.uniforms,
            app.window.clear_color,
        );

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    /// Draw the inspector overlay on top of the already-rendered frame.
    fn paint_ui(&mut self, egui_ctx: &EguiContext, state: &AppState, view: &wgpu::TextureView) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });

        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    /// First fatal error; returned from `main` after the loop exits.
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(session: Session) -> Self {
        Self {
            state: AppState::new(session),
            gpu: None,
            egui_ctx: EguiContext::default(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let now = Instant::now();
        let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
        self.state.last_frame = now;

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let report = {
            let mut frame = gpu.renderer.frame(&gpu.device, &gpu.queue, &view);
            self.state
                .session
                .run_frame(&self.state.keys, dt, &mut frame)
        };
        let report = match report {
            Ok(report) => report,
            Err(e) => {
                self.fail(event_loop, anyhow::Error::new(e).context("rendering frame"));
                return;
            }
        };

        gpu.paint_ui(&self.egui_ctx, &self.state, &view);
        output.present();

        if report.signal.is_exit() {
            tracing::info!("exit requested at frame {}", report.frame);
            event_loop.exit();
            return;
        }
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.egui_ctx, &self.state.session) {
            Ok(gpu) => {
                self.state
                    .session
                    .resize(gpu.config.width, gpu.config.height);
                self.state.last_frame = Instant::now();
                self.gpu = Some(gpu);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                    self.state
                        .session
                        .resize(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.keys.clear();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn load_config(preset: Preset, path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path, preset)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(preset.config()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("pyramid-desktop starting with {} preset", cli.preset);

    let config = load_config(cli.preset, cli.config.as_ref())?;
    let session = Session::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(session);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_letters_share_bindings() {
        assert_eq!(bind(KeyCode::KeyW), Some(Key::Forward));
        assert_eq!(bind(KeyCode::ArrowUp), Some(Key::Forward));
        assert_eq!(bind(KeyCode::ArrowLeft), Some(Key::Left));
        assert_eq!(bind(KeyCode::Escape), Some(Key::Exit));
        assert_eq!(bind(KeyCode::F1), None);
    }

    #[test]
    fn held_keys_follow_press_and_release() {
        let session = Session::new(Preset::ZUp.config()).unwrap();
        let mut state = AppState::new(session);
        state.handle_key(KeyCode::KeyQ, true);
        assert!(state.keys.contains(Key::RotateLeft));
        state.handle_key(KeyCode::KeyQ, false);
        assert!(state.keys.is_empty());

        state.handle_key(KeyCode::F1, true);
        assert!(!state.show_inspector);
        assert!(state.keys.is_empty());
    }
}
