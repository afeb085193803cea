use std::sync::{Arc, Mutex};
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use logo_viewer::camera::OrbitCamera;
use logo_viewer::cli::Cli;
use logo_viewer::config::SceneConfig;
use logo_viewer::light::LightControl;
use logo_viewer::loaders::load_svg_file;
use logo_viewer::renderer::MeshRenderer;
use logo_viewer::scenes::{create_box_scene, create_logo_scene, Scene, SceneKind};
use logo_viewer::spin::Spin;

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_ORBIT_RADIUS: f32 = 5.0;

struct App {
    cli: Cli,
    config: SceneConfig,
    window: Option<Arc<Window>>,
    renderer: Option<MeshRenderer>,
    scene: Option<Scene>,
    camera: OrbitCamera,
    light: Arc<Mutex<LightControl>>,
    spin: Spin,
    last_frame_time: Instant,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli, config: SceneConfig) -> Self {
        let mut control = LightControl::new();
        if let Some(intensity) = cli.intensity {
            control.set(intensity);
        }

        Self {
            cli,
            config,
            window: None,
            renderer: None,
            scene: None,
            camera: OrbitCamera::new(glam::Vec3::ZERO, DEFAULT_ORBIT_RADIUS),
            light: Arc::new(Mutex::new(control)),
            spin: Spin::default(),
            last_frame_time: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
        }
    }

    /// Composes the requested scene. A failed logo asset load falls back
    /// to the box scene instead of a blank render.
    fn build_scene(&self, kind: SceneKind) -> Scene {
        match kind {
            SceneKind::Box => create_box_scene(&self.config),
            SceneKind::Logo => match load_svg_file(&self.config.asset_path) {
                Ok(paths) => create_logo_scene(&self.config, &paths),
                Err(e) => {
                    log::error!("{e}; falling back to box scene");
                    create_box_scene(&self.config)
                }
            },
        }
    }

    /// Mounts a scene: uploads it and resets camera and spin state.
    fn mount_scene(&mut self, scene: Scene) {
        self.camera = OrbitCamera::new(glam::Vec3::ZERO, DEFAULT_ORBIT_RADIUS);
        if let Some(orbit) = &scene.orbit {
            self.camera.target = orbit.target;
            self.camera.auto_rotate_speed = orbit.auto_rotate_speed;
            self.camera.interactive = true;
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.upload_scene(&scene);
        }
        self.scene = Some(scene);
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            log::debug!("FPS: {:.1}", self.fps);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.update_fps(delta);
        self.camera.update(delta);

        // Per-frame rotation; skipped cleanly while no scene is mounted.
        if let Err(e) = self.spin.apply_to(self.scene.as_mut(), 1) {
            log::debug!("spin skipped: {e}");
        }

        // The one hand-off from the light control into the scene.
        let intensity = self.light.lock().unwrap().value();
        if let Some(scene) = &mut self.scene {
            scene.set_ambient_intensity(intensity);
        }

        if let (Some(renderer), Some(window), Some(scene)) =
            (&mut self.renderer, &self.window, &self.scene)
        {
            match renderer.render(scene, &self.camera, window, self.fps) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                    renderer.resize(window.inner_size());
                }
                Err(e) => log::error!("render error: {e}"),
            }
        }

        if let Some(kind) = self.renderer.as_mut().and_then(|r| r.take_requested_scene()) {
            let scene = self.build_scene(kind);
            self.mount_scene(scene);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Logo Viewer")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match pollster::block_on(MeshRenderer::new(
                window.clone(),
                self.light.clone(),
                !self.cli.no_ui,
            )) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.renderer = Some(renderer);

            let scene = self.build_scene(self.cli.scene);
            self.mount_scene(scene);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        self.camera.process_window_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, config);

    if !app.cli.no_ui {
        println!("Logo Viewer - drag to orbit, scroll to zoom, Escape to quit");
    }
    event_loop.run_app(&mut app)?;

    Ok(())
}
