//! Orbit camera: the viewpoint circles a fixed target, optionally
//! auto-rotating, with mouse drag and scroll zoom.

use glam::{Mat4, Vec3};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

pub const FOV_Y: f32 = 0.785398;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

pub const DRAG_SENSITIVITY: f32 = 0.005;
pub const ZOOM_STEP: f32 = 0.25;
pub const MIN_RADIUS: f32 = 0.5;
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Reference cadence for auto-rotation: speed 2.0 means one full orbit
/// per minute, matching the convention of the original orbit controls.
const AUTO_ROTATE_BASE: f32 = std::f32::consts::TAU / 60.0;

pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Orbits per reference cadence; 0.0 disables auto-rotation.
    pub auto_rotate_speed: f32,
    /// Whether user interaction (drag/zoom) is accepted.
    pub interactive: bool,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitCamera {
    pub fn new(target: Vec3, radius: f32) -> Self {
        Self {
            target,
            radius,
            yaw: 0.0,
            pitch: 0.0,
            auto_rotate_speed: 0.0,
            interactive: false,
            dragging: false,
            last_cursor: None,
        }
    }

    /// Camera position on the orbit sphere.
    pub fn position(&self) -> Vec3 {
        self.target
            + self.radius
                * Vec3::new(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                )
    }

    /// Advances auto-rotation by `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        if self.auto_rotate_speed != 0.0 {
            self.yaw += AUTO_ROTATE_BASE * self.auto_rotate_speed * delta;
        }
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(FOV_Y, aspect, NEAR, FAR);
        let view = Mat4::look_at_rh(self.position(), self.target, Vec3::Y);
        proj * view
    }

    /// Routes window events into drag-orbit and scroll-zoom. Ignored
    /// entirely while `interactive` is off (box variant).
    pub fn process_window_event(&mut self, event: &WindowEvent) {
        if !self.interactive {
            return;
        }
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                if !self.dragging {
                    self.last_cursor = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x, position.y);
                if self.dragging {
                    if let Some((lx, ly)) = self.last_cursor {
                        let dx = (current.0 - lx) as f32;
                        let dy = (current.1 - ly) as f32;
                        self.orbit_by(dx, dy);
                    }
                }
                self.last_cursor = Some(current);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 20.0,
                };
                self.zoom_by(lines);
            }
            _ => {}
        }
    }

    pub fn orbit_by(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * DRAG_SENSITIVITY;
        self.pitch = (self.pitch + dy * DRAG_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn zoom_by(&mut self, lines: f32) {
        self.radius = (self.radius - lines * ZOOM_STEP).max(MIN_RADIUS);
    }
}
