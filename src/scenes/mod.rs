//! Scene composition: renderable meshes plus lights, built from the
//! current configuration.

mod box_scene;
mod logo;

pub use box_scene::create_box_scene;
pub use logo::create_logo_scene;

use clap::ValueEnum;
use glam::{Mat4, Vec3};

use crate::light::{AmbientLight, DirectionalLight};
use crate::types::Vertex;

/// Which scene variant to compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// A single colored box.
    Box,
    /// The extruded vector logo.
    Logo,
}

/// Orbit interaction settings, present only for scenes that allow it.
#[derive(Debug, Clone, Copy)]
pub struct OrbitSettings {
    pub target: Vec3,
    pub auto_rotate_speed: f32,
}

/// A renderable object: geometry, base color and a transform. Rotation
/// is the only field mutated after composition (by the spin update).
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub color: [f32; 3],
    pub rotation: Vec3,
    pub translation: Vec3,
    pub scale: f32,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, color: [f32; 3]) -> Self {
        Self {
            vertices,
            indices,
            color,
            rotation: Vec3::ZERO,
            translation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Model matrix: translation, then the accumulated Euler rotation,
    /// then uniform scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_euler(
                glam::EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            )
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// Everything the renderer draws for one frame: meshes, one ambient
/// light and the fixed directional lights. The ambient intensity is
/// rewritten from the light control before every frame; the rest is
/// immutable after composition.
#[derive(Debug, Clone)]
pub struct Scene {
    pub kind: SceneKind,
    pub meshes: Vec<Mesh>,
    pub ambient: AmbientLight,
    pub directionals: Vec<DirectionalLight>,
    pub orbit: Option<OrbitSettings>,
}

impl Scene {
    /// Single write site for the per-frame intensity hand-off.
    pub fn set_ambient_intensity(&mut self, intensity: f32) {
        self.ambient.intensity = intensity;
    }
}
