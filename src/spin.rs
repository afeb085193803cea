//! Per-frame rotation of scene meshes.
//!
//! The host loop calls [`Spin::apply_to`] once per rendered frame. The
//! update itself is the pure [`Spin::advance`]: rotation after `n` frames
//! is `n * step` on each axis, accumulating without bound. Wraparound is
//! left to the trigonometry that builds the rotation matrix.

use glam::Vec3;

use crate::error::{Error, Result};
use crate::scenes::Scene;

/// Rotation step in radians, per axis, per frame.
pub const SPIN_STEP: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
pub struct Spin {
    pub step: f32,
}

impl Spin {
    pub fn new(step: f32) -> Self {
        Self { step }
    }

    /// Rotation after `frames` more frames have elapsed.
    pub fn advance(&self, rotation: Vec3, frames: u64) -> Vec3 {
        rotation + Vec3::splat(self.step * frames as f32)
    }

    /// Advances every mesh in the mounted scene.
    ///
    /// Returns `MeshNotReady` when no scene is mounted (before the scene
    /// loads, or after teardown); the caller skips the frame.
    pub fn apply_to(&self, scene: Option<&mut Scene>, frames: u64) -> Result<()> {
        let scene = scene.ok_or(Error::MeshNotReady)?;
        for mesh in &mut scene.meshes {
            mesh.rotation = self.advance(mesh.rotation, frames);
        }
        Ok(())
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new(SPIN_STEP)
    }
}
