//! Light definitions and the user-facing intensity control.

use glam::Vec3;

use crate::error::{Error, Result};

/// Intensity the control starts with.
pub const DEFAULT_INTENSITY: f32 = 0.1;

/// Uniform, direction-independent illumination applied to all surfaces.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    /// Light color
    pub color: [f32; 3],
    /// Light intensity
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: DEFAULT_INTENSITY,
        }
    }
}

/// A directional light at a fixed position, aimed at the origin.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// Light position in world space
    pub position: Vec3,
    /// Light color
    pub color: [f32; 3],
}

impl DirectionalLight {
    pub fn white(position: Vec3) -> Self {
        Self {
            position,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Owns the ambient intensity value. The UI handler is the single writer,
/// the scene composition the single reader.
///
/// Input strings go through an explicit policy: a string that does not
/// parse to a finite number is rejected and the previous value kept, and
/// parsed values are clamped non-negative before being stored.
#[derive(Debug, Clone)]
pub struct LightControl {
    value: f32,
}

impl LightControl {
    pub fn new() -> Self {
        Self {
            value: DEFAULT_INTENSITY,
        }
    }

    /// Current intensity.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Stores a value directly, clamped non-negative.
    pub fn set(&mut self, value: f32) -> f32 {
        self.value = if value.is_finite() { value.max(0.0) } else { self.value };
        self.value
    }

    /// Replaces the stored value with the parsed input. Returns the
    /// stored value, or `InvalidIntensityInput` leaving it untouched.
    pub fn set_from_input(&mut self, input: &str) -> Result<f32> {
        let parsed: f32 = input
            .trim()
            .parse()
            .map_err(|_| Error::InvalidIntensityInput {
                input: input.to_string(),
            })?;

        if !parsed.is_finite() {
            return Err(Error::InvalidIntensityInput {
                input: input.to_string(),
            });
        }

        self.value = parsed.max(0.0);
        Ok(self.value)
    }
}

impl Default for LightControl {
    fn default() -> Self {
        Self::new()
    }
}
