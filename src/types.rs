//! GPU-facing data structures.

use bytemuck::{Pod, Zeroable};

/// Maximum directional lights the shader iterates over.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 2;

/// Mesh vertex: position + flat normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };
}

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Per-mesh uniform: model matrix and base color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub _pad: f32,
}

/// Light uniform: one ambient term plus fixed-position directional lights.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LightsUniform {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    /// xyz = position, w unused
    pub positions: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    /// rgb = color, w unused
    pub colors: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    pub count: u32,
    pub _pad: [u32; 3],
}
