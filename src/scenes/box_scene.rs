//! The original demo scene: one colored unit box.

use glam::Vec3;

use crate::config::SceneConfig;
use crate::light::{AmbientLight, DirectionalLight};
use crate::math::color::{parse_color, BLUE};
use crate::types::Vertex;

use super::{Mesh, Scene, SceneKind};

/// Creates the box scene: one unit box, one ambient light and one white
/// directional light. No orbit interaction; the box spins in place.
pub fn create_box_scene(config: &SceneConfig) -> Scene {
    let color = parse_color(&config.color).unwrap_or(BLUE);
    let (vertices, indices) = unit_box();

    let light_position = config
        .light_positions
        .first()
        .copied()
        .unwrap_or([0.0, 0.0, 5.0]);

    Scene {
        kind: SceneKind::Box,
        meshes: vec![Mesh::new(vertices, indices, color)],
        ambient: AmbientLight::default(),
        directionals: vec![DirectionalLight::white(Vec3::from_array(light_position))],
        orbit: None,
    }
}

/// Axis-aligned unit box centered on the origin, four vertices per face
/// so every face keeps its flat normal.
fn unit_box() -> (Vec<Vertex>, Vec<u32>) {
    const H: f32 = 0.5;
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +z
        (
            [0.0, 0.0, 1.0],
            [[-H, -H, H], [H, -H, H], [H, H, H], [-H, H, H]],
        ),
        // -z
        (
            [0.0, 0.0, -1.0],
            [[H, -H, -H], [-H, -H, -H], [-H, H, -H], [H, H, -H]],
        ),
        // +x
        (
            [1.0, 0.0, 0.0],
            [[H, -H, H], [H, -H, -H], [H, H, -H], [H, H, H]],
        ),
        // -x
        (
            [-1.0, 0.0, 0.0],
            [[-H, -H, -H], [-H, -H, H], [-H, H, H], [-H, H, -H]],
        ),
        // +y
        (
            [0.0, 1.0, 0.0],
            [[-H, H, H], [H, H, H], [H, H, -H], [-H, H, -H]],
        ),
        // -y
        (
            [0.0, -1.0, 0.0],
            [[-H, -H, -H], [H, -H, -H], [H, -H, H], [-H, -H, H]],
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        for corner in corners {
            vertices.push(Vertex::new(corner, normal));
        }
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}
