//! The logo scene: every flat shape of the loaded vector paths,
//! extruded, centered and scaled down to world units.

use glam::{Vec2, Vec3};

use crate::config::SceneConfig;
use crate::light::{AmbientLight, DirectionalLight};
use crate::loaders::svg::SvgPath;
use crate::math::color::{parse_color, BLUE};
use crate::math::shape::{extrude, shape_bounds, FlatShape};
use crate::types::Vertex;

use super::{Mesh, OrbitSettings, Scene, SceneKind};

/// Creates the logo scene. One mesh per decomposed shape; shapes from a
/// path without a fill default to the configured color. Orbit controls
/// with auto-rotation are enabled.
pub fn create_logo_scene(config: &SceneConfig, paths: &[SvgPath]) -> Scene {
    let default_color = parse_color(&config.color).unwrap_or(BLUE);

    let shapes: Vec<(FlatShape, [f32; 3])> = paths
        .iter()
        .flat_map(|path| {
            let color = path.fill.unwrap_or(default_color);
            path.to_shapes().into_iter().map(move |s| (s, color))
        })
        .collect();

    let only_shapes: Vec<FlatShape> = shapes.iter().map(|(s, _)| s.clone()).collect();
    let center = shape_bounds(&only_shapes)
        .map(|(min, max)| (min + max) * 0.5)
        .unwrap_or(Vec2::ZERO);

    let meshes = shapes
        .into_iter()
        .map(|(shape, color)| {
            let (vertices, indices) = extrude(&shape, config.extrude_depth);
            // Center the artwork and flip the SVG y-down axis; both are
            // baked into the vertices so the transform stays a plain
            // rotation + uniform scale.
            let vertices = vertices
                .into_iter()
                .map(|v| {
                    Vertex::new(
                        [
                            v.position[0] - center.x,
                            -(v.position[1] - center.y),
                            v.position[2],
                        ],
                        [v.normal[0], -v.normal[1], v.normal[2]],
                    )
                })
                .collect();
            let mut mesh = Mesh::new(vertices, indices, color);
            mesh.scale = config.scale;
            mesh
        })
        .collect();

    let directionals = config
        .light_positions
        .iter()
        .map(|&p| DirectionalLight::white(Vec3::from_array(p)))
        .collect();

    Scene {
        kind: SceneKind::Logo,
        meshes,
        ambient: AmbientLight::default(),
        directionals,
        orbit: Some(OrbitSettings {
            target: Vec3::ZERO,
            auto_rotate_speed: config.auto_rotate_speed,
        }),
    }
}
