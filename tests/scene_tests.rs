use logo_viewer::config::SceneConfig;
use logo_viewer::light::DEFAULT_INTENSITY;
use logo_viewer::loaders::svg::parse_svg;
use logo_viewer::scenes::{create_box_scene, create_logo_scene, SceneKind};

#[cfg(test)]
mod scene_tests {
    use super::*;

    #[test]
    fn test_box_scene_contents() {
        // Scenario B: exactly one box mesh, one ambient light, one
        // directional light.
        let scene = create_box_scene(&SceneConfig::default());

        assert_eq!(scene.kind, SceneKind::Box);
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.directionals.len(), 1);
        assert!(scene.orbit.is_none());

        let mesh = &scene.meshes[0];
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        // Default config color is blue.
        assert_eq!(mesh.color, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_box_scene_light_constants() {
        let scene = create_box_scene(&SceneConfig::default());
        assert_eq!(scene.ambient.intensity, DEFAULT_INTENSITY);
        assert_eq!(scene.directionals[0].color, [1.0, 1.0, 1.0]);
        assert_eq!(scene.directionals[0].position.to_array(), [0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_intensity_handoff_reaches_scene() {
        let mut scene = create_box_scene(&SceneConfig::default());
        scene.set_ambient_intensity(0.5);
        assert_eq!(scene.ambient.intensity, 0.5);
    }

    #[test]
    fn test_logo_scene_one_mesh_per_shape() {
        // Scenario C: N meshes for N decomposed shapes. Three paths, the
        // third with a hole subpath folded into its outer contour.
        let svg = r##"<svg>
            <path d="M0 0 L10 0 L10 10 L0 10 Z" fill="#ff0000"/>
            <path d="M20 0 L30 0 L25 10 Z"/>
            <path d="M40 0 L60 0 L60 20 L40 20 Z M45 5 L45 15 L55 15 L55 5 Z"/>
        </svg>"##;
        let paths = parse_svg(svg).unwrap();
        assert_eq!(paths.len(), 3);

        let scene = create_logo_scene(&SceneConfig::default(), &paths);
        assert_eq!(scene.kind, SceneKind::Logo);
        assert_eq!(scene.meshes.len(), 3);
        assert_eq!(scene.directionals.len(), 2);
        assert!(scene.orbit.is_some());
    }

    #[test]
    fn test_logo_color_defaults_to_blue() {
        let svg = r##"<svg>
            <path d="M0 0 L10 0 L10 10 L0 10 Z" fill="#ff0000"/>
            <path d="M20 0 L30 0 L25 10 Z"/>
        </svg>"##;
        let paths = parse_svg(svg).unwrap();
        let scene = create_logo_scene(&SceneConfig::default(), &paths);

        assert_eq!(scene.meshes[0].color, [1.0, 0.0, 0.0]);
        // No fill attribute falls back to the configured blue.
        assert_eq!(scene.meshes[1].color, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_logo_orbit_settings_from_config() {
        let svg = r#"<svg><path d="M0 0 L10 0 L5 10 Z"/></svg>"#;
        let paths = parse_svg(svg).unwrap();
        let scene = create_logo_scene(&SceneConfig::default(), &paths);

        let orbit = scene.orbit.unwrap();
        assert_eq!(orbit.auto_rotate_speed, 20.0);
        assert_eq!(orbit.target.to_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_logo_meshes_are_scaled_down() {
        let svg = r#"<svg><path d="M0 0 L100 0 L100 100 L0 100 Z"/></svg>"#;
        let paths = parse_svg(svg).unwrap();
        let scene = create_logo_scene(&SceneConfig::default(), &paths);

        let mesh = &scene.meshes[0];
        assert_eq!(mesh.scale, 0.01);
        // Artwork is centered before scaling.
        let max_x = mesh
            .vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        let min_x = mesh
            .vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MAX, f32::min);
        assert_eq!(max_x, 50.0);
        assert_eq!(min_x, -50.0);
    }

    #[test]
    fn test_bundled_asset_composes() {
        let asset = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/logo.svg");
        let paths = logo_viewer::loaders::load_svg_file(asset).unwrap();
        assert_eq!(paths.len(), 3);

        let scene = create_logo_scene(&SceneConfig::default(), &paths);
        // One mesh per shape: chevron, bar, and the ring whose second
        // subpath is a hole, not a shape of its own.
        assert_eq!(scene.meshes.len(), 3);
    }
}
