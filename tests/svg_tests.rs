use glam::Vec2;
use logo_viewer::loaders::svg::{parse_path_data, parse_svg};

#[cfg(test)]
mod svg_tests {
    use super::*;

    #[test]
    fn test_absolute_move_and_lines() {
        let subpaths = parse_path_data("M0 0 L10 0 L10 10 L0 10 Z").unwrap();
        assert_eq!(subpaths.len(), 1);
        assert_eq!(subpaths[0].len(), 4);
        assert_eq!(subpaths[0][0], Vec2::new(0.0, 0.0));
        assert_eq!(subpaths[0][2], Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_relative_lines() {
        let subpaths = parse_path_data("m5 5 l10 0 l0 10 l-10 0 z").unwrap();
        assert_eq!(subpaths.len(), 1);
        assert_eq!(subpaths[0][3], Vec2::new(5.0, 15.0));
    }

    #[test]
    fn test_horizontal_and_vertical() {
        let subpaths = parse_path_data("M170 40 H210 V140 H170 Z").unwrap();
        assert_eq!(subpaths[0].len(), 4);
        assert_eq!(subpaths[0][1], Vec2::new(210.0, 40.0));
        assert_eq!(subpaths[0][2], Vec2::new(210.0, 140.0));
    }

    #[test]
    fn test_implicit_lineto_after_move() {
        // Numbers after M's pair continue as implicit L commands.
        let subpaths = parse_path_data("M0 0 10 0 10 10 Z").unwrap();
        assert_eq!(subpaths[0].len(), 3);
        assert_eq!(subpaths[0][2], Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_comma_and_sign_separated_numbers() {
        let subpaths = parse_path_data("M0,0L10,0 10,10L0,10Z").unwrap();
        assert_eq!(subpaths[0].len(), 4);
        let compact = parse_path_data("M0 0L1.5.5 3-1Z").unwrap();
        assert_eq!(compact[0][1], Vec2::new(1.5, 0.5));
        assert_eq!(compact[0][2], Vec2::new(3.0, -1.0));
    }

    #[test]
    fn test_cubic_curve_is_flattened() {
        let subpaths = parse_path_data("M0 0 C0 10 10 10 10 0 Z").unwrap();
        let points = &subpaths[0];
        // Start point plus the flattened samples.
        assert!(points.len() > 4);
        // Endpoint of the curve is exact.
        assert_eq!(*points.last().unwrap(), Vec2::new(10.0, 0.0));
        // The curve bows toward the control points.
        let mid = points[points.len() / 2];
        assert!(mid.y > 5.0);
    }

    #[test]
    fn test_quadratic_and_smooth() {
        let q = parse_path_data("M0 0 Q5 10 10 0 Z").unwrap();
        assert_eq!(*q[0].last().unwrap(), Vec2::new(10.0, 0.0));

        let t = parse_path_data("M0 0 Q5 10 10 0 T20 0 Z").unwrap();
        assert_eq!(*t[0].last().unwrap(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_multiple_subpaths() {
        let subpaths =
            parse_path_data("M0 0 L20 0 L20 20 L0 20 Z M5 5 L5 15 L15 15 L15 5 Z").unwrap();
        assert_eq!(subpaths.len(), 2);
    }

    #[test]
    fn test_degenerate_subpath_is_dropped() {
        let subpaths = parse_path_data("M0 0 L10 10 Z M0 0 L10 0 L5 8 Z").unwrap();
        assert_eq!(subpaths.len(), 1);
        assert_eq!(subpaths[0].len(), 3);
    }

    #[test]
    fn test_arcs_are_rejected() {
        assert!(parse_path_data("M0 0 A5 5 0 0 1 10 0 Z").is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_path_data("10 10 L0 0").is_err());
        assert!(parse_path_data("M0 0 L").is_err());
    }

    #[test]
    fn test_document_paths_and_fills() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg">
            <!-- <path d="M0 0 L1 0 L1 1 Z"/> commented out -->
            <path id="a" d="M0 0 L10 0 L10 10 L0 10 Z" fill="#ff0000"/>
            <path d='M20 0 L30 0 L25 10 Z'/>
        </svg>"##;
        let paths = parse_svg(svg).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].fill, Some([1.0, 0.0, 0.0]));
        assert_eq!(paths[1].fill, None);
    }

    #[test]
    fn test_fill_none_maps_to_default() {
        let svg = r#"<svg><path d="M0 0 L10 0 L5 8 Z" fill="none"/></svg>"#;
        let paths = parse_svg(svg).unwrap();
        assert_eq!(paths[0].fill, None);
    }

    #[test]
    fn test_hole_classification() {
        let svg = r#"<svg>
            <path d="M0 0 L20 0 L20 20 L0 20 Z M5 5 L5 15 L15 15 L15 5 Z"/>
        </svg>"#;
        let paths = parse_svg(svg).unwrap();
        let shapes = paths[0].to_shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].holes.len(), 1);
    }

    #[test]
    fn test_disjoint_subpaths_are_separate_shapes() {
        let svg = r#"<svg>
            <path d="M0 0 L10 0 L10 10 L0 10 Z M20 0 L30 0 L30 10 L20 10 Z"/>
        </svg>"#;
        let paths = parse_svg(svg).unwrap();
        let shapes = paths[0].to_shapes();
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|s| s.holes.is_empty()));
    }
}
