//! Scene constants, gathered into one explicit configuration object.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Constants the scene composition reads: colors, light placement,
/// extrusion depth, auto-rotation speed and geometry scale.
///
/// Values can be overridden from a JSON file via `--config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Mesh color used when a path carries no fill ("blue" by default).
    pub color: String,
    /// Fixed directional light positions. The box scene uses the first
    /// entry only; the logo scene uses all of them.
    pub light_positions: Vec<[f32; 3]>,
    /// Depth the flat logo shapes are extruded to, in SVG units.
    pub extrude_depth: f32,
    /// Orbit auto-rotation speed. 2.0 is one orbit per minute at the
    /// reference cadence, so 20.0 orbits every three seconds.
    pub auto_rotate_speed: f32,
    /// Uniform scale applied to the extruded logo (SVG units to world).
    pub scale: f32,
    /// Bundled vector asset for the logo scene.
    pub asset_path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
            light_positions: vec![[0.0, 0.0, 5.0], [0.0, 5.0, 5.0]],
            extrude_depth: 50.0,
            auto_rotate_speed: 20.0,
            scale: 0.01,
            asset_path: "assets/logo.svg".to_string(),
        }
    }
}

impl SceneConfig {
    /// Loads a configuration from a JSON file. Missing fields fall back
    /// to the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scene_constants() {
        let config = SceneConfig::default();
        assert_eq!(config.color, "blue");
        assert_eq!(config.extrude_depth, 50.0);
        assert_eq!(config.auto_rotate_speed, 20.0);
        assert_eq!(config.scale, 0.01);
        assert_eq!(config.light_positions[0], [0.0, 0.0, 5.0]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SceneConfig = serde_json::from_str(r#"{"color": "red"}"#).unwrap();
        assert_eq!(config.color, "red");
        assert_eq!(config.extrude_depth, 50.0);
        assert_eq!(config.scale, 0.01);
    }
}
