//! Render settings, stored as JSON

use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "wireframe.json";

/// Window size, camera and animation settings.
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Vertical field of view, radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Distance the mesh is pushed along +Z, away from the eye
    pub distance: f32,
    /// Spin axis; need not be unit length
    pub axis: [f32; 3],
    /// Radians per second
    pub angular_speed: f32,
    /// Minimum time between frames
    pub frame_interval_ms: u64,
    /// Edge length of the demo cube
    pub mesh_size: f32,
    pub line_color: (u8, u8, u8),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
            fov: PI * 0.5,
            near: 1.0,
            far: 500.0,
            distance: 5.0,
            axis: [0.0, 1.0, 0.0],
            angular_speed: PI * 0.2,
            frame_interval_ms: 20,
            mesh_size: 2.0,
            line_color: (0, 0, 0),
        }
    }
}

impl RenderConfig {
    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load config, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                debug!("loaded config from {}", path.display());
                config
            },
            Err(e) => {
                if path.exists() {
                    warn!("ignoring {}: {}", path.display(), e);
                } else {
                    debug!("no config at {}, using defaults", path.display());
                }
                Self::default()
            },
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("wireframe-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults_match_demo() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (640, 480));
        assert!((config.fov - PI / 2.0).abs() < 1e-6);
        assert_eq!(config.frame_interval_ms, 20);
        assert_eq!(config.line_color, (0, 0, 0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"width": 800, "line_color": [255, 0, 0]}"#).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 480);
        assert_eq!(config.line_color, (255, 0, 0));
        assert_eq!(config.axis, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let config = RenderConfig {
            width: 320,
            distance: 8.5,
            axis: [1.0, 1.0, 0.0],
            ..RenderConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = RenderConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            RenderConfig::load(temp_path("missing")),
            Err(RenderError::Io(_))
        ));

        let path = temp_path("bad");
        fs::write(&path, "{ not json").unwrap();
        let result = RenderConfig::load(&path);
        let fallback = RenderConfig::load_or_default(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(RenderError::Config(_))));
        assert_eq!(fallback, RenderConfig::default());
    }
}
