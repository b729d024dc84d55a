use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/voxelstream.toml";

/// Engine configuration, loaded from TOML with per-field defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World generation seed.
    pub seed: u32,
    /// Chunk radius used for loading/unloading the world around the viewer.
    pub render_distance: i32,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Rate at which the noise animation time advances, per simulated second.
    pub time_scale: f64,
    /// Viewer speed in blocks per simulated second.
    pub walk_speed: f32,
    /// Number of simulation ticks the demo driver runs.
    pub ticks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            render_distance: 8,
            fov_degrees: 70.0,
            time_scale: 0.25,
            walk_speed: 12.0,
            ticks: 120,
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<EngineConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    EngineConfig::default()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                EngineConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Render distance clamped to the supported window.
    pub fn clamped_render_distance(&self) -> i32 {
        self.render_distance.clamp(2, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("voxelstream-config-{}-{}", std::process::id(), name))
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = EngineConfig::load_from_path(Path::new("does/not/exist.toml"));
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let path = scratch_path("invalid.toml");
        fs::write(&path, "render_distance = \"not a number\"").unwrap();
        let cfg = EngineConfig::load_from_path(&path);
        assert_eq!(cfg, EngineConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = scratch_path("round-trip.toml");
        let cfg = EngineConfig {
            seed: 99,
            render_distance: 4,
            fov_degrees: 90.0,
            time_scale: 0.5,
            walk_speed: 3.0,
            ticks: 10,
        };
        cfg.save_to_path(&path).unwrap();
        assert_eq!(EngineConfig::load_from_path(&path), cfg);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let path = scratch_path("partial.toml");
        fs::write(&path, "seed = 7\nrender_distance = 3\n").unwrap();
        let cfg = EngineConfig::load_from_path(&path);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.render_distance, 3);
        assert_eq!(cfg.fov_degrees, EngineConfig::default().fov_degrees);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn render_distance_is_clamped() {
        let mut cfg = EngineConfig {
            render_distance: 64,
            ..Default::default()
        };
        assert_eq!(cfg.clamped_render_distance(), 16);
        cfg.render_distance = 0;
        assert_eq!(cfg.clamped_render_distance(), 2);
        cfg.render_distance = 8;
        assert_eq!(cfg.clamped_render_distance(), 8);
    }
}
