use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "CameraConfig::default_speed")]
    pub speed: f32,
    #[serde(default = "CameraConfig::default_fov_degrees")]
    pub fov_degrees: f32,
    #[serde(default = "CameraConfig::default_vertical_bounds")]
    pub vertical_bounds: [f32; 2],
    #[serde(default = "CameraConfig::default_start_position")]
    pub start_position: [f32; 3],
}

impl CameraConfig {
    const fn default_speed() -> f32 {
        0.2
    }

    const fn default_fov_degrees() -> f32 {
        90.0
    }

    const fn default_vertical_bounds() -> [f32; 2] {
        [0.1, 8.0]
    }

    const fn default_start_position() -> [f32; 3] {
        [0.0, 2.0, 10.0]
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed: Self::default_speed(),
            fov_degrees: Self::default_fov_degrees(),
            vertical_bounds: Self::default_vertical_bounds(),
            start_position: Self::default_start_position(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointerConfig {
    #[serde(default = "PointerConfig::default_sensitivity")]
    pub sensitivity: f32,
}

impl PointerConfig {
    const fn default_sensitivity() -> f32 {
        crate::pointer::DEFAULT_SENSITIVITY
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self { sensitivity: Self::default_sensitivity() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExhibitConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    /// Optional key-bindings file, in the input module's JSON format.
    #[serde(default)]
    pub input_bindings: Option<PathBuf>,
}

impl ExhibitConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("Config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }
}
