//! Viewer configuration
//!
//! Every field has a default matching the fixed tabletop setup, so a config
//! file only needs to name the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{error::ViewerError, gfx::view::ProjectionMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub assets: AssetConfig,
    /// RGBA clear color for the frame buffer
    pub clear_color: [f64; 4],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            projection: ProjectionConfig::default(),
            assets: AssetConfig::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl ViewerConfig {
    /// Loads a config from a TOML file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ViewerError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ViewerError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&text).map_err(|source| ViewerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Rejects window and projection values the renderer cannot build
    /// matrices or surfaces from
    pub fn validate(&self) -> Result<(), ViewerError> {
        let invalid = |message: String| Err(ViewerError::InvalidConfig(message));
        let window = &self.window;
        let projection = &self.projection;

        if window.width == 0 || window.height == 0 {
            return invalid(format!(
                "window size {}x{} must be non-zero",
                window.width, window.height
            ));
        }
        if projection.near.is_nan() || projection.near <= 0.0 {
            return invalid(format!("projection.near = {} must be positive", projection.near));
        }
        if projection.far.is_nan() || projection.far <= projection.near {
            return invalid(format!(
                "projection.far = {} must be greater than near = {}",
                projection.far, projection.near
            ));
        }
        if projection.ortho_far.is_nan() || projection.ortho_far <= projection.near {
            return invalid(format!(
                "projection.ortho_far = {} must be greater than near = {}",
                projection.ortho_far, projection.near
            ));
        }
        if projection.ortho_half_extent.is_nan() || projection.ortho_half_extent <= 0.0 {
            return invalid(format!(
                "projection.ortho_half_extent = {} must be positive",
                projection.ortho_half_extent
            ));
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window.width as f32 / self.window.height.max(1) as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 960,
            title: "Tabletop Scene".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Degrees
    pub yaw: f32,
    /// Degrees
    pub pitch: f32,
    /// Field of view in degrees
    pub zoom: f32,
    /// World units per second
    pub movement_speed: f32,
    /// Degrees per pixel of cursor travel
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [8.0, 5.0, 17.0],
            yaw: -90.0,
            pitch: 0.0,
            zoom: 90.0,
            movement_speed: 6.0,
            mouse_sensitivity: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub mode: ProjectionMode,
    pub near: f32,
    pub far: f32,
    /// Half width and half height of the orthographic view volume
    pub ortho_half_extent: f32,
    pub ortho_far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            near: 0.1,
            far: 100.0,
            ortho_half_extent: 10.0,
            ortho_far: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub texture_dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("resources"),
        }
    }
}
