use cgmath::{ortho, perspective, Deg, Matrix4};
use serde::{Deserialize, Serialize};

use crate::{config::ProjectionConfig, gfx::camera::OPENGL_TO_WGPU_MATRIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        }
    }
}

/// Clip volume parameters for both projection modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    pub near: f32,
    pub far: f32,
    pub ortho_half_extent: f32,
    pub ortho_far: f32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self::from(&ProjectionConfig::default())
    }
}

impl From<&ProjectionConfig> for ProjectionParams {
    fn from(config: &ProjectionConfig) -> Self {
        Self {
            near: config.near,
            far: config.far,
            ortho_half_extent: config.ortho_half_extent,
            ortho_far: config.ortho_far,
        }
    }
}

impl ProjectionParams {
    /// Builds the wgpu clip-space projection for `mode`
    ///
    /// `fovy` (degrees) and `aspect` only affect the perspective mode; the
    /// orthographic volume is a fixed square.
    pub fn matrix(&self, mode: ProjectionMode, fovy: f32, aspect: f32) -> Matrix4<f32> {
        let gl = match mode {
            ProjectionMode::Perspective => perspective(Deg(fovy), aspect, self.near, self.far),
            ProjectionMode::Orthographic => {
                let e = self.ortho_half_extent;
                ortho(-e, e, -e, e, self.near, self.ortho_far)
            }
        };
        OPENGL_TO_WGPU_MATRIX * gl
    }
}
