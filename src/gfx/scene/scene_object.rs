use cgmath::{Vector2, Vector3, Vector4};

use super::{mesh::ShapeKind, transform::Transform};

/// How an object's surface is colored
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Sample the texture registered under this tag
    Texture(String),
    /// Flat RGBA color
    Color(Vector4<f32>),
}

/// One placed shape in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub label: String,
    pub shape: ShapeKind,
    pub transform: Transform,
    pub material: Option<String>,
    pub surface: Surface,
    pub uv_scale: Vector2<f32>,
}

impl SceneObject {
    pub fn new(label: &str, shape: ShapeKind) -> Self {
        Self {
            label: label.to_string(),
            shape,
            transform: Transform::default(),
            material: None,
            surface: Surface::Color(Vector4::new(1.0, 1.0, 1.0, 1.0)),
            uv_scale: Vector2::new(1.0, 1.0),
        }
    }

    pub fn scaled(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.scale = Vector3::new(x, y, z);
        self
    }

    /// Euler angles in degrees
    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_material(mut self, tag: &str) -> Self {
        self.material = Some(tag.to_string());
        self
    }

    pub fn with_texture(mut self, tag: &str) -> Self {
        self.surface = Surface::Texture(tag.to_string());
        self
    }
}
