//! Point light setup for the scene program
//!
//! Lights are written once into the persistent `lightSources[i]` uniforms.
//! Light 0 also defines the shadow map's point of view.

use cgmath::{ortho, Matrix4, Point3, SquareMatrix, Vector3, Zero};

use crate::gfx::{
    camera::OPENGL_TO_WGPU_MATRIX,
    shader::{
        uniform_slot::{self, light_uniform_name},
        LightField, ShaderInterface, MAX_LIGHT_SOURCES,
    },
};

/// Half extent of the orthographic volume the shadow map covers
const SHADOW_HALF_EXTENT: f32 = 40.0;
const SHADOW_NEAR: f32 = 1.0;
const SHADOW_FAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub position: Vector3<f32>,
    pub ambient_color: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

impl LightSource {
    /// A light at `position` contributing nothing until colors are set
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ambient_color: Vector3::zero(),
            diffuse_color: Vector3::zero(),
            specular_color: Vector3::zero(),
            focal_strength: 0.0,
            specular_intensity: 0.0,
        }
    }

    pub fn with_ambient(mut self, r: f32, g: f32, b: f32) -> Self {
        self.ambient_color = Vector3::new(r, g, b);
        self
    }

    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse_color = Vector3::new(r, g, b);
        self
    }

    pub fn with_specular(mut self, r: f32, g: f32, b: f32) -> Self {
        self.specular_color = Vector3::new(r, g, b);
        self
    }

    pub fn with_focal_strength(mut self, focal_strength: f32) -> Self {
        self.focal_strength = focal_strength;
        self
    }

    pub fn with_specular_intensity(mut self, specular_intensity: f32) -> Self {
        self.specular_intensity = specular_intensity;
        self
    }

    /// Writes this light into `lightSources[index]`
    pub fn apply<S: ShaderInterface + ?Sized>(&self, index: usize, shader: &mut S) {
        let name = |field| light_uniform_name(index, field);
        shader.set_vec3_value(&name(LightField::Position), self.position);
        shader.set_vec3_value(&name(LightField::AmbientColor), self.ambient_color);
        shader.set_vec3_value(&name(LightField::DiffuseColor), self.diffuse_color);
        shader.set_vec3_value(&name(LightField::SpecularColor), self.specular_color);
        shader.set_float_value(&name(LightField::FocalStrength), self.focal_strength);
        shader.set_float_value(&name(LightField::SpecularIntensity), self.specular_intensity);
    }

    /// Orthographic light-space transform looking from this light at `target`
    pub fn view_projection(&self, target: Point3<f32>) -> Matrix4<f32> {
        let eye = Point3::new(self.position.x, self.position.y, self.position.z);
        let view = Matrix4::look_at_rh(eye, target, Vector3::unit_y());
        let e = SHADOW_HALF_EXTENT;
        OPENGL_TO_WGPU_MATRIX * ortho(-e, e, -e, e, SHADOW_NEAR, SHADOW_FAR) * view
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLights {
    sources: Vec<LightSource>,
    pub use_lighting: bool,
}

impl SceneLights {
    /// Up to [`MAX_LIGHT_SOURCES`] lights; extras are dropped with a warning
    pub fn new(mut sources: Vec<LightSource>) -> Self {
        if sources.len() > MAX_LIGHT_SOURCES {
            log::warn!(
                "{} lights defined, only the first {} are used",
                sources.len(),
                MAX_LIGHT_SOURCES
            );
            sources.truncate(MAX_LIGHT_SOURCES);
        }
        Self {
            sources,
            use_lighting: true,
        }
    }

    /// Key light, vase fill, overhead and low side light of the desk scene
    pub fn tabletop() -> Self {
        Self::new(vec![
            LightSource::at(-8.0, 30.0, 30.0)
                .with_ambient(0.2, 0.2, 0.2)
                .with_diffuse(0.5, 0.5, 0.1)
                .with_specular(0.7, 0.6, 0.5)
                .with_focal_strength(2.0)
                .with_specular_intensity(0.05),
            LightSource::at(20.0, 20.0, -5.0).with_focal_strength(0.001),
            LightSource::at(0.0, 0.0, 10.0).with_focal_strength(0.03),
            LightSource::at(-10.0, -5.0, 10.0)
                .with_ambient(0.3, 0.3, 0.3)
                .with_focal_strength(0.01)
                .with_specular_intensity(0.1),
        ])
    }

    pub fn sources(&self) -> &[LightSource] {
        &self.sources
    }

    /// Light that casts the shadow map
    pub fn shadow_caster(&self) -> Option<&LightSource> {
        self.sources.first()
    }

    /// Light-space matrix of the shadow caster, identity when there is none
    pub fn light_space_matrix(&self, target: Point3<f32>) -> Matrix4<f32> {
        self.shadow_caster()
            .map(|light| light.view_projection(target))
            .unwrap_or_else(Matrix4::identity)
    }

    /// Writes every light, the lighting switch and the light-space matrix
    pub fn apply<S: ShaderInterface + ?Sized>(&self, shader: &mut S, shadow_target: Point3<f32>) {
        for (index, light) in self.sources.iter().enumerate() {
            light.apply(index, shader);
        }
        shader.set_mat4_value(
            uniform_slot::LIGHT_SPACE_MATRIX,
            self.light_space_matrix(shadow_target),
        );
        shader.set_bool_value(uniform_slot::USE_LIGHTING, self.use_lighting);
    }
}
