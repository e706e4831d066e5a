// src/gfx/shader/uniforms.rs
//! GPU-side layouts for the scene program uniforms
//!
//! Field order and padding mirror the WGSL structs in `scene.wgsl` and
//! `shadow.wgsl`; every vec3 is padded to 16 bytes.

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, SquareMatrix, Vector3};

use super::{
    shader_interface::UniformValue,
    uniform_slot::{LightField, MaterialField, UniformError, UniformSlot, MAX_LIGHT_SOURCES},
};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightSourceUniform {
    pub position: [f32; 3],
    pub focal_strength: f32,
    pub ambient_color: [f32; 3],
    pub specular_intensity: f32,
    pub diffuse_color: [f32; 3],
    pub _pad0: f32,
    pub specular_color: [f32; 3],
    pub _pad1: f32,
}

/// Uniforms shared by every draw in a frame (bind group 0)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub lights: [LightSourceUniform; MAX_LIGHT_SOURCES],
    pub use_lighting: u32,
    pub _pad: [u32; 3],
}

impl Default for FrameUniform {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::identity().into();
        Self {
            view: identity,
            projection: identity,
            light_view_proj: identity,
            view_position: [0.0, 0.0, 0.0, 1.0],
            lights: [LightSourceUniform::zeroed(); MAX_LIGHT_SOURCES],
            use_lighting: 0,
            _pad: [0; 3],
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub _pad: f32,
}

/// Per-draw uniforms (bind group 1, dynamic offset)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub _pad: u32,
    pub material: MaterialUniform,
}

impl Default for ObjectUniform {
    fn default() -> Self {
        Self {
            model: Matrix4::identity().into(),
            object_color: [1.0, 1.0, 1.0, 1.0],
            uv_scale: [1.0, 1.0],
            use_texture: 0,
            _pad: 0,
            material: MaterialUniform::zeroed(),
        }
    }
}

/// Host copy of every uniform the scene program reads
///
/// Values persist until overwritten. `object_texture_unit` is the sampler
/// unit last assigned to `objectTexture`; the scene program only samples
/// unit 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UniformState {
    pub frame: FrameUniform,
    pub object: ObjectUniform,
    pub object_texture_unit: i32,
}

impl UniformState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` into the slot named by `name`
    pub fn apply(&mut self, name: &str, value: UniformValue) -> Result<UniformSlot, UniformError> {
        let slot: UniformSlot = name.parse()?;
        let mismatch = |expected: &'static str| UniformError::TypeMismatch {
            name: name.to_string(),
            expected,
            actual: value.type_name(),
        };

        match slot {
            UniformSlot::Model => self.object.model = as_mat4(value).ok_or_else(|| mismatch("mat4"))?,
            UniformSlot::View => self.frame.view = as_mat4(value).ok_or_else(|| mismatch("mat4"))?,
            UniformSlot::Projection => {
                self.frame.projection = as_mat4(value).ok_or_else(|| mismatch("mat4"))?
            }
            UniformSlot::LightSpaceMatrix => {
                self.frame.light_view_proj = as_mat4(value).ok_or_else(|| mismatch("mat4"))?
            }
            UniformSlot::ViewPosition => {
                let v = as_vec3(value).ok_or_else(|| mismatch("vec3"))?;
                self.frame.view_position = [v.x, v.y, v.z, 1.0];
            }
            UniformSlot::ObjectColor => match value {
                UniformValue::Vec4(v) => self.object.object_color = v.into(),
                _ => return Err(mismatch("vec4")),
            },
            UniformSlot::ObjectTexture => match value {
                UniformValue::Int(unit) => self.object_texture_unit = unit,
                _ => return Err(mismatch("int")),
            },
            UniformSlot::UseTexture => {
                self.object.use_texture = as_flag(value).ok_or_else(|| mismatch("bool"))?
            }
            UniformSlot::UseLighting => {
                self.frame.use_lighting = as_flag(value).ok_or_else(|| mismatch("bool"))?
            }
            UniformSlot::UvScale => match value {
                UniformValue::Vec2(v) => self.object.uv_scale = v.into(),
                _ => return Err(mismatch("vec2")),
            },
            UniformSlot::Material(field) => {
                let material = &mut self.object.material;
                match field {
                    MaterialField::AmbientColor => {
                        material.ambient_color = as_vec3(value).ok_or_else(|| mismatch("vec3"))?.into()
                    }
                    MaterialField::AmbientStrength => {
                        material.ambient_strength = as_float(value).ok_or_else(|| mismatch("float"))?
                    }
                    MaterialField::DiffuseColor => {
                        material.diffuse_color = as_vec3(value).ok_or_else(|| mismatch("vec3"))?.into()
                    }
                    MaterialField::SpecularColor => {
                        material.specular_color = as_vec3(value).ok_or_else(|| mismatch("vec3"))?.into()
                    }
                    MaterialField::Shininess => {
                        material.shininess = as_float(value).ok_or_else(|| mismatch("float"))?
                    }
                }
            }
            UniformSlot::Light(index, field) => {
                let light = &mut self.frame.lights[index];
                match field {
                    LightField::Position => {
                        light.position = as_vec3(value).ok_or_else(|| mismatch("vec3"))?.into()
                    }
                    LightField::AmbientColor => {
                        light.ambient_color = as_vec3(value).ok_or_else(|| mismatch("vec3"))?.into()
                    }
                    LightField::DiffuseColor => {
                        light.diffuse_color = as_vec3(value).ok_or_else(|| mismatch("vec3"))?.into()
                    }
                    LightField::SpecularColor => {
                        light.specular_color = as_vec3(value).ok_or_else(|| mismatch("vec3"))?.into()
                    }
                    LightField::FocalStrength => {
                        light.focal_strength = as_float(value).ok_or_else(|| mismatch("float"))?
                    }
                    LightField::SpecularIntensity => {
                        light.specular_intensity = as_float(value).ok_or_else(|| mismatch("float"))?
                    }
                }
            }
        }

        Ok(slot)
    }
}

fn as_mat4(value: UniformValue) -> Option<[[f32; 4]; 4]> {
    match value {
        UniformValue::Mat4(m) => Some(m.into()),
        _ => None,
    }
}

fn as_vec3(value: UniformValue) -> Option<Vector3<f32>> {
    match value {
        UniformValue::Vec3(v) => Some(v),
        _ => None,
    }
}

fn as_float(value: UniformValue) -> Option<f32> {
    match value {
        UniformValue::Float(f) => Some(f),
        _ => None,
    }
}

// GL programs take booleans through integer setters as well
fn as_flag(value: UniformValue) -> Option<u32> {
    match value {
        UniformValue::Bool(b) => Some(b as u32),
        UniformValue::Int(i) => Some((i != 0) as u32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Vector2, Vector4};

    use super::*;

    #[test]
    fn layouts_match_wgsl_sizes() {
        assert_eq!(std::mem::size_of::<LightSourceUniform>(), 64);
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 144);
        assert_eq!(std::mem::size_of::<FrameUniform>(), 480);
    }

    #[test]
    fn writes_reach_their_slots() {
        let mut state = UniformState::new();
        let model = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));

        state.apply("model", UniformValue::Mat4(model)).unwrap();
        state
            .apply("viewPosition", UniformValue::Vec3(Vector3::new(8.0, 5.0, 17.0)))
            .unwrap();
        state
            .apply("objectColor", UniformValue::Vec4(Vector4::new(0.5, 0.25, 1.0, 1.0)))
            .unwrap();
        state
            .apply("UVscale", UniformValue::Vec2(Vector2::new(2.0, 3.0)))
            .unwrap();
        state.apply("material.shininess", UniformValue::Float(30.0)).unwrap();
        state
            .apply(
                "lightSources[2].diffuseColor",
                UniformValue::Vec3(Vector3::new(0.1, 0.2, 0.3)),
            )
            .unwrap();

        assert_eq!(state.object.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(state.frame.view_position, [8.0, 5.0, 17.0, 1.0]);
        assert_eq!(state.object.object_color, [0.5, 0.25, 1.0, 1.0]);
        assert_eq!(state.object.uv_scale, [2.0, 3.0]);
        assert_eq!(state.object.material.shininess, 30.0);
        assert_eq!(state.frame.lights[2].diffuse_color, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn flags_accept_bool_and_int() {
        let mut state = UniformState::new();
        state.apply("bUseTexture", UniformValue::Bool(true)).unwrap();
        assert_eq!(state.object.use_texture, 1);
        state.apply("bUseTexture", UniformValue::Int(0)).unwrap();
        assert_eq!(state.object.use_texture, 0);
        state.apply("bUseLighting", UniformValue::Int(7)).unwrap();
        assert_eq!(state.frame.use_lighting, 1);
    }

    #[test]
    fn wrong_type_is_rejected_and_state_kept() {
        let mut state = UniformState::new();
        state.apply("material.shininess", UniformValue::Float(5.0)).unwrap();

        let err = state
            .apply("material.shininess", UniformValue::Vec3(Vector3::new(1.0, 1.0, 1.0)))
            .unwrap_err();
        assert_eq!(
            err,
            UniformError::TypeMismatch {
                name: "material.shininess".to_string(),
                expected: "float",
                actual: "vec3",
            }
        );
        assert_eq!(state.object.material.shininess, 5.0);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let mut state = UniformState::new();
        let before = state;
        assert!(state.apply("modelView", UniformValue::Float(1.0)).is_err());
        assert_eq!(state, before);
    }
}
