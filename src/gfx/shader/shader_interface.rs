use cgmath::{Matrix4, Vector2, Vector3, Vector4};

/// A value that can be assigned to a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec4(Vector4<f32>),
    Vec3(Vector3<f32>),
    Vec2(Vector2<f32>),
    Float(f32),
    Int(i32),
    Bool(bool),
}

impl UniformValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            UniformValue::Mat4(_) => "mat4",
            UniformValue::Vec4(_) => "vec4",
            UniformValue::Vec3(_) => "vec3",
            UniformValue::Vec2(_) => "vec2",
            UniformValue::Float(_) => "float",
            UniformValue::Int(_) => "int",
            UniformValue::Bool(_) => "bool",
        }
    }
}

/// Named uniform setters for the active shader program
///
/// Implementors only provide [`ShaderInterface::set_uniform`]; the typed
/// helpers forward to it. Uniform state set through this interface persists
/// until overwritten, the same way a linked program keeps its uniforms.
pub trait ShaderInterface {
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    fn set_mat4_value(&mut self, name: &str, value: Matrix4<f32>) {
        self.set_uniform(name, UniformValue::Mat4(value));
    }

    fn set_vec4_value(&mut self, name: &str, value: Vector4<f32>) {
        self.set_uniform(name, UniformValue::Vec4(value));
    }

    fn set_vec3_value(&mut self, name: &str, value: Vector3<f32>) {
        self.set_uniform(name, UniformValue::Vec3(value));
    }

    fn set_vec2_value(&mut self, name: &str, value: Vector2<f32>) {
        self.set_uniform(name, UniformValue::Vec2(value));
    }

    fn set_float_value(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    fn set_int_value(&mut self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    fn set_bool_value(&mut self, name: &str, value: bool) {
        self.set_uniform(name, UniformValue::Bool(value));
    }

    /// Points a sampler uniform at a texture slot
    fn set_sampler2d_value(&mut self, name: &str, slot: i32) {
        self.set_uniform(name, UniformValue::Int(slot));
    }
}
