pub mod shader_interface;
pub mod uniform_slot;
pub mod uniforms;

pub use shader_interface::{ShaderInterface, UniformValue};
pub use uniform_slot::{LightField, MaterialField, UniformError, UniformSlot, MAX_LIGHT_SOURCES};
pub use uniforms::{FrameUniform, LightSourceUniform, MaterialUniform, ObjectUniform, UniformState};

#[cfg(test)]
pub(crate) mod testing {
    use super::{ShaderInterface, UniformValue};

    /// Records uniform writes in call order
    #[derive(Default)]
    pub struct RecordingShader {
        pub writes: Vec<(String, UniformValue)>,
    }

    impl RecordingShader {
        pub fn names(&self) -> Vec<&str> {
            self.writes.iter().map(|(name, _)| name.as_str()).collect()
        }

        pub fn last_value(&self, name: &str) -> Option<UniformValue> {
            self.writes
                .iter()
                .rev()
                .find(|(n, _)| n == name)
                .map(|(_, value)| *value)
        }
    }

    impl ShaderInterface for RecordingShader {
        fn set_uniform(&mut self, name: &str, value: UniformValue) {
            self.writes.push((name.to_string(), value));
        }
    }
}
