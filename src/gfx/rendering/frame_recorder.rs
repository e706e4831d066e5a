//! Immediate-mode uniform and draw recording
//!
//! Scene code sets named uniforms and issues draws one after another. The
//! recorder keeps the uniform state like a bound program would and snapshots
//! the per-object part at every draw, so the whole frame can be uploaded and
//! replayed in a single render pass.

use std::collections::HashSet;

use crate::gfx::{
    scene::{mesh::ShapeKind, scene_manager::DrawSink},
    shader::{FrameUniform, ObjectUniform, ShaderInterface, UniformState, UniformValue},
};

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub shape: ShapeKind,
    /// Registry slot sampled by this draw, if texturing is enabled
    pub texture: Option<usize>,
    pub object: ObjectUniform,
}

#[derive(Debug, Default)]
pub struct FrameRecorder {
    state: UniformState,
    bound_texture: Option<usize>,
    draws: Vec<DrawCommand>,
    reported: HashSet<String>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops last frame's draws; uniform values carry over
    pub fn begin_frame(&mut self) {
        self.draws.clear();
    }

    pub fn frame_uniform(&self) -> &FrameUniform {
        &self.state.frame
    }

    pub fn state(&self) -> &UniformState {
        &self.state
    }

    pub fn draws(&self) -> &[DrawCommand] {
        &self.draws
    }

    pub fn object_uniforms(&self) -> Vec<ObjectUniform> {
        self.draws.iter().map(|draw| draw.object).collect()
    }
}

impl ShaderInterface for FrameRecorder {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        if let Err(err) = self.state.apply(name, value) {
            // report each bad name once instead of every frame
            if self.reported.insert(name.to_string()) {
                log::error!("Ignoring uniform write: {}", err);
            }
        }
    }
}

impl DrawSink for FrameRecorder {
    fn bind_texture(&mut self, slot: usize) {
        self.bound_texture = Some(slot);
    }

    fn unbind_texture(&mut self) {
        self.bound_texture = None;
    }

    fn draw_shape(&mut self, shape: ShapeKind) {
        let object = self.state.object;
        let texture = if object.use_texture != 0 {
            self.bound_texture
        } else {
            None
        };
        self.draws.push(DrawCommand {
            shape,
            texture,
            object,
        });
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Matrix4, Vector3, Vector4};

    use super::*;

    #[test]
    fn draws_snapshot_current_object_state() {
        let mut recorder = FrameRecorder::new();

        recorder.set_mat4_value("model", Matrix4::from_scale(2.0));
        recorder.set_vec4_value("objectColor", Vector4::new(1.0, 0.0, 0.0, 1.0));
        recorder.draw_shape(ShapeKind::Box);

        recorder.set_mat4_value("model", Matrix4::from_scale(3.0));
        recorder.draw_shape(ShapeKind::Sphere);

        let draws = recorder.draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].object.model[0][0], 2.0);
        assert_eq!(draws[1].object.model[0][0], 3.0);
        // color persists between draws
        assert_eq!(draws[1].object.object_color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn texture_is_recorded_only_when_enabled() {
        let mut recorder = FrameRecorder::new();
        recorder.bind_texture(4);

        recorder.set_bool_value("bUseTexture", false);
        recorder.draw_shape(ShapeKind::Plane);

        recorder.set_bool_value("bUseTexture", true);
        recorder.draw_shape(ShapeKind::Plane);

        recorder.unbind_texture();
        recorder.draw_shape(ShapeKind::Plane);

        let textures: Vec<Option<usize>> = recorder.draws().iter().map(|d| d.texture).collect();
        assert_eq!(textures, [None, Some(4), None]);
    }

    #[test]
    fn begin_frame_keeps_uniforms() {
        let mut recorder = FrameRecorder::new();
        recorder.set_vec3_value("viewPosition", Vector3::new(1.0, 2.0, 3.0));
        recorder.draw_shape(ShapeKind::Torus);

        recorder.begin_frame();
        assert!(recorder.draws().is_empty());
        assert_eq!(recorder.frame_uniform().view_position, [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn bad_writes_are_ignored() {
        let mut recorder = FrameRecorder::new();
        let before = *recorder.state();
        recorder.set_float_value("lightSources[9].focalStrength", 1.0);
        recorder.set_float_value("model", 1.0);
        recorder.set_float_value("model", 1.0);
        assert_eq!(*recorder.state(), before);
        assert_eq!(recorder.reported.len(), 2);
    }
}
