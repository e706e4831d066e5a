use cgmath::Matrix4;
use winit::{
    dpi::PhysicalPosition,
    event::{KeyEvent, MouseScrollDelta},
    keyboard::KeyCode,
};

use super::{
    frame_clock::FrameClock,
    projection::{ProjectionMode, ProjectionParams},
};
use crate::{
    config::ViewerConfig,
    gfx::{
        camera::{CameraController, FlyCamera},
        shader::{uniform_slot, ShaderInterface},
    },
};

/// Owns the camera and projection state and feeds them to the shader
pub struct ViewManager {
    camera: FlyCamera,
    controller: CameraController,
    clock: FrameClock,
    mode: ProjectionMode,
    params: ProjectionParams,
    width: u32,
    height: u32,
}

impl ViewManager {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            camera: FlyCamera::from_config(&config.camera),
            controller: CameraController::new(),
            clock: FrameClock::new(),
            mode: config.projection.mode,
            params: ProjectionParams::from(&config.projection),
            width: config.window.width.max(1),
            height: config.window.height.max(1),
        }
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        if self.mode != mode {
            log::info!("Projection mode: {:?}", mode);
        }
        self.mode = mode;
    }

    pub fn toggle_projection_mode(&mut self) {
        self.set_projection_mode(self.mode.toggled());
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.camera.view_matrix()
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.params
            .matrix(self.mode, self.camera.zoom(), self.aspect_ratio())
    }

    pub fn handle_keyboard(&mut self, event: &KeyEvent) {
        self.controller.process_keyed_event(event);
    }

    pub fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.controller
            .process_cursor_moved(position, &mut self.camera);
    }

    pub fn handle_cursor_left(&mut self) {
        self.controller.reset_cursor();
    }

    pub fn handle_scroll(&mut self, delta: &MouseScrollDelta) {
        self.controller.process_scroll(delta, &mut self.camera);
    }

    /// Advances the frame clock and pushes this frame's view uniforms
    pub fn prepare_scene_view(&mut self, shader: Option<&mut dyn ShaderInterface>) {
        let delta_time = self.clock.tick();
        self.update_view(delta_time, shader);
    }

    /// Applies held input for `delta_time` seconds, then writes `view`,
    /// `projection` and `viewPosition`
    ///
    /// P and O react on the press transition only. Without a shader the
    /// camera still moves but no uniforms are written.
    pub fn update_view(&mut self, delta_time: f32, shader: Option<&mut dyn ShaderInterface>) {
        self.controller.update_camera(&mut self.camera, delta_time);

        if self.controller.was_just_pressed(KeyCode::KeyP) {
            self.set_projection_mode(ProjectionMode::Perspective);
        }
        if self.controller.was_just_pressed(KeyCode::KeyO) {
            self.set_projection_mode(ProjectionMode::Orthographic);
        }
        self.controller.end_frame();

        let Some(shader) = shader else {
            return;
        };
        shader.set_mat4_value(uniform_slot::VIEW, self.view_matrix());
        shader.set_mat4_value(uniform_slot::PROJECTION, self.projection_matrix());
        shader.set_vec3_value(uniform_slot::VIEW_POSITION, self.camera.position);
    }

    #[cfg(test)]
    fn controller_mut(&mut self) -> &mut CameraController {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Vector3};

    use super::*;
    use crate::gfx::shader::{testing::RecordingShader, UniformValue};

    fn manager() -> ViewManager {
        ViewManager::new(&ViewerConfig::default())
    }

    #[test]
    fn toggling_twice_restores_projection() {
        let mut view = manager();
        let original = view.projection_matrix();

        view.toggle_projection_mode();
        assert_eq!(view.projection_mode(), ProjectionMode::Orthographic);
        assert_ne!(view.projection_matrix(), original);

        view.toggle_projection_mode();
        assert_eq!(view.projection_matrix(), original);
    }

    #[test]
    fn frame_pushes_view_uniforms() {
        let mut view = manager();
        let mut shader = RecordingShader::default();

        view.update_view(0.0, Some(&mut shader));

        assert_eq!(shader.names(), ["view", "projection", "viewPosition"]);
        assert_eq!(
            shader.writes[2].1,
            UniformValue::Vec3(Vector3::new(8.0, 5.0, 17.0))
        );
    }

    #[test]
    fn missing_shader_skips_uniforms_but_moves_camera() {
        let mut view = manager();
        view.controller_mut().set_key(KeyCode::KeyW, true);
        let start = view.camera().position;

        view.update_view(0.5, None);

        let moved = view.camera().position - start;
        assert!((moved.magnitude() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn projection_keys_are_edge_triggered() {
        let mut view = manager();

        view.controller_mut().set_key(KeyCode::KeyO, true);
        view.update_view(0.0, None);
        assert_eq!(view.projection_mode(), ProjectionMode::Orthographic);

        // P pressed while O is still held; holding O must not switch back
        view.controller_mut().set_key(KeyCode::KeyP, true);
        view.update_view(0.0, None);
        assert_eq!(view.projection_mode(), ProjectionMode::Perspective);

        view.update_view(0.0, None);
        assert_eq!(view.projection_mode(), ProjectionMode::Perspective);
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut view = manager();
        let aspect = view.aspect_ratio();
        view.resize(0, 600);
        assert_eq!(view.aspect_ratio(), aspect);
        view.resize(800, 400);
        assert_eq!(view.aspect_ratio(), 2.0);
    }
}
