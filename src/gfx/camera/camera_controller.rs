use std::collections::HashSet;

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::fly_camera::{CameraMovement, FlyCamera};

/// Pixels of trackpad travel treated as one scroll line
const PIXELS_PER_LINE: f64 = 20.0;

const MOVEMENT_BINDINGS: [(KeyCode, CameraMovement); 6] = [
    (KeyCode::KeyW, CameraMovement::Forward),
    (KeyCode::KeyS, CameraMovement::Backward),
    (KeyCode::KeyA, CameraMovement::Left),
    (KeyCode::KeyD, CameraMovement::Right),
    (KeyCode::KeyQ, CameraMovement::Up),
    (KeyCode::KeyE, CameraMovement::Down),
];

/// Translates window input into camera commands
///
/// Keyboard state is tracked as a set of held keys and polled once per frame,
/// so movement is continuous while a key is down. Mouse motion and scrolling
/// are applied to the camera as they arrive.
#[derive(Debug, Default)]
pub struct CameraController {
    held_keys: HashSet<KeyCode>,
    pressed_last_frame: HashSet<KeyCode>,
    last_cursor: Option<PhysicalPosition<f64>>,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_keyed_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.set_key(code, event.state == ElementState::Pressed);
        }
    }

    pub fn set_key(&mut self, code: KeyCode, pressed: bool) {
        if pressed {
            self.held_keys.insert(code);
        } else {
            self.held_keys.remove(&code);
        }
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held_keys.contains(&code)
    }

    /// Returns true only on the frame where `code` went from released to held
    ///
    /// Call [`CameraController::end_frame`] once per frame after all edge
    /// queries so the next frame compares against this one.
    pub fn was_just_pressed(&self, code: KeyCode) -> bool {
        self.is_held(code) && !self.pressed_last_frame.contains(&code)
    }

    pub fn end_frame(&mut self) {
        self.pressed_last_frame.clone_from(&self.held_keys);
    }

    /// Applies held movement keys to the camera
    pub fn update_camera(&self, camera: &mut FlyCamera, delta_time: f32) {
        for (code, movement) in MOVEMENT_BINDINGS {
            if self.is_held(code) {
                camera.process_keyboard(movement, delta_time);
            }
        }
    }

    /// Re-aims the camera from an absolute cursor position
    ///
    /// The first position only primes the tracker so the camera does not jump
    /// when the cursor enters the window.
    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>, camera: &mut FlyCamera) {
        let Some(last) = self.last_cursor.replace(position) else {
            return;
        };

        let x_offset = (position.x - last.x) as f32;
        // window y grows downwards
        let y_offset = (last.y - position.y) as f32;
        camera.process_mouse_movement(x_offset, y_offset, true);
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta, camera: &mut FlyCamera) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => (*y / PIXELS_PER_LINE) as f32,
        };
        camera.process_mouse_scroll(lines);
    }

    /// Forgets the cursor so re-entering the window does not snap the view
    pub fn reset_cursor(&mut self) {
        self.last_cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Vector3, Zero};

    use super::*;

    fn camera_at_origin() -> FlyCamera {
        let mut camera = FlyCamera::new(Vector3::zero(), -90.0, 0.0);
        camera.movement_speed = 1.0;
        camera.mouse_sensitivity = 1.0;
        camera
    }

    #[test]
    fn held_keys_move_every_frame() {
        let mut controller = CameraController::new();
        let mut camera = camera_at_origin();

        controller.set_key(KeyCode::KeyW, true);
        controller.update_camera(&mut camera, 1.0);
        controller.update_camera(&mut camera, 1.0);
        assert!((camera.position - Vector3::new(0.0, 0.0, -2.0)).magnitude() < 1e-5);

        controller.set_key(KeyCode::KeyW, false);
        controller.update_camera(&mut camera, 1.0);
        assert!((camera.position - Vector3::new(0.0, 0.0, -2.0)).magnitude() < 1e-5);
    }

    #[test]
    fn q_raises_and_e_lowers() {
        let mut controller = CameraController::new();
        let mut camera = camera_at_origin();

        controller.set_key(KeyCode::KeyQ, true);
        controller.update_camera(&mut camera, 1.0);
        assert!((camera.position.y - 1.0).abs() < 1e-5);

        controller.set_key(KeyCode::KeyQ, false);
        controller.set_key(KeyCode::KeyE, true);
        controller.update_camera(&mut camera, 3.0);
        assert!((camera.position.y + 2.0).abs() < 1e-5);
    }

    #[test]
    fn edge_trigger_fires_once_per_press() {
        let mut controller = CameraController::new();

        controller.set_key(KeyCode::KeyP, true);
        assert!(controller.was_just_pressed(KeyCode::KeyP));
        controller.end_frame();

        // still held on the next frame
        assert!(!controller.was_just_pressed(KeyCode::KeyP));
        controller.end_frame();

        controller.set_key(KeyCode::KeyP, false);
        controller.end_frame();
        controller.set_key(KeyCode::KeyP, true);
        assert!(controller.was_just_pressed(KeyCode::KeyP));
    }

    #[test]
    fn first_cursor_event_does_not_rotate() {
        let mut controller = CameraController::new();
        let mut camera = camera_at_origin();

        controller.process_cursor_moved(PhysicalPosition::new(400.0, 300.0), &mut camera);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);

        controller.process_cursor_moved(PhysicalPosition::new(410.0, 295.0), &mut camera);
        assert!((camera.yaw() + 80.0).abs() < 1e-5);
        assert!((camera.pitch() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn reset_cursor_primes_again() {
        let mut controller = CameraController::new();
        let mut camera = camera_at_origin();

        controller.process_cursor_moved(PhysicalPosition::new(0.0, 0.0), &mut camera);
        controller.reset_cursor();
        controller.process_cursor_moved(PhysicalPosition::new(500.0, 500.0), &mut camera);
        assert_eq!(camera.yaw(), -90.0);
    }

    #[test]
    fn scroll_lines_and_pixels_adjust_zoom() {
        let mut controller = CameraController::new();
        let mut camera = camera_at_origin();
        let start = camera.zoom();

        controller.process_scroll(&MouseScrollDelta::LineDelta(0.0, 2.0), &mut camera);
        assert!((camera.zoom() - (start - 2.0)).abs() < 1e-5);

        controller.process_scroll(
            &MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)),
            &mut camera,
        );
        assert!((camera.zoom() - start).abs() < 1e-5);
    }
}
