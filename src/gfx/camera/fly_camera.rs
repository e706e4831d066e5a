use cgmath::*;

use crate::config::CameraConfig;

/// Pitch limit in degrees, keeps the view from flipping over the poles
pub const PITCH_LIMIT: f32 = 89.0;
/// Smallest field of view (degrees) reachable by scrolling
pub const MIN_ZOOM: f32 = 0.1;
/// Largest field of view (degrees) reachable by scrolling
pub const MAX_ZOOM: f32 = 120.0;

/// Discrete movement commands issued by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free-flying camera driven by yaw/pitch angles
///
/// Angles are kept in degrees. `front`, `right` and `up` are recomputed from
/// yaw and pitch after every orientation change, so `front` is always unit
/// length.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    pub world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl FlyCamera {
    pub fn new(position: Vector3<f32>, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: -Vector3::unit_z(),
            up: Vector3::unit_y(),
            right: Vector3::unit_x(),
            world_up: Vector3::unit_y(),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            zoom: 45.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
        };
        camera.update_camera_vectors();
        camera
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.position.into(), config.yaw, config.pitch);
        camera.zoom = config.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        camera.movement_speed = config.movement_speed;
        camera.mouse_sensitivity = config.mouse_sensitivity;
        camera
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field of view in degrees
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye + self.front, self.up)
    }

    /// Moves the camera along its local axes, scaled by frame time
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.world_up * velocity,
            CameraMovement::Down => self.position -= self.world_up * velocity,
        }
    }

    /// Re-aims the camera from cursor offsets in pixels
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_camera_vectors();
    }

    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_camera_vectors(&mut self) {
        self.front = front_from_angles(self.yaw, self.pitch);
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// Converts yaw/pitch in degrees into a unit direction vector
pub fn front_from_angles(yaw: f32, pitch: f32) -> Vector3<f32> {
    let (yaw, pitch) = (Deg(yaw), Deg(pitch));
    Vector3::new(
        Rad::from(yaw).0.cos() * Rad::from(pitch).0.cos(),
        Rad::from(pitch).0.sin(),
        Rad::from(yaw).0.sin() * Rad::from(pitch).0.cos(),
    )
    .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_vec_eq(a: Vector3<f32>, b: Vector3<f32>) {
        assert!(
            (a - b).magnitude() < EPSILON,
            "expected {:?} to equal {:?}",
            a,
            b
        );
    }

    #[test]
    fn default_yaw_looks_down_negative_z() {
        let camera = FlyCamera::new(Vector3::zero(), -90.0, 0.0);
        assert_vec_eq(camera.front(), -Vector3::unit_z());
        assert_vec_eq(camera.right(), Vector3::unit_x());
        assert_vec_eq(camera.up(), Vector3::unit_y());
    }

    #[test]
    fn front_is_unit_length_for_any_angles() {
        for yaw in (-720..=720).step_by(15) {
            for pitch in (-89..=89).step_by(7) {
                let front = front_from_angles(yaw as f32, pitch as f32);
                assert!((front.magnitude() - 1.0).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn basis_stays_orthonormal_after_mouse_motion() {
        let mut camera = FlyCamera::default();
        camera.process_mouse_movement(133.0, -47.0, true);
        assert!(camera.front().dot(camera.right()).abs() < EPSILON);
        assert!(camera.front().dot(camera.up()).abs() < EPSILON);
        assert!((camera.front().magnitude() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn pitch_is_clamped_regardless_of_input() {
        let mut camera = FlyCamera::default();
        for _ in 0..100 {
            camera.process_mouse_movement(0.0, 500.0, true);
        }
        assert_eq!(camera.pitch(), PITCH_LIMIT);

        for _ in 0..100 {
            camera.process_mouse_movement(3.0, -500.0, true);
        }
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn constructor_clamps_pitch() {
        let camera = FlyCamera::new(Vector3::zero(), 0.0, 140.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn sensitivity_scales_mouse_offsets() {
        let mut camera = FlyCamera::new(Vector3::zero(), 0.0, 0.0);
        camera.mouse_sensitivity = 0.5;
        camera.process_mouse_movement(10.0, 4.0, true);
        assert!((camera.yaw() - 5.0).abs() < EPSILON);
        assert!((camera.pitch() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn zoom_never_drops_below_floor() {
        let mut camera = FlyCamera::default();
        for _ in 0..1000 {
            camera.process_mouse_scroll(3.0);
        }
        assert_eq!(camera.zoom(), MIN_ZOOM);

        camera.process_mouse_scroll(-1.0);
        assert!((camera.zoom() - (MIN_ZOOM + 1.0)).abs() < EPSILON);
    }

    #[test]
    fn zoom_is_capped_when_scrolling_out() {
        let mut camera = FlyCamera::default();
        camera.process_mouse_scroll(-1000.0);
        assert_eq!(camera.zoom(), MAX_ZOOM);
    }

    #[test]
    fn keyboard_moves_along_camera_axes() {
        let mut camera = FlyCamera::new(Vector3::zero(), -90.0, 0.0);
        camera.movement_speed = 2.0;

        camera.process_keyboard(CameraMovement::Forward, 0.5);
        assert_vec_eq(camera.position, Vector3::new(0.0, 0.0, -1.0));

        camera.process_keyboard(CameraMovement::Right, 0.5);
        assert_vec_eq(camera.position, Vector3::new(1.0, 0.0, -1.0));

        camera.process_keyboard(CameraMovement::Up, 1.0);
        assert_vec_eq(camera.position, Vector3::new(1.0, 2.0, -1.0));

        camera.process_keyboard(CameraMovement::Down, 1.0);
        camera.process_keyboard(CameraMovement::Left, 0.5);
        camera.process_keyboard(CameraMovement::Backward, 0.5);
        assert_vec_eq(camera.position, Vector3::zero());
    }

    #[test]
    fn up_and_down_use_world_up_even_when_pitched() {
        let mut camera = FlyCamera::new(Vector3::zero(), -90.0, 45.0);
        camera.movement_speed = 1.0;
        camera.process_keyboard(CameraMovement::Up, 1.0);
        assert_vec_eq(camera.position, Vector3::unit_y());
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let camera = FlyCamera::new(Vector3::new(8.0, 5.0, 17.0), -90.0, 0.0);
        let eye = camera.view_matrix() * Vector4::new(8.0, 5.0, 17.0, 1.0);
        assert!(eye.truncate().magnitude() < EPSILON);
    }

    #[test]
    fn config_values_are_applied() {
        let config = CameraConfig {
            zoom: 0.0,
            movement_speed: 7.0,
            mouse_sensitivity: 0.3,
            ..CameraConfig::default()
        };
        let camera = FlyCamera::from_config(&config);
        assert_eq!(camera.zoom(), MIN_ZOOM);
        assert_eq!(camera.movement_speed, 7.0);
        assert_eq!(camera.mouse_sensitivity, 0.3);
        assert_vec_eq(camera.position, Vector3::new(8.0, 5.0, 17.0));
    }
}
