use cgmath::{Deg, Matrix4, Vector3};

/// Scale, XYZ Euler rotation in degrees and translation of one object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    /// Degrees about X, Y and Z
    pub rotation: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

impl Transform {
    pub fn new(scale: Vector3<f32>, rotation: Vector3<f32>, position: Vector3<f32>) -> Self {
        Self {
            scale,
            rotation,
            position,
        }
    }

    /// Model matrix `T * Rx * Ry * Rz * S`
    ///
    /// Scale is applied first and translation last; the Z rotation acts
    /// before Y and X.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_z(Deg(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Point3, Transform as _};

    use super::*;

    fn approx(a: Point3<f32>, b: Point3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn identity_by_default() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!(approx(Transform::default().model_matrix().transform_point(p), p));
    }

    #[test]
    fn scale_applies_before_translation() {
        let t = Transform::new(
            Vector3::new(2.0, 3.0, 4.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(10.0, 0.0, 0.0),
        );
        let p = t.model_matrix().transform_point(Point3::new(1.0, 1.0, 1.0));
        assert!(approx(p, Point3::new(12.0, 3.0, 4.0)));
    }

    #[test]
    fn z_rotation_applies_before_x() {
        let t = Transform::new(
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(90.0, 0.0, 90.0),
            Vector3::new(0.0, 0.0, 0.0),
        );
        // Rz takes +X to +Y, then Rx takes +Y to +Z
        let p = t.model_matrix().transform_point(Point3::new(1.0, 0.0, 0.0));
        assert!(approx(p, Point3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn plane_rotated_upright_faces_camera() {
        // backdrop: a floor plane stood up on its edge
        let t = Transform::new(
            Vector3::new(50.0, 30.0, 50.0),
            Vector3::new(90.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -10.0),
        );
        let m = t.model_matrix();
        let normal = m.transform_vector(Vector3::new(0.0, 1.0, 0.0)).normalize();
        assert!((normal - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-5);
        assert!(approx(
            m.transform_point(Point3::new(1.0, 0.0, 1.0)),
            Point3::new(50.0, -50.0, -10.0)
        ));
    }
}
