use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// Number of scalar components in a camera pose written on the command line:
/// position (3), target (3), up (3), vertical fov in degrees, near, far.
pub const CAMERA_COMPONENTS: usize = 12;

const EPSILON: f32 = 1e-6;

/// Initial viewpoint of the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // --- View ---
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,

    // --- Projection ---
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new_perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y_deg: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov_y_deg,
            near,
            far,
        }
    }

    /// Builds a camera from its flat component list and checks it.
    ///
    /// # Returns
    /// * `Result<Camera, String>` - The camera or the reason it was rejected.
    pub fn from_components(components: &[f32]) -> Result<Self, String> {
        if components.len() != CAMERA_COMPONENTS {
            return Err(format!(
                "expected {} components, got {}",
                CAMERA_COMPONENTS,
                components.len()
            ));
        }

        let c = components;
        let camera = Self::new_perspective(
            Point3::new(c[0], c[1], c[2]),
            Point3::new(c[3], c[4], c[5]),
            Vector3::new(c[6], c[7], c[8]),
            c[9],
            c[10],
            c[11],
        );
        camera.validate()?;
        Ok(camera)
    }

    /// Flat component list, in the same order `from_components` reads it.
    pub fn components(&self) -> [f32; CAMERA_COMPONENTS] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.target.x,
            self.target.y,
            self.target.z,
            self.up.x,
            self.up.y,
            self.up.z,
            self.fov_y_deg,
            self.near,
            self.far,
        ]
    }

    /// Rejects poses the view and projection matrices cannot be built from.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(i) = self.components().iter().position(|v| !v.is_finite()) {
            return Err(format!("component {} is not finite", i + 1));
        }

        // Comparisons are written so that NaN from an overflowing difference fails them.
        let forward = self.target - self.position;
        if !forward.iter().all(|v| v.is_finite()) {
            return Err("position and target are too far apart".to_string());
        }
        if !(forward.norm() >= EPSILON) {
            return Err("position and target coincide".to_string());
        }
        if !(self.up.norm() >= EPSILON) {
            return Err("up vector is zero".to_string());
        }
        if !(forward.normalize().cross(&self.up.normalize()).norm() >= EPSILON) {
            return Err("up vector is parallel to the view direction".to_string());
        }
        if !self.view_matrix().iter().all(|v| v.is_finite()) {
            return Err("view matrix overflows".to_string());
        }

        if self.fov_y_deg <= 0.0 || self.fov_y_deg >= 180.0 {
            return Err(format!(
                "field of view {} is outside (0, 180) degrees",
                self.fov_y_deg
            ));
        }
        if self.near <= 0.0 {
            return Err(format!("near plane {} must be positive", self.near));
        }
        if self.far <= self.near {
            return Err(format!(
                "far plane {} must lie beyond near plane {}",
                self.far, self.near
            ));
        }

        Ok(())
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Matrix4<f32> {
        Perspective3::new(
            aspect_ratio,
            self.fov_y_deg.to_radians(),
            self.near,
            self.far,
        )
        .to_homogeneous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> [f32; CAMERA_COMPONENTS] {
        [0.0, 0.5, 3.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 45.0, 0.1, 100.0]
    }

    #[test]
    fn builds_from_components_in_order() {
        let camera = Camera::from_components(&sample()).expect("valid camera");
        assert_eq!(camera.position, Point3::new(0.0, 0.5, 3.0));
        assert_eq!(camera.target, Point3::origin());
        assert_eq!(camera.up, Vector3::y());
        assert_eq!(camera.fov_y_deg, 45.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 100.0);
        assert_eq!(camera.components(), sample());
    }

    #[test]
    fn rejects_wrong_component_count() {
        let err = Camera::from_components(&sample()[..9]).unwrap_err();
        assert!(err.contains("expected 12"));
    }

    #[test]
    fn rejects_degenerate_poses() {
        let mut c = sample();
        c[3..6].copy_from_slice(&[0.0, 0.5, 3.0]);
        assert!(Camera::from_components(&c).is_err());

        let mut c = sample();
        c[6..9].copy_from_slice(&[0.0, 0.0, 0.0]);
        assert!(Camera::from_components(&c).is_err());

        // Looking straight down with +Y as up.
        let c = [0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 45.0, 0.1, 100.0];
        assert!(Camera::from_components(&c).is_err());
    }

    #[test]
    fn rejects_finite_components_that_overflow() {
        let c = [3e38, 0.0, 0.0, -3e38, 0.0, 0.0, 0.0, 1.0, 0.0, 45.0, 0.1, 100.0];
        let err = Camera::from_components(&c).unwrap_err();
        assert!(err.contains("too far apart"), "{err}");

        // Unit view direction, but the eye translation leaves the f32 range.
        let c = [
            3e38, 3e38, 0.0, 3e38, 3e38, -1.0, 1.0, -1.0, 0.0, 45.0, 0.1, 100.0,
        ];
        let err = Camera::from_components(&c).unwrap_err();
        assert!(err.contains("view matrix"), "{err}");
    }

    #[test]
    fn rejects_bad_projection() {
        for (idx, value) in [(9, 0.0), (9, 180.0), (10, 0.0), (11, 0.05), (0, f32::NAN)] {
            let mut c = sample();
            c[idx] = value;
            assert!(Camera::from_components(&c).is_err(), "index {idx} = {value}");
        }
    }

    #[test]
    fn matrices_are_finite() {
        let camera = Camera::from_components(&sample()).unwrap();
        assert!(camera.view_matrix().iter().all(|v| v.is_finite()));
        assert!(
            camera
                .projection_matrix(800.0 / 600.0)
                .iter()
                .all(|v| v.is_finite())
        );
    }
}
