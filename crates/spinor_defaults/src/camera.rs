//! Perspective camera data.

use serde::{Deserialize, Serialize};
use spinor_ecs::Component;

/// A rendering viewpoint. Position and orientation come from the
/// entity's [`crate::Transform`]; this component carries the projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    pub active: bool,
    /// RGBA clear color in the 0..=1 range.
    pub clear_color: [f64; 4],
}

impl Camera {
    #[must_use]
    pub const fn new(fov_degrees: f64, near: f64, far: f64) -> Self {
        Self {
            fov_degrees,
            near,
            far,
            active: true,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    #[must_use]
    pub const fn with_active(self, active: bool) -> Self {
        Self { active, ..self }
    }

    #[must_use]
    pub const fn with_clear_color(self, r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            clear_color: [r, g, b, a],
            ..self
        }
    }

    /// Column-major perspective projection matrix for the given
    /// width-over-height aspect ratio.
    #[must_use]
    pub fn projection_matrix(self, aspect_ratio: f64) -> [f64; 16] {
        let fov_rad = self.fov_degrees.to_radians();
        let f = 1.0 / (fov_rad / 2.0).tan();
        let range_inv = 1.0 / (self.near - self.far);
        [
            f / aspect_ratio,
            0.0,
            0.0,
            0.0,
            0.0,
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            (self.near + self.far) * range_inv,
            -1.0,
            0.0,
            0.0,
            self.near * self.far * range_inv * 2.0,
            0.0,
        ]
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(60.0, 0.1, 1000.0)
    }
}

impl Component for Camera {
    fn type_name() -> &'static str {
        "Camera"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let cam = Camera::default();
        assert_eq!(cam.fov_degrees, 60.0);
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 1000.0);
        assert!(cam.active);
    }

    #[test]
    fn test_projection_matrix_square_aspect() {
        let cam = Camera::new(90.0, 1.0, 100.0);
        let m = cam.projection_matrix(1.0);
        // tan(45 deg) = 1, so the focal terms are 1.
        assert!((m[0] - 1.0).abs() < 1e-12);
        assert!((m[5] - 1.0).abs() < 1e-12);
        assert_eq!(m[11], -1.0);
        // Depth terms from near=1, far=100.
        assert!((m[10] - (101.0 / -99.0)).abs() < 1e-12);
        assert!((m[14] - (200.0 / -99.0)).abs() < 1e-12);
    }

    #[test]
    fn test_wider_aspect_shrinks_horizontal_focal() {
        let cam = Camera::default();
        let square = cam.projection_matrix(1.0);
        let wide = cam.projection_matrix(16.0 / 9.0);
        assert!(wide[0] < square[0]);
        assert_eq!(wide[5], square[5]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let cam = Camera::new(75.0, 0.5, 500.0).with_clear_color(0.1, 0.2, 0.3, 1.0);
        let bytes = rmp_serde::to_vec(&cam).unwrap();
        let back: Camera = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(cam, back);
    }
}
