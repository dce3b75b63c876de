//! Rotors: rotations as even-grade multivectors.
//!
//! A [`Rotor`] plays the role a unit quaternion plays elsewhere. Rotations
//! are applied with the sandwich product `R v R~` and composed with the
//! geometric product. Composition drifts away from unit norm under
//! floating point, so composed rotors must be renormalized periodically
//! with [`Rotor::normalize`].

use serde::{Deserialize, Serialize};

use crate::EPSILON;
use crate::multivector::Multivector;

/// A rotation, stored as a (near-)unit even-grade multivector: scalar plus
/// bivector terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotor {
    mv: Multivector,
}

impl Rotor {
    /// The identity rotation (scalar 1).
    pub const IDENTITY: Self = Self {
        mv: Multivector::scalar(1.0),
    };

    /// Wrap a raw multivector as a rotor.
    ///
    /// Intended for even-grade, near-unit inputs; no check is performed.
    #[must_use]
    pub const fn from_multivector(mv: Multivector) -> Self {
        Self { mv }
    }

    /// Build a rotor rotating by `angle` radians in the plane of `axis`.
    ///
    /// Only the bivector part of the (normalized) axis contributes:
    /// `R = cos(angle/2) + sin(angle/2)·B̂`.
    #[must_use]
    pub fn from_angle_axis(angle: f64, axis: Multivector) -> Self {
        let half = angle * 0.5;
        let (sin, cos) = half.sin_cos();

        let unit_axis = axis.normalize();
        let plane = Multivector::bivector(unit_axis.e12, unit_axis.e13, unit_axis.e23);

        Self {
            mv: Multivector::scalar(cos).add(plane.scale(sin)),
        }
    }

    /// Build a rotor from Euler angles (radians).
    ///
    /// The per-axis rotors are composed as `rz * ry * rx`: the x rotation
    /// applies first, then y, then z. Rotor composition is non-commutative,
    /// so this order is normative and must not be rearranged.
    #[must_use]
    pub fn from_euler_angles(x: f64, y: f64, z: f64) -> Self {
        let rx = Self::from_angle_axis(x, Multivector::bivector(0.0, 1.0, 0.0));
        let ry = Self::from_angle_axis(y, Multivector::bivector(0.0, 0.0, 1.0));
        let rz = Self::from_angle_axis(z, Multivector::bivector(1.0, 0.0, 0.0));

        rz.compose(ry).compose(rx)
    }

    /// Compose two rotations via the geometric product.
    ///
    /// `a.compose(b)` applies `b` first, then `a`.
    #[must_use]
    pub fn compose(self, other: Self) -> Self {
        Self {
            mv: self.mv.geometric_product(other.mv),
        }
    }

    /// Rotate a multivector with the sandwich product `R v R~`.
    ///
    /// This is the only correct way to apply a rotor to a vector; a bare
    /// geometric product is not a rotation.
    #[must_use]
    pub fn apply(self, vector: Multivector) -> Multivector {
        self.mv
            .geometric_product(vector)
            .geometric_product(self.mv.reverse())
    }

    /// The inverse rotation.
    ///
    /// For a unit rotor this is just the reverse; a zero rotor is returned
    /// unchanged rather than dividing by zero.
    #[must_use]
    pub fn inverse(self) -> Self {
        let n = self.mv.norm();
        if n == 0.0 {
            self
        } else {
            Self {
                mv: self.mv.reverse().scale(1.0 / n),
            }
        }
    }

    /// Rescale to unit norm, countering floating-point drift from repeated
    /// composition. Required maintenance, not an optional nicety.
    #[must_use]
    pub fn normalize(self) -> Self {
        Self {
            mv: self.mv.normalize(),
        }
    }

    /// Comparison of the underlying multivectors within `epsilon`.
    #[must_use]
    pub fn approx_eq_eps(self, other: Self, epsilon: f64) -> bool {
        self.mv.approx_eq_eps(other.mv, epsilon)
    }

    /// Comparison within the default [`EPSILON`].
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        self.approx_eq_eps(other, EPSILON)
    }

    /// The underlying even-grade multivector.
    #[must_use]
    pub const fn multivector(self) -> Multivector {
        self.mv
    }

    /// Derive the equivalent 4×4 homogeneous rotation matrix, row-major.
    ///
    /// Computed algebraically from the scalar and bivector terms; no
    /// trigonometry is re-entered. Consumers (the renderer) treat the
    /// result as opaque.
    #[must_use]
    pub fn to_matrix4(self) -> [f64; 16] {
        let s = self.mv.scalar;
        let xy = self.mv.e12;
        let xz = self.mv.e13;
        let yz = self.mv.e23;

        let s2 = s * s;
        let xy2 = xy * xy;
        let xz2 = xz * xz;
        let yz2 = yz * yz;

        let sxy = s * xy;
        let sxz = s * xz;
        let syz = s * yz;
        let xyxz = xy * xz;
        let xyyz = xy * yz;
        let xzyz = xz * yz;

        [
            s2 + xy2 - xz2 - yz2,
            2.0 * (xyxz + syz),
            2.0 * (xyyz - sxz),
            0.0,
            2.0 * (xyxz - syz),
            s2 - xy2 + xz2 - yz2,
            2.0 * (xzyz + sxy),
            0.0,
            2.0 * (xyyz + sxz),
            2.0 * (xzyz - sxy),
            s2 - xy2 - xz2 + yz2,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ]
    }
}

impl Default for Rotor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Rotor {
    type Output = Rotor;
    /// `*` composes rotations (right-hand side applies first).
    fn mul(self, rhs: Rotor) -> Rotor {
        self.compose(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const XY_PLANE: Multivector = Multivector::bivector(1.0, 0.0, 0.0);

    #[test]
    fn test_identity_is_unit_scalar() {
        assert!(
            Rotor::IDENTITY
                .multivector()
                .approx_eq(Multivector::scalar(1.0))
        );
        assert!((Rotor::IDENTITY.multivector().norm() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_quarter_turn_in_xy_plane() {
        // R e1 R~ with R = cos(θ/2) + sin(θ/2)e12 gives cosθ·e1 - sinθ·e2,
        // so a quarter turn sends e1 to -e2 in this orientation convention.
        let r = Rotor::from_angle_axis(FRAC_PI_2, XY_PLANE);
        let rotated = r.apply(Multivector::vector(1.0, 0.0, 0.0));
        assert!(rotated.approx_eq_eps(Multivector::vector(0.0, -1.0, 0.0), 1e-9));
        assert!((rotated.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_axis_is_fixed_point() {
        let r = Rotor::from_angle_axis(1.234, XY_PLANE);
        // The rotation plane itself is a fixed point of the sandwich
        // product, as is the vector orthogonal to it.
        assert!(r.apply(XY_PLANE).approx_eq_eps(XY_PLANE, 1e-9));
        let axis_vector = Multivector::vector(0.0, 0.0, 1.0);
        assert!(r.apply(axis_vector).approx_eq_eps(axis_vector, 1e-9));
    }

    #[test]
    fn test_opposite_angles_cancel() {
        let r = Rotor::from_angle_axis(0.7, XY_PLANE);
        let inv = Rotor::from_angle_axis(-0.7, XY_PLANE);
        assert!(r.compose(inv).approx_eq_eps(Rotor::IDENTITY, 1e-9));
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let r = Rotor::from_angle_axis(0.9, Multivector::bivector(0.3, -0.4, 0.5));
        let v = Multivector::vector(1.0, 2.0, 3.0);
        let roundtrip = r.inverse().apply(r.apply(v));
        assert!(roundtrip.approx_eq_eps(v, 1e-9));
    }

    #[test]
    fn test_full_turn_is_minus_identity() {
        // A 2π rotor is -1, which still acts as the identity through the
        // sandwich product.
        let r = Rotor::from_angle_axis(2.0 * PI, XY_PLANE);
        let v = Multivector::vector(1.0, 2.0, 3.0);
        assert!(r.apply(v).approx_eq_eps(v, 1e-9));
    }

    #[test]
    fn test_euler_composition_order() {
        // z∘y∘x: rotating only about one axis must match the single-axis
        // constructor exactly.
        let only_x = Rotor::from_euler_angles(FRAC_PI_4, 0.0, 0.0);
        let direct = Rotor::from_angle_axis(FRAC_PI_4, Multivector::bivector(0.0, 1.0, 0.0));
        assert!(only_x.approx_eq(direct));

        // Mixed-axis composition is order sensitive; x-then-z must differ
        // from z-then-x.
        let xz = Rotor::from_euler_angles(FRAC_PI_2, 0.0, FRAC_PI_2);
        let zx = Rotor::from_angle_axis(FRAC_PI_2, Multivector::bivector(0.0, 1.0, 0.0)).compose(
            Rotor::from_angle_axis(FRAC_PI_2, Multivector::bivector(1.0, 0.0, 0.0)),
        );
        assert!(!xz.approx_eq_eps(zx, 1e-9));
    }

    #[test]
    fn test_composition_drift_and_renormalize() {
        let step = Rotor::from_angle_axis(0.01, Multivector::bivector(0.6, 0.0, 0.8));
        let mut accumulated = Rotor::IDENTITY;
        for _ in 0..1000 {
            accumulated = accumulated.compose(step);
        }
        let renormalized = accumulated.normalize();
        assert!((renormalized.multivector().norm() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_to_matrix4_identity() {
        let m = Rotor::IDENTITY.to_matrix4();
        #[rustfmt::skip]
        let expected = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        assert_eq!(m, expected);
    }

    #[test]
    fn test_to_matrix4_single_plane_rotor() {
        // The matrix derivation identifies (e12, e13, e23) with the three
        // imaginary quaternion axes, so an e12-plane rotor of angle θ maps
        // to the matrix fixing the first axis:
        //   [1    0     0   ]
        //   [0  cosθ  sinθ ]
        //   [0 -sinθ  cosθ ]
        let theta = 0.6f64;
        let m = Rotor::from_angle_axis(theta, XY_PLANE).to_matrix4();
        let (sin, cos) = theta.sin_cos();
        let tol = 1e-12;
        assert!((m[0] - 1.0).abs() < tol);
        assert!(m[1].abs() < tol && m[2].abs() < tol);
        assert!((m[5] - cos).abs() < tol);
        assert!((m[6] - sin).abs() < tol);
        assert!((m[9] + sin).abs() < tol);
        assert!((m[10] - cos).abs() < tol);
        assert_eq!(m[15], 1.0);
    }

    #[test]
    fn test_to_matrix4_is_orthonormal() {
        let r = Rotor::from_angle_axis(0.6, Multivector::bivector(0.2, -0.7, 0.4));
        let m = r.to_matrix4();
        // Each 3×3 row has unit length and rows are mutually orthogonal.
        for row in 0..3 {
            let len_sq: f64 = (0..3).map(|c| m[row * 4 + c] * m[row * 4 + c]).sum();
            assert!((len_sq - 1.0).abs() < 1e-9);
        }
        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            let dot: f64 = (0..3).map(|c| m[a * 4 + c] * m[b * 4 + c]).sum();
            assert!(dot.abs() < 1e-9);
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let r = Rotor::from_angle_axis(1.1, XY_PLANE);
        let bytes = rmp_serde::to_vec(&r).unwrap();
        let restored: Rotor = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(r, restored);
    }
}
