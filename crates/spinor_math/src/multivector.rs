//! General multivectors of the 3D geometric algebra.
//!
//! A [`Multivector`] carries all four grades at once: one scalar, three
//! vector components (e1, e2, e3), three bivector components (e12, e13,
//! e23), and one trivector component (e123). It is a plain `Copy` value
//! type; every operation returns a new value.

use serde::{Deserialize, Serialize};

use crate::EPSILON;

/// An 8-component multivector over the basis {1, e1, e2, e3, e12, e13,
/// e23, e123}.
///
/// The signature is e1² = e2² = e3² = +1, so bivectors square to -1 and
/// the pseudoscalar e123 squares to -1 as well. Equality of floating-point
/// results should go through [`Multivector::approx_eq`], not `==`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Multivector {
    /// Grade-0 (scalar) component.
    pub scalar: f64,
    /// Grade-1 component along e1.
    pub e1: f64,
    /// Grade-1 component along e2.
    pub e2: f64,
    /// Grade-1 component along e3.
    pub e3: f64,
    /// Grade-2 component in the e1∧e2 plane.
    pub e12: f64,
    /// Grade-2 component in the e1∧e3 plane.
    pub e13: f64,
    /// Grade-2 component in the e2∧e3 plane.
    pub e23: f64,
    /// Grade-3 (pseudoscalar) component.
    pub e123: f64,
}

impl Multivector {
    /// The zero multivector.
    pub const ZERO: Self = Self {
        scalar: 0.0,
        e1: 0.0,
        e2: 0.0,
        e3: 0.0,
        e12: 0.0,
        e13: 0.0,
        e23: 0.0,
        e123: 0.0,
    };

    /// Create a multivector from all 8 components, in grade order.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        scalar: f64,
        e1: f64,
        e2: f64,
        e3: f64,
        e12: f64,
        e13: f64,
        e23: f64,
        e123: f64,
    ) -> Self {
        Self {
            scalar,
            e1,
            e2,
            e3,
            e12,
            e13,
            e23,
            e123,
        }
    }

    /// A pure scalar.
    #[must_use]
    pub const fn scalar(value: f64) -> Self {
        Self {
            scalar: value,
            ..Self::ZERO
        }
    }

    /// A pure grade-1 vector.
    #[must_use]
    pub const fn vector(x: f64, y: f64, z: f64) -> Self {
        Self {
            e1: x,
            e2: y,
            e3: z,
            ..Self::ZERO
        }
    }

    /// A pure grade-2 bivector.
    #[must_use]
    pub const fn bivector(xy: f64, xz: f64, yz: f64) -> Self {
        Self {
            e12: xy,
            e13: xz,
            e23: yz,
            ..Self::ZERO
        }
    }

    /// A pure grade-3 trivector (pseudoscalar multiple).
    #[must_use]
    pub const fn trivector(xyz: f64) -> Self {
        Self {
            e123: xyz,
            ..Self::ZERO
        }
    }

    /// Componentwise sum.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self {
            scalar: self.scalar + other.scalar,
            e1: self.e1 + other.e1,
            e2: self.e2 + other.e2,
            e3: self.e3 + other.e3,
            e12: self.e12 + other.e12,
            e13: self.e13 + other.e13,
            e23: self.e23 + other.e23,
            e123: self.e123 + other.e123,
        }
    }

    /// Componentwise difference.
    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self {
            scalar: self.scalar - other.scalar,
            e1: self.e1 - other.e1,
            e2: self.e2 - other.e2,
            e3: self.e3 - other.e3,
            e12: self.e12 - other.e12,
            e13: self.e13 - other.e13,
            e23: self.e23 - other.e23,
            e123: self.e123 - other.e123,
        }
    }

    /// Uniform scaling of all components.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            scalar: self.scalar * factor,
            e1: self.e1 * factor,
            e2: self.e2 * factor,
            e3: self.e3 * factor,
            e12: self.e12 * factor,
            e13: self.e13 * factor,
            e23: self.e23 * factor,
            e123: self.e123 * factor,
        }
    }

    /// The geometric product.
    ///
    /// Bilinear and associative but NOT commutative. The expansion below is
    /// the full 8×8 structure-constant table for the {e1,e2,e3} basis with
    /// positive signature: orthogonal vectors multiply to bivectors
    /// (e1·e2 = e12), any vector times itself folds into its squared
    /// length, and e123² = -1.
    #[must_use]
    pub fn geometric_product(self, other: Self) -> Self {
        let a = self;
        let b = other;

        Self {
            scalar: a.scalar * b.scalar + a.e1 * b.e1 + a.e2 * b.e2 + a.e3 * b.e3
                - a.e12 * b.e12
                - a.e13 * b.e13
                - a.e23 * b.e23
                - a.e123 * b.e123,
            e1: a.scalar * b.e1 + a.e1 * b.scalar - a.e2 * b.e12 - a.e3 * b.e13
                + a.e12 * b.e2
                + a.e13 * b.e3
                - a.e23 * b.e123
                - a.e123 * b.e23,
            e2: a.scalar * b.e2 + a.e1 * b.e12 + a.e2 * b.scalar
                - a.e3 * b.e23
                - a.e12 * b.e1
                + a.e13 * b.e123
                + a.e23 * b.e3
                + a.e123 * b.e13,
            e3: a.scalar * b.e3 + a.e1 * b.e13 + a.e2 * b.e23 + a.e3 * b.scalar
                - a.e12 * b.e123
                - a.e13 * b.e1
                - a.e23 * b.e2
                - a.e123 * b.e12,
            e12: a.scalar * b.e12 + a.e1 * b.e2 - a.e2 * b.e1
                + a.e3 * b.e123
                + a.e12 * b.scalar
                - a.e13 * b.e23
                + a.e23 * b.e13
                + a.e123 * b.e3,
            e13: a.scalar * b.e13 + a.e1 * b.e3 - a.e2 * b.e123 - a.e3 * b.e1
                + a.e12 * b.e23
                + a.e13 * b.scalar
                - a.e23 * b.e12
                - a.e123 * b.e2,
            e23: a.scalar * b.e23 + a.e1 * b.e123 + a.e2 * b.e3
                - a.e3 * b.e2
                - a.e12 * b.e13
                + a.e13 * b.e12
                + a.e23 * b.scalar
                + a.e123 * b.e1,
            e123: a.scalar * b.e123 + a.e1 * b.e23 - a.e2 * b.e13
                + a.e3 * b.e12
                + a.e12 * b.e3
                - a.e13 * b.e2
                + a.e23 * b.e1
                + a.e123 * b.scalar,
        }
    }

    /// Reversion: grades 2 and 3 flip sign, grades 0 and 1 are untouched.
    ///
    /// Used to build the sandwich product and norms.
    #[must_use]
    pub fn reverse(self) -> Self {
        Self {
            e12: -self.e12,
            e13: -self.e13,
            e23: -self.e23,
            e123: -self.e123,
            ..self
        }
    }

    /// Clifford conjugation: grades 1 and 2 flip sign, grades 0 and 3 are
    /// untouched. Distinct from [`Multivector::reverse`].
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self {
            e1: -self.e1,
            e2: -self.e2,
            e3: -self.e3,
            e12: -self.e12,
            e13: -self.e13,
            e23: -self.e23,
            ..self
        }
    }

    /// The scalar part of `self * self.reverse()`.
    #[must_use]
    pub fn norm_squared(self) -> f64 {
        self.geometric_product(self.reverse()).scalar
    }

    /// The multivector norm, `sqrt((m * m~).scalar)`.
    ///
    /// Returns 0.0 for the zero multivector (and clamps a numerically
    /// negative square to zero) instead of producing NaN.
    #[must_use]
    pub fn norm(self) -> f64 {
        self.norm_squared().max(0.0).sqrt()
    }

    /// Scale to unit norm.
    ///
    /// A zero-norm multivector is returned unchanged; normalization never
    /// produces NaN or infinity.
    #[must_use]
    pub fn normalize(self) -> Self {
        let n = self.norm();
        if n == 0.0 { self } else { self.scale(1.0 / n) }
    }

    /// Componentwise comparison within `epsilon`.
    #[must_use]
    pub fn approx_eq_eps(self, other: Self, epsilon: f64) -> bool {
        (self.scalar - other.scalar).abs() < epsilon
            && (self.e1 - other.e1).abs() < epsilon
            && (self.e2 - other.e2).abs() < epsilon
            && (self.e3 - other.e3).abs() < epsilon
            && (self.e12 - other.e12).abs() < epsilon
            && (self.e13 - other.e13).abs() < epsilon
            && (self.e23 - other.e23).abs() < epsilon
            && (self.e123 - other.e123).abs() < epsilon
    }

    /// Componentwise comparison within the default [`EPSILON`].
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        self.approx_eq_eps(other, EPSILON)
    }
}

impl std::ops::Add for Multivector {
    type Output = Multivector;
    fn add(self, rhs: Multivector) -> Multivector {
        Multivector::add(self, rhs)
    }
}

impl std::ops::Sub for Multivector {
    type Output = Multivector;
    fn sub(self, rhs: Multivector) -> Multivector {
        Multivector::sub(self, rhs)
    }
}

impl std::ops::Mul for Multivector {
    type Output = Multivector;
    /// `*` is the geometric product.
    fn mul(self, rhs: Multivector) -> Multivector {
        self.geometric_product(rhs)
    }
}

impl std::ops::Mul<f64> for Multivector {
    type Output = Multivector;
    fn mul(self, rhs: f64) -> Multivector {
        self.scale(rhs)
    }
}

impl std::ops::Neg for Multivector {
    type Output = Multivector;
    fn neg(self) -> Multivector {
        self.scale(-1.0)
    }
}

impl std::fmt::Display for Multivector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut terms: Vec<String> = Vec::new();
        let named = [
            (self.scalar, ""),
            (self.e1, "e1"),
            (self.e2, "e2"),
            (self.e3, "e3"),
            (self.e12, "e12"),
            (self.e13, "e13"),
            (self.e23, "e23"),
            (self.e123, "e123"),
        ];
        for (value, basis) in named {
            if value.abs() > EPSILON {
                terms.push(format!("{value}{basis}"));
            }
        }
        if terms.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", terms.join(" + "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E1: Multivector = Multivector::vector(1.0, 0.0, 0.0);
    const E2: Multivector = Multivector::vector(0.0, 1.0, 0.0);
    const E3: Multivector = Multivector::vector(0.0, 0.0, 1.0);

    #[test]
    fn test_basis_vectors_square_to_one() {
        for e in [E1, E2, E3] {
            assert!((e * e).approx_eq(Multivector::scalar(1.0)));
        }
    }

    #[test]
    fn test_orthogonal_product_yields_bivector() {
        let product = E1 * E2;
        assert!(product.approx_eq(Multivector::bivector(1.0, 0.0, 0.0)));
        // Anticommutes.
        assert!((E2 * E1).approx_eq(Multivector::bivector(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_vector_squared_is_length_squared() {
        let v = Multivector::vector(3.0, 4.0, 12.0);
        let sq = v * v;
        assert!(sq.approx_eq(Multivector::scalar(169.0)));
    }

    #[test]
    fn test_pseudoscalar_squares_to_minus_one() {
        let i = Multivector::trivector(1.0);
        assert!((i * i).approx_eq(Multivector::scalar(-1.0)));
    }

    #[test]
    fn test_pseudoscalar_is_central() {
        // e123 commutes with every element of the algebra.
        let i = Multivector::trivector(1.0);
        let samples = [
            E1,
            Multivector::bivector(1.0, 0.0, 0.0),
            Multivector::bivector(0.0, 1.0, 0.0),
            Multivector::bivector(0.0, 0.0, 1.0),
            Multivector::new(1.0, 2.0, -1.0, 0.5, 3.0, -2.0, 1.5, 0.25),
        ];
        for m in samples {
            assert!((i * m).approx_eq(m * i));
        }
    }

    #[test]
    fn test_pseudoscalar_bivector_products() {
        let i = Multivector::trivector(1.0);
        // e123 * e12 = -e3, e123 * e13 = e2, e123 * e23 = -e1.
        assert!((i * Multivector::bivector(1.0, 0.0, 0.0)).approx_eq(Multivector::vector(
            0.0, 0.0, -1.0
        )));
        assert!(
            (i * Multivector::bivector(0.0, 1.0, 0.0))
                .approx_eq(Multivector::vector(0.0, 1.0, 0.0))
        );
        assert!((i * Multivector::bivector(0.0, 0.0, 1.0)).approx_eq(Multivector::vector(
            -1.0, 0.0, 0.0
        )));
    }

    #[test]
    fn test_mixed_grade_associativity() {
        // e1 * e23 = e123, so this product chain crosses the trivector.
        let e23 = Multivector::bivector(0.0, 0.0, 1.0);
        let e13 = Multivector::bivector(0.0, 1.0, 0.0);
        let left = (E1 * e23) * e13;
        let right = E1 * (e23 * e13);
        assert!(left.approx_eq(right));
        assert!(left.approx_eq(Multivector::vector(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_geometric_product_associative() {
        let a = Multivector::new(1.0, 2.0, -1.0, 0.5, 3.0, -2.0, 1.5, 0.25);
        let b = Multivector::new(-0.5, 1.0, 4.0, -3.0, 0.0, 2.5, -1.0, 1.0);
        let c = Multivector::new(2.0, 0.0, -2.0, 1.0, -0.5, 1.0, 3.0, -1.5);
        let left = (a * b) * c;
        let right = a * (b * c);
        assert!(left.approx_eq_eps(right, 1e-9));
    }

    #[test]
    fn test_scalar_multiplication_folds_into_scalar() {
        let a = Multivector::scalar(3.0);
        let b = Multivector::scalar(-4.0);
        assert!((a * b).approx_eq(Multivector::scalar(-12.0)));
    }

    #[test]
    fn test_add_sub_roundtrip() {
        let a = Multivector::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0);
        let b = Multivector::new(8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0);
        assert!((a + b - b).approx_eq(a));
    }

    #[test]
    fn test_reverse_flips_grades_two_and_three() {
        let m = Multivector::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0);
        let r = m.reverse();
        assert_eq!(r.scalar, 1.0);
        assert_eq!(r.e1, 2.0);
        assert_eq!(r.e12, -5.0);
        assert_eq!(r.e123, -8.0);
    }

    #[test]
    fn test_conjugate_is_not_reverse() {
        let m = Multivector::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0);
        let c = m.conjugate();
        assert_eq!(c.scalar, 1.0);
        assert_eq!(c.e1, -2.0);
        assert_eq!(c.e12, -5.0);
        assert_eq!(c.e123, 8.0);
        assert!(!c.approx_eq(m.reverse()));
    }

    #[test]
    fn test_norm_of_vector() {
        let v = Multivector::vector(3.0, 4.0, 0.0);
        assert!((v.norm() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_unit_norm() {
        let m = Multivector::new(1.0, 2.0, 0.0, -1.0, 0.5, 0.0, 0.0, 0.0);
        assert!((m.normalize().norm() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        let normalized = Multivector::ZERO.normalize();
        assert!(normalized.approx_eq(Multivector::ZERO));
        assert!(normalized.scalar.is_finite());
        assert_eq!(Multivector::ZERO.norm(), 0.0);
    }

    #[test]
    fn test_display_formats_terms() {
        assert_eq!(Multivector::ZERO.to_string(), "0");
        let m = Multivector::scalar(1.0) + Multivector::bivector(2.0, 0.0, 0.0);
        assert_eq!(m.to_string(), "1 + 2e12");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let m = Multivector::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0);
        let bytes = rmp_serde::to_vec(&m).unwrap();
        let restored: Multivector = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(m, restored);
    }
}
