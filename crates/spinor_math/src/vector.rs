//! Euclidean vector helpers.
//!
//! [`Vector2`] and [`Vector3`] are thin convenience types for positions,
//! velocities, and sizes. They convert to and from the grade-1 part of a
//! [`Multivector`] but deliberately do not implement the geometric product
//! themselves; anything rotational goes through [`crate::Rotor`].

use serde::{Deserialize, Serialize};

use crate::EPSILON;
use crate::multivector::Multivector;

/// A 2D Euclidean vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit-length copy; the zero vector is returned unchanged.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 { self } else { self.scale(1.0 / len) }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        other.sub(self).length()
    }

    /// The angle of the ray from `self` to `other`, in radians.
    #[must_use]
    pub fn angle_to(self, other: Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Rotate counterclockwise by `angle` radians about the origin.
    #[must_use]
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Linear interpolation: `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self.add(other.sub(self).scale(t))
    }

    /// Componentwise clamp between `min` and `max`.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(self.x.clamp(min.x, max.x), self.y.clamp(min.y, max.y))
    }

    #[must_use]
    pub const fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    #[must_use]
    pub const fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    /// Embed as the grade-1 part of a multivector (z = 0).
    #[must_use]
    pub const fn to_multivector(self) -> Multivector {
        Multivector::vector(self.x, self.y, 0.0)
    }

    #[must_use]
    pub fn approx_eq_eps(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }

    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        self.approx_eq_eps(other, EPSILON)
    }
}

/// A 3D Euclidean vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit-length copy; the zero vector is returned unchanged.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 { self } else { self.scale(1.0 / len) }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        other.sub(self).length()
    }

    /// Linear interpolation: `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self.add(other.sub(self).scale(t))
    }

    /// Componentwise clamp between `min` and `max`.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            self.x.clamp(min.x, max.x),
            self.y.clamp(min.y, max.y),
            self.z.clamp(min.z, max.z),
        )
    }

    #[must_use]
    pub const fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    #[must_use]
    pub const fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    #[must_use]
    pub const fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }

    /// Embed as the grade-1 part of a multivector.
    #[must_use]
    pub const fn to_multivector(self) -> Multivector {
        Multivector::vector(self.x, self.y, self.z)
    }

    /// Extract the grade-1 part of a multivector; other grades are ignored.
    #[must_use]
    pub const fn from_multivector(mv: Multivector) -> Self {
        Self::new(mv.e1, mv.e2, mv.e3)
    }

    /// Project onto the XY plane.
    #[must_use]
    pub const fn to_vector2(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    #[must_use]
    pub fn approx_eq_eps(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        self.approx_eq_eps(other, EPSILON)
    }
}

macro_rules! vector_ops {
    ($ty:ty) => {
        impl std::ops::Add for $ty {
            type Output = $ty;
            fn add(self, rhs: $ty) -> $ty {
                <$ty>::add(self, rhs)
            }
        }

        impl std::ops::Sub for $ty {
            type Output = $ty;
            fn sub(self, rhs: $ty) -> $ty {
                <$ty>::sub(self, rhs)
            }
        }

        impl std::ops::Mul<f64> for $ty {
            type Output = $ty;
            fn mul(self, rhs: f64) -> $ty {
                self.scale(rhs)
            }
        }

        impl std::ops::Neg for $ty {
            type Output = $ty;
            fn neg(self) -> $ty {
                self.scale(-1.0)
            }
        }
    };
}

vector_ops!(Vector2);
vector_ops!(Vector3);
