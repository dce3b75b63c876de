//! # spinor_math
//!
//! Geometric Algebra math library for the engine. All rotation and
//! orientation math goes through [`Rotor`]s and [`Multivector`]s instead of
//! matrices or quaternions, which sidesteps gimbal lock and matrix
//! orthonormality drift. Matrices appear only at the renderer boundary,
//! as plain `[f64; 16]` arrays derived from rotors.
//!
//! The algebra is Cl(3,0): basis {1, e1, e2, e3, e12, e13, e23, e123} with
//! e1² = e2² = e3² = +1.

pub mod multivector;
pub mod rotor;
pub mod vector;

pub use multivector::Multivector;
pub use rotor::Rotor;
pub use vector::{Vector2, Vector3};

/// Default tolerance for approximate comparisons of multivector and vector
/// components.
pub const EPSILON: f64 = 1e-10;
