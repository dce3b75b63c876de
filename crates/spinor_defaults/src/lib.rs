//! # spinor_defaults
//!
//! The stock component set and systems most games start from: spatial
//! [`Transform`] and [`Velocity`], rendering-facing [`Sprite`] and
//! [`Camera`], and the [`MovementSystem`] that integrates velocities into
//! transforms each frame.
//!
//! All components here are immutable values with `with_`-style update
//! methods, matching the world's copy-on-write storage discipline.

pub mod camera;
pub mod movement;
pub mod sprite;
pub mod transform;
pub mod velocity;

pub use camera::Camera;
pub use movement::MovementSystem;
pub use sprite::Sprite;
pub use transform::Transform;
pub use velocity::Velocity;
