//! Position, rotation, and scale in 3D space.

use serde::{Deserialize, Serialize};
use spinor_ecs::Component;
use spinor_math::{Rotor, Vector3};

/// Spatial pose of an entity. Rotation is carried as a [`Rotor`] rather
/// than a matrix or Euler angles; matrices are derived on demand.
///
/// Immutable: every update method returns a new value to be written back
/// with `World::add_component`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Rotor,
    pub scale: Vector3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vector3::ZERO,
        rotation: Rotor::IDENTITY,
        scale: Vector3::ONE,
    };

    #[must_use]
    pub const fn new(position: Vector3, rotation: Rotor, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    #[must_use]
    pub const fn at(position: Vector3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// The pose shifted by `offset` in world space.
    #[must_use]
    pub fn translated(self, offset: Vector3) -> Self {
        Self {
            position: self.position.add(offset),
            ..self
        }
    }

    /// The pose with `delta` composed onto the right of the current
    /// rotation; in application order `delta` rotates first.
    #[must_use]
    pub fn rotated(self, delta: Rotor) -> Self {
        Self {
            rotation: self.rotation.compose(delta),
            ..self
        }
    }

    #[must_use]
    pub const fn with_position(self, position: Vector3) -> Self {
        Self { position, ..self }
    }

    #[must_use]
    pub const fn with_rotation(self, rotation: Rotor) -> Self {
        Self { rotation, ..self }
    }

    #[must_use]
    pub const fn with_scale(self, scale: Vector3) -> Self {
        Self { scale, ..self }
    }

    /// Column-major model matrix: rotation scaled per axis, translation
    /// in the last column.
    #[must_use]
    pub fn world_matrix(self) -> [f64; 16] {
        let r = self.rotation.to_matrix4();
        let s = self.scale;
        let p = self.position;
        [
            r[0] * s.x,
            r[1] * s.x,
            r[2] * s.x,
            0.0,
            r[4] * s.y,
            r[5] * s.y,
            r[6] * s.y,
            0.0,
            r[8] * s.z,
            r[9] * s.z,
            r[10] * s.z,
            0.0,
            p.x,
            p.y,
            p.z,
            1.0,
        ]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform {
    fn type_name() -> &'static str {
        "Transform"
    }
}
