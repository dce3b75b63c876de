//! Linear and angular velocity.

use serde::{Deserialize, Serialize};
use spinor_ecs::Component;
use spinor_math::Vector3;

/// Rate of change for a [`crate::Transform`], consumed by the movement
/// system. `linear` is world units per second; `angular` is Euler-rate
/// radians per second about the x, y, and z axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Velocity {
    pub const ZERO: Self = Self {
        linear: Vector3::ZERO,
        angular: Vector3::ZERO,
    };

    #[must_use]
    pub const fn new(linear: Vector3, angular: Vector3) -> Self {
        Self { linear, angular }
    }

    #[must_use]
    pub const fn linear(linear: Vector3) -> Self {
        Self {
            linear,
            angular: Vector3::ZERO,
        }
    }

    #[must_use]
    pub const fn angular(angular: Vector3) -> Self {
        Self {
            linear: Vector3::ZERO,
            angular,
        }
    }

    #[must_use]
    pub const fn with_linear(self, linear: Vector3) -> Self {
        Self { linear, ..self }
    }

    #[must_use]
    pub const fn with_angular(self, angular: Vector3) -> Self {
        Self { angular, ..self }
    }

    /// The velocity after one step of acceleration.
    #[must_use]
    pub fn accelerated(self, acceleration: Vector3, delta_time: f64) -> Self {
        Self {
            linear: self.linear.add(acceleration.scale(delta_time)),
            ..self
        }
    }
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}
