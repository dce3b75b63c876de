//! Velocity integration.

use spinor_core::System;
use spinor_ecs::{Entity, World};
use spinor_math::Rotor;

use crate::transform::Transform;
use crate::velocity::Velocity;

/// Integrates [`Velocity`] into [`Transform`] each frame.
///
/// Runs at priority 100 so most gameplay systems can simply depend on
/// up-to-date transforms without declaring an explicit dependency.
/// Updates are collected first and written back in a second pass, so a
/// frame reads a consistent snapshot of all transforms.
#[derive(Debug, Default)]
pub struct MovementSystem;

pub const MOVEMENT_SYSTEM_NAME: &str = "movement";

impl System for MovementSystem {
    fn name(&self) -> &str {
        MOVEMENT_SYSTEM_NAME
    }

    fn priority(&self) -> i32 {
        100
    }

    fn update(&mut self, world: &mut World, delta_time: f64) {
        let entities = world.query().with::<Transform>().with::<Velocity>().execute();

        let mut updates: Vec<(Entity, Transform)> = Vec::new();
        for entity in entities {
            let (Some(&transform), Some(&velocity)) = (
                world.get_component::<Transform>(entity),
                world.get_component::<Velocity>(entity),
            ) else {
                continue;
            };

            let mut next = transform;
            let mut changed = false;

            if velocity.linear.length_squared() > 0.0 {
                next = next.translated(velocity.linear.scale(delta_time));
                changed = true;
            }

            if velocity.angular.length_squared() > 0.0 {
                let step = velocity.angular.scale(delta_time);
                let delta = Rotor::from_euler_angles(step.x, step.y, step.z);
                next = next.rotated(delta);
                // Renormalize so drift cannot accumulate over many frames.
                next = next.with_rotation(next.rotation.normalize());
                changed = true;
            }

            if changed {
                updates.push((entity, next));
            }
        }

        for (entity, transform) in updates {
            world.add_component(entity, transform);
        }
    }
}
