//! Fluent entity construction.

use crate::component::Component;
use crate::entity::Entity;
use crate::world::World;

/// Builds up an entity one component at a time:
/// `world.entity().with(Position::default()).with(Speed(2.0)).build()`.
///
/// The entity is spawned as soon as the builder is created and each
/// `with` attaches immediately, so listeners observe the components in
/// call order. `build` just hands back the id; dropping the builder
/// without calling it leaves the entity in the world as constructed.
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> EntityBuilder<'w> {
    pub(crate) fn new(world: &'w mut World, entity: Entity) -> Self {
        Self { world, entity }
    }

    /// Attach a component to the entity under construction.
    #[must_use]
    pub fn with<T: Component>(self, component: T) -> Self {
        self.world.add_component(self.entity, component);
        self
    }

    /// The id of the entity under construction.
    #[must_use]
    pub fn id(&self) -> Entity {
        self.entity
    }

    /// Finish, returning the constructed entity's id.
    pub fn build(self) -> Entity {
        self.entity
    }
}
