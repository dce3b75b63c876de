//! The ECS world: entity set, per-type component maps, and cached queries.
//!
//! Storage is a nested map (outer key the [`ComponentTypeId`], inner key
//! the [`Entity`]), so single-component lookups are O(1). Multi-type
//! queries intersect the per-type maps, seeded from the type with the
//! fewest holders, and memoize their results keyed by the sorted type set.
//! The cache is invalidated wholesale on ANY component mutation anywhere
//! in the world: coarse, but it makes under-invalidation impossible.
//!
//! Absence is not an error here. Looking up a missing entity or component
//! yields `None`/an empty result, and removals of absent things are
//! no-ops; an ECS treats absence as a perfectly normal state.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::warn;

use crate::builder::EntityBuilder;
use crate::component::{Component, ComponentTypeId};
use crate::entity::{Entity, EntityAllocator};
use crate::events::{EventHub, EventKind, ListenerEntry, SubscriptionId, WatcherEntry, WorldEvent};

type ComponentBox = Box<dyn Any + Send + Sync>;
type ComponentMap = HashMap<Entity, ComponentBox>;

/// Owns all entities and components and answers intersection queries.
///
/// Components are immutable values: to "mutate" one, read it, build the
/// next value, and [`World::add_component`] it back (last write wins).
/// The world is single-threaded by design; nothing here blocks.
#[derive(Default)]
pub struct World {
    allocator: EntityAllocator,
    entities: HashSet<Entity>,
    components: HashMap<ComponentTypeId, ComponentMap>,
    /// Memoized query results, keyed by sorted + deduplicated type sets.
    query_cache: HashMap<Vec<ComponentTypeId>, Vec<Entity>>,
    events: EventHub,
}

impl World {
    /// Create an empty world with a fresh entity allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Entity lifecycle --

    /// Allocate a fresh entity and insert it into the entity set.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.entities.insert(entity);
        entity
    }

    /// Begin fluent construction of a new entity.
    pub fn entity(&mut self) -> EntityBuilder<'_> {
        let entity = self.spawn();
        EntityBuilder::new(self, entity)
    }

    /// Insert an externally allocated entity id. Idempotent.
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.insert(entity);
    }

    /// Remove an entity and every component it holds, atomically.
    ///
    /// `ComponentRemoved` is emitted once per held component type before
    /// anything is deleted, so listeners observe the entity's final state.
    /// Removing an absent entity is a no-op.
    pub fn remove_entity(&mut self, entity: Entity) {
        let mut held: Vec<ComponentTypeId> = self
            .components
            .iter()
            .filter(|(_, map)| map.contains_key(&entity))
            .map(|(type_id, _)| *type_id)
            .collect();
        held.sort_unstable();

        for type_id in &held {
            self.emit(WorldEvent::ComponentRemoved {
                entity,
                type_id: *type_id,
            });
        }

        for type_id in &held {
            if let Some(map) = self.components.get_mut(type_id) {
                map.remove(&entity);
            }
        }
        let was_present = self.entities.remove(&entity);

        if was_present || !held.is_empty() {
            self.query_cache.clear();
            self.notify_watchers();
        }
    }

    /// Whether the entity is currently in the world.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// All live entities, in ascending id order.
    #[must_use]
    pub fn all_entities(&self) -> Vec<Entity> {
        let mut all: Vec<Entity> = self.entities.iter().copied().collect();
        all.sort_unstable();
        all
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // -- Component operations --

    /// Attach a component value to an entity.
    ///
    /// Implicitly adds the entity if it is unknown. An existing component
    /// of the same type is overwritten (last write wins). Invalidates the
    /// query cache and notifies `ComponentAdded` listeners.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        self.entities.insert(entity);
        let type_id = ComponentTypeId::of::<T>();
        self.components
            .entry(type_id)
            .or_default()
            .insert(entity, Box::new(component));
        self.query_cache.clear();
        self.emit(WorldEvent::ComponentAdded { entity, type_id });
        self.notify_watchers();
    }

    /// Remove an entity's component of type `T`. No-op if absent.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) {
        self.remove_component_by_id(entity, ComponentTypeId::of::<T>());
    }

    /// Remove by raw type id. No-op if absent.
    ///
    /// `ComponentRemoved` is emitted before deletion so listeners can read
    /// the final value.
    pub fn remove_component_by_id(&mut self, entity: Entity, type_id: ComponentTypeId) {
        let present = self
            .components
            .get(&type_id)
            .is_some_and(|map| map.contains_key(&entity));
        if !present {
            return;
        }

        self.emit(WorldEvent::ComponentRemoved { entity, type_id });
        if let Some(map) = self.components.get_mut(&type_id) {
            map.remove(&entity);
        }
        self.query_cache.clear();
        self.notify_watchers();
    }

    /// Borrow an entity's component of type `T`, if present.
    #[must_use]
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.components
            .get(&ComponentTypeId::of::<T>())?
            .get(&entity)?
            .downcast_ref::<T>()
    }

    /// Whether the entity holds a component of type `T`.
    #[must_use]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.has_component_id(entity, ComponentTypeId::of::<T>())
    }

    /// Whether the entity holds a component with the given type id.
    #[must_use]
    pub fn has_component_id(&self, entity: Entity, type_id: ComponentTypeId) -> bool {
        self.components
            .get(&type_id)
            .is_some_and(|map| map.contains_key(&entity))
    }

    /// Number of entities currently holding a component of type `T`.
    #[must_use]
    pub fn component_count<T: Component>(&self) -> usize {
        self.components
            .get(&ComponentTypeId::of::<T>())
            .map_or(0, HashMap::len)
    }

    // -- Queries --

    /// Begin a fluent query over required component types.
    pub fn query(&mut self) -> QueryBuilder<'_> {
        QueryBuilder {
            world: self,
            types: Vec::new(),
        }
    }

    /// All entities holding every one of the given component types, in
    /// ascending id order. An empty type list matches every entity.
    ///
    /// Results are cached per sorted type set until the next component
    /// mutation anywhere in the world.
    pub fn entities_with(&mut self, types: &[ComponentTypeId]) -> Vec<Entity> {
        if types.is_empty() {
            return self.all_entities();
        }

        let mut key = types.to_vec();
        key.sort_unstable();
        key.dedup();

        if let Some(cached) = self.query_cache.get(&key) {
            return cached.clone();
        }

        let result = self.compute_intersection(&key);
        self.query_cache.insert(key, result.clone());
        result
    }

    /// Uncached intersection of the per-type holder maps.
    ///
    /// Seeds from the type with the fewest holders, then filters that seed
    /// by membership in every other requested type's map.
    fn compute_intersection(&self, types: &[ComponentTypeId]) -> Vec<Entity> {
        if types.is_empty() {
            return self.all_entities();
        }

        let mut seed: Option<&ComponentMap> = None;
        for type_id in types {
            let Some(map) = self.components.get(type_id) else {
                // A type with no holders at all empties the intersection.
                return Vec::new();
            };
            if seed.is_none_or(|current| map.len() < current.len()) {
                seed = Some(map);
            }
        }
        let Some(seed) = seed else {
            return Vec::new();
        };

        let mut result: Vec<Entity> = seed
            .keys()
            .copied()
            .filter(|entity| {
                types.iter().all(|type_id| {
                    self.components
                        .get(type_id)
                        .is_some_and(|map| map.contains_key(entity))
                })
            })
            .collect();
        result.sort_unstable();
        result
    }

    // -- Notifications --

    /// Subscribe to an event kind for every component type.
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&World, &WorldEvent) + Send + 'static,
    {
        let id = self.events.next_subscription_id();
        self.events.listeners.push(ListenerEntry {
            id,
            kind,
            type_filter: None,
            callback: Box::new(callback),
        });
        id
    }

    /// Subscribe to an event kind for one component type only.
    pub fn on_component<T: Component, F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&World, &WorldEvent) + Send + 'static,
    {
        let id = self.events.next_subscription_id();
        self.events.listeners.push(ListenerEntry {
            id,
            kind,
            type_filter: Some(ComponentTypeId::of::<T>()),
            callback: Box::new(callback),
        });
        id
    }

    /// Subscribe to a query's result set. The callback receives the fresh
    /// result after every structural mutation in the world.
    pub fn watch<F>(&mut self, types: &[ComponentTypeId], callback: F) -> SubscriptionId
    where
        F: FnMut(&[Entity]) + Send + 'static,
    {
        let id = self.events.next_subscription_id();
        let mut sorted = types.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        self.events.watchers.push(WatcherEntry {
            id,
            types: sorted,
            callback: Box::new(callback),
        });
        id
    }

    /// Drop a listener or watcher subscription. Returns `true` if the
    /// token matched a live subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Fan an event out to matching listeners, in registration order.
    ///
    /// A panicking listener is caught and reported; it never interrupts
    /// the mutation or the remaining listeners.
    fn emit(&mut self, event: WorldEvent) {
        if self.events.listeners.is_empty() {
            return;
        }
        // Listeners get `&World`, so they cannot re-register during
        // dispatch; moving the list out keeps the borrows disjoint.
        let mut listeners = std::mem::take(&mut self.events.listeners);
        for entry in &mut listeners {
            if entry.matches(&event) {
                let outcome = catch_unwind(AssertUnwindSafe(|| (entry.callback)(self, &event)));
                if outcome.is_err() {
                    warn!(
                        entity = event.entity().id(),
                        "world event listener panicked; other listeners unaffected"
                    );
                }
            }
        }
        self.events.listeners = listeners;
    }

    /// Push fresh query results to every watcher.
    fn notify_watchers(&mut self) {
        if self.events.watchers.is_empty() {
            return;
        }
        let mut watchers = std::mem::take(&mut self.events.watchers);
        for entry in &mut watchers {
            let matched = self.compute_intersection(&entry.types);
            let outcome = catch_unwind(AssertUnwindSafe(|| (entry.callback)(&matched)));
            if outcome.is_err() {
                warn!("query watcher panicked; other watchers unaffected");
            }
        }
        self.events.watchers = watchers;
    }

    // -- Teardown --

    /// Drop every entity, component, cached query, and subscription.
    ///
    /// The entity allocator is retained, so ids are still never reused
    /// across a clear.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.components.clear();
        self.query_cache.clear();
        self.events.clear();
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entities.len())
            .field("component_types", &self.components.len())
            .field("cached_queries", &self.query_cache.len())
            .field("events", &self.events)
            .finish()
    }
}

/// Fluent query construction: `world.query().with::<A>().with::<B>()
/// .execute()`.
pub struct QueryBuilder<'w> {
    world: &'w mut World,
    types: Vec<ComponentTypeId>,
}

impl QueryBuilder<'_> {
    /// Require component type `T`.
    #[must_use]
    pub fn with<T: Component>(mut self) -> Self {
        self.types.push(ComponentTypeId::of::<T>());
        self
    }

    /// Require a component type by raw id.
    #[must_use]
    pub fn with_id(mut self, type_id: ComponentTypeId) -> Self {
        self.types.push(type_id);
        self
    }

    /// Run the query. No requirements means every entity matches.
    pub fn execute(self) -> Vec<Entity> {
        self.world.entities_with(&self.types)
    }
}
